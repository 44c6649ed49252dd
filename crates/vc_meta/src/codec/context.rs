use core::fmt;

use crate::codec::{LoadError, PathSegment, PropertyPath};
use crate::document::DocumentError;
use crate::scene::EntityId;
use crate::value::AssetCatalog;

// -----------------------------------------------------------------------------
// LoadOptions

/// What a load does with a field stored with the wrong representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MismatchPolicy {
    /// Stop with [`LoadError::Document`].
    #[default]
    Error,
    /// Keep the current value, log a warning and continue.
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub mismatch: MismatchPolicy,
}

// -----------------------------------------------------------------------------
// DeferredReference

/// An entity reference read during load, resolved once the scene exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredReference {
    /// Location of the reference below the loaded root.
    pub path: PropertyPath,
    pub target: EntityId,
}

// -----------------------------------------------------------------------------
// LoadContext

/// State threaded through one load.
///
/// Holds the asset catalog, the options and the entity references met so far.
pub struct LoadContext<'a> {
    assets: &'a dyn AssetCatalog,
    options: LoadOptions,
    path: PropertyPath,
    deferred: Vec<DeferredReference>,
}

impl<'a> LoadContext<'a> {
    #[inline]
    pub fn new(assets: &'a dyn AssetCatalog) -> Self {
        Self {
            assets,
            options: LoadOptions::default(),
            path: PropertyPath::new(),
            deferred: Vec::new(),
        }
    }

    #[inline]
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn assets(&self) -> &'a dyn AssetCatalog {
        self.assets
    }

    #[inline]
    pub fn options(&self) -> LoadOptions {
        self.options
    }

    /// The property being loaded.
    #[inline]
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }

    #[inline]
    pub fn deferred(&self) -> &[DeferredReference] {
        &self.deferred
    }

    /// Drains the entity references recorded so far.
    #[inline]
    pub fn take_deferred(&mut self) -> Vec<DeferredReference> {
        core::mem::take(&mut self.deferred)
    }

    #[inline]
    pub(crate) fn enter(&mut self, segment: PathSegment) {
        self.path.push(segment);
    }

    #[inline]
    pub(crate) fn leave(&mut self) {
        self.path.pop();
    }

    pub(crate) fn defer(&mut self, target: EntityId) {
        self.deferred.push(DeferredReference {
            path: self.path.clone(),
            target,
        });
    }

    /// Applies the mismatch policy to a read.
    pub(crate) fn accept<V>(
        &self,
        read: Result<Option<V>, DocumentError>,
    ) -> Result<Option<V>, LoadError> {
        match read {
            Ok(value) => Ok(value),
            Err(source) => match self.options.mismatch {
                MismatchPolicy::Error => Err(LoadError::Document {
                    path: self.path.clone(),
                    source,
                }),
                MismatchPolicy::Skip => {
                    log::warn!("skipped `{}`: {source}", self.path);
                    Ok(None)
                }
            },
        }
    }
}

impl LoadContext<'static> {
    /// A context without assets: every asset path resolves to nothing.
    #[inline]
    pub fn detached() -> Self {
        Self::new(&())
    }
}

impl fmt::Debug for LoadContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadContext")
            .field("options", &self.options)
            .field("path", &self.path)
            .field("deferred", &self.deferred)
            .finish_non_exhaustive()
    }
}
