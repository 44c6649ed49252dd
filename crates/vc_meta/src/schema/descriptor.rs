use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::info::{AssetKind, EnumIndex, PropertyKind, StrIndex};
use crate::ops::CollectionAdapter;
use crate::scene::EntityRef;
use crate::schema::Field;
use crate::value::{AnimGraphRef, Color, TextureRef, Transform};

// -----------------------------------------------------------------------------
// Access

/// How a property reaches its field, and what it defaults to.
///
/// One variant per [`PropertyKind`]; asset references have one variant per
/// [`AssetKind`].
pub enum Access<T: 'static> {
    Boolean {
        field: Field<T, bool>,
        default: bool,
    },
    Integer {
        field: Field<T, i32>,
        default: i32,
    },
    Float {
        field: Field<T, f32>,
        default: f32,
    },
    String {
        field: Field<T, String>,
        default: StrIndex,
    },
    FileName {
        field: Field<T, String>,
        default: StrIndex,
    },
    Color {
        field: Field<T, Color>,
        default: Color,
    },
    /// Defaults to the value at the domain's default index.
    Enum {
        field: Field<T, i32>,
        domain: EnumIndex,
    },
    /// Defaults to an empty string.
    EnumString {
        field: Field<T, String>,
        domain: EnumIndex,
    },
    /// Defaults to [`Transform::IDENTITY`].
    Transform { field: Field<T, Transform> },
    Texture { field: Field<T, TextureRef> },
    AnimGraph { field: Field<T, AnimGraphRef> },
    Entity { field: Field<T, EntityRef> },
    Array { adapter: Box<dyn CollectionAdapter<T>> },
    Callback { call: fn(&mut T) },
}

impl<T: 'static> Access<T> {
    pub fn kind(&self) -> PropertyKind {
        match self {
            Access::Boolean { .. } => PropertyKind::Boolean,
            Access::Integer { .. } => PropertyKind::Integer,
            Access::Float { .. } => PropertyKind::Float,
            Access::String { .. } => PropertyKind::String,
            Access::FileName { .. } => PropertyKind::FileName,
            Access::Color { .. } => PropertyKind::Color,
            Access::Enum { .. } => PropertyKind::Enum,
            Access::EnumString { .. } => PropertyKind::EnumString,
            Access::Transform { .. } => PropertyKind::Transform,
            Access::Texture { .. } => PropertyKind::Asset(AssetKind::Texture),
            Access::AnimGraph { .. } => PropertyKind::Asset(AssetKind::AnimGraph),
            Access::Entity { .. } => PropertyKind::EntityReference,
            Access::Array { .. } => PropertyKind::Array,
            Access::Callback { .. } => PropertyKind::Callback,
        }
    }
}

// -----------------------------------------------------------------------------
// DefaultValue

/// The declared default of a property, as seen by an editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue<'a> {
    Boolean(bool),
    Integer(i32),
    Float(f32),
    String(&'a str),
    Color(Color),
    Transform(Transform),
    /// Asset and entity references default to nothing.
    Empty,
}

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// One declared property of a type.
pub struct PropertyDescriptor<T: 'static> {
    pub(crate) index: usize,
    pub(crate) name: &'static str,
    pub(crate) display_name: &'static str,
    pub(crate) category: &'static str,
    pub(crate) access: Access<T>,
    changed: AtomicBool,
}

impl<T: 'static> PropertyDescriptor<T> {
    pub(crate) fn new(
        index: usize,
        name: &'static str,
        category: &'static str,
        access: Access<T>,
    ) -> Self {
        Self {
            index,
            name,
            display_name: name,
            category,
            access,
            changed: AtomicBool::new(false),
        }
    }

    /// Position in declaration order, stable for the life of the schema.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The document key.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The editor label, the name unless declared otherwise.
    #[inline]
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    #[inline]
    pub fn category(&self) -> &'static str {
        self.category
    }

    #[inline]
    pub fn kind(&self) -> PropertyKind {
        self.access.kind()
    }

    #[inline]
    pub fn access(&self) -> &Access<T> {
        &self.access
    }

    /// Returns the collection adapter of an array property.
    #[inline]
    pub fn adapter(&self) -> Option<&dyn CollectionAdapter<T>> {
        match &self.access {
            Access::Array { adapter } => Some(&**adapter),
            _ => None,
        }
    }

    #[inline]
    pub fn info(&self) -> PropertyInfo {
        PropertyInfo {
            index: self.index,
            name: self.name,
            display_name: self.display_name,
            category: self.category,
            kind: self.kind(),
        }
    }

    /// Returns `true` if the change flag is set.
    #[inline]
    pub fn is_changed(&self) -> bool {
        self.changed.load(Ordering::Relaxed)
    }

    /// Sets the change flag, called by editors after writing the field.
    #[inline]
    pub fn mark_changed(&self) {
        self.changed.store(true, Ordering::Relaxed);
    }

    /// Clears the change flag, returning its previous state.
    #[inline]
    pub(crate) fn take_changed_flag(&self) -> bool {
        self.changed.swap(false, Ordering::Relaxed)
    }
}

impl<T: 'static> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("kind", &self.kind())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// PropertyInfo

/// The owner-independent part of a [`PropertyDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub index: usize,
    pub name: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub kind: PropertyKind,
}
