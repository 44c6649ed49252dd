use core::any::Any;
use core::fmt;

use crate::access::{PropertyMut, PropertyRef, RootId};
use crate::codec::{self, LoadContext, LoadError, ResolveSummary};
use crate::document::{DocumentReader, DocumentWriter};
use crate::scene::EntityLookup;
use crate::schema::{Access, ErasedSchema, Properties, PropertyDescriptor, Schema, SchemaMismatch};

// -----------------------------------------------------------------------------
// Binding

/// A [`Schema`] bound to one owner.
///
/// Holds the owner mutably, so a binding cannot outlive its owner nor
/// coexist with another binding of it.
///
/// # Examples
///
/// ```
/// use vc_meta::Properties;
/// use vc_meta::access::PropertyMut;
/// use vc_meta::registry::SchemaRegistry;
///
/// #[derive(Properties, Default)]
/// struct Sprite {
///     #[property(default = true)]
///     visible: bool,
/// }
///
/// let mut registry = SchemaRegistry::new();
/// let schema = registry.schema::<Sprite>();
/// let mut sprite = Sprite::default();
/// let mut binding = schema.prepare(&mut sprite);
///
/// let index = binding.index_of("visible").unwrap();
/// if let Some(PropertyMut::Boolean(visible)) = binding.value_mut(index) {
///     *visible = false;
/// }
/// binding.mark_changed(index);
///
/// assert!(binding.take_changed());
/// assert!(!binding.take_changed());
/// assert!(!sprite.visible);
/// ```
pub struct Binding<'a, T: 'static> {
    schema: &'a Schema<T>,
    owner: &'a mut T,
    root: RootId,
}

impl<'a, T: 'static> Binding<'a, T> {
    #[inline]
    pub(crate) fn new(schema: &'a Schema<T>, owner: &'a mut T, root: RootId) -> Self {
        Self {
            schema,
            owner,
            root,
        }
    }

    #[inline]
    pub fn schema(&self) -> &'a Schema<T> {
        self.schema
    }

    #[inline]
    pub fn owner(&self) -> &T {
        self.owner
    }

    #[inline]
    pub fn owner_mut(&mut self) -> &mut T {
        self.owner
    }

    #[inline]
    pub fn root(&self) -> RootId {
        self.root
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.schema.len()
    }

    #[inline]
    pub fn descriptor(&self, index: usize) -> Option<&'a PropertyDescriptor<T>> {
        self.schema.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    #[inline]
    pub fn value(&self, index: usize) -> Option<PropertyRef<'_>> {
        self.schema.value(self.owner, index)
    }

    #[inline]
    pub fn value_mut(&mut self, index: usize) -> Option<PropertyMut<'_>> {
        self.schema.value_mut(self.owner, index)
    }

    /// Sets the change flag of a property. Returns `false` on a bad index.
    pub fn mark_changed(&self, index: usize) -> bool {
        match self.schema.get(index) {
            Some(descriptor) => {
                descriptor.mark_changed();
                true
            }
            None => false,
        }
    }

    /// Runs a callback property. Returns `false` if `index` is not a callback.
    pub fn invoke(&mut self, index: usize) -> bool {
        match self.schema.get(index).map(PropertyDescriptor::access) {
            Some(Access::Callback { call }) => {
                call(self.owner);
                true
            }
            _ => false,
        }
    }

    /// Number of elements of an array property.
    pub fn element_count(&self, index: usize) -> Option<usize> {
        let adapter = self.schema.get(index)?.adapter()?;
        Some(adapter.len(self.owner))
    }

    /// Appends an element holding its declared defaults to an array
    /// property, and marks the property changed.
    ///
    /// Returns the index of the new element.
    pub fn push_element(&mut self, index: usize) -> Option<usize> {
        let descriptor = self.schema.get(index)?;
        let adapter = descriptor.adapter()?;
        let element = adapter.push_default(self.owner);
        descriptor.mark_changed();
        Some(element)
    }

    /// Removes one element of an array property, and marks the property
    /// changed.
    pub fn delete_element(&mut self, index: usize, element: usize) -> bool {
        let Some(descriptor) = self.schema.get(index) else {
            return false;
        };
        let Some(adapter) = descriptor.adapter() else {
            return false;
        };
        let deleted = adapter.delete(self.owner, element);
        if deleted {
            descriptor.mark_changed();
        }
        deleted
    }

    /// Writes the declared default of every property.
    ///
    /// Arrays keep their elements; callbacks are skipped.
    #[inline]
    pub fn set_defaults(&mut self) {
        codec::set_defaults(self.schema, self.owner);
    }

    /// Reads every property present in the current block of `reader`.
    ///
    /// Absent fields keep their value. Entity references are recorded in
    /// `cx` for a later resolution.
    #[inline]
    pub fn load(
        &mut self,
        reader: &mut dyn DocumentReader,
        cx: &mut LoadContext<'_>,
    ) -> Result<(), LoadError> {
        codec::load(self.schema, self.owner, self.root, reader, cx)
    }

    /// Writes every persistent property into the current block of `writer`.
    #[inline]
    pub fn save(&self, writer: &mut dyn DocumentWriter) -> Result<(), SchemaMismatch> {
        codec::save(self.schema, self.owner, self.root, writer)
    }

    /// Resolves the entity references loaded so far, recursing into arrays.
    pub fn post_load(&mut self, lookup: &dyn EntityLookup) -> Result<ResolveSummary, SchemaMismatch> {
        let mut summary = ResolveSummary::default();
        codec::post_load(self.schema, self.owner, self.root, lookup, &mut summary)?;
        Ok(summary)
    }

    /// Copies the same-named properties of `source` whose kinds match.
    /// Integers and enumerations match each other.
    ///
    /// Returns the number of properties copied.
    #[inline]
    pub fn copy_from<S: Properties>(
        &mut self,
        source: &S,
        source_schema: &Schema<S>,
    ) -> Result<usize, SchemaMismatch> {
        self.copy_from_erased(source, source_schema)
    }

    #[inline]
    pub fn copy_from_erased(
        &mut self,
        source: &dyn Any,
        source_schema: &dyn ErasedSchema,
    ) -> Result<usize, SchemaMismatch> {
        codec::copy_from(self.schema, self.owner, self.root, source, source_schema)
    }

    /// Returns whether any property changed since the last call, and clears
    /// the flags.
    ///
    /// Flags live in the schema, so they are shared by every owner of `T`.
    #[inline]
    pub fn take_changed(&self) -> bool {
        codec::take_changed(self.schema, &mut Vec::new())
    }
}

impl<T: 'static> fmt::Debug for Binding<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("schema", &self.schema.type_name())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
