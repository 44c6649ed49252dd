use core::any::{Any, TypeId};

use thiserror::Error;

use crate::access::{PropertyMut, PropertyRef, RootId};
use crate::codec::{self, LoadContext, LoadError, ResolveSummary};
use crate::document::{DocumentReader, DocumentWriter};
use crate::scene::EntityLookup;
use crate::schema::{Properties, PropertyInfo, Schema};

// -----------------------------------------------------------------------------
// SchemaMismatch

/// An erased operation received an owner of another type.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected an owner of type `{expected}`")]
pub struct SchemaMismatch {
    pub expected: &'static str,
}

// -----------------------------------------------------------------------------
// ErasedSchema

/// Object-safe access to a [`Schema`] whose owner type is not known
/// statically.
///
/// Owners are passed as `dyn Any` and checked against the schema type;
/// a wrong owner yields [`SchemaMismatch`] and is left untouched.
pub trait ErasedSchema: Send + Sync {
    fn owner_type_id(&self) -> TypeId;

    fn type_name(&self) -> &'static str;

    fn len(&self) -> usize;

    fn info(&self, index: usize) -> Option<PropertyInfo>;

    fn index_of(&self, name: &str) -> Option<usize>;

    /// Reads a property, `None` on a bad index or a wrong owner.
    fn value<'a>(&'a self, owner: &'a dyn Any, index: usize) -> Option<PropertyRef<'a>>;

    fn value_mut<'a>(&'a self, owner: &'a mut dyn Any, index: usize) -> Option<PropertyMut<'a>>;

    /// Creates an owner with `Default` field values, not the declared defaults.
    fn new_instance(&self) -> Box<dyn Any + Send + Sync>;

    /// Creates an owner holding the declared defaults.
    fn default_instance(&self) -> Box<dyn Any + Send + Sync>;

    fn set_defaults(&self, owner: &mut dyn Any) -> Result<(), SchemaMismatch>;

    fn load(
        &self,
        owner: &mut dyn Any,
        root: RootId,
        reader: &mut dyn DocumentReader,
        cx: &mut LoadContext<'_>,
    ) -> Result<(), LoadError>;

    fn save(
        &self,
        owner: &dyn Any,
        root: RootId,
        writer: &mut dyn DocumentWriter,
    ) -> Result<(), SchemaMismatch>;

    fn post_load(
        &self,
        owner: &mut dyn Any,
        root: RootId,
        lookup: &dyn EntityLookup,
        summary: &mut ResolveSummary,
    ) -> Result<(), SchemaMismatch>;

    /// Copies the same-named properties of `source` whose kinds match.
    /// Integers and enumerations match each other.
    ///
    /// Returns the number of properties copied.
    fn copy_from(
        &self,
        owner: &mut dyn Any,
        root: RootId,
        source: &dyn Any,
        source_schema: &dyn ErasedSchema,
    ) -> Result<usize, SchemaMismatch>;

    /// Reads and clears every change flag, recursing into element schemas.
    #[inline]
    fn take_changed(&self) -> bool {
        self.take_changed_with(&mut Vec::new())
    }

    /// As [`take_changed`](ErasedSchema::take_changed), skipping the schemas
    /// of the types in `visited`.
    fn take_changed_with(&self, visited: &mut Vec<TypeId>) -> bool;
}

impl<T: Properties> Schema<T> {
    #[inline]
    fn downcast<'a>(&self, owner: &'a dyn Any) -> Result<&'a T, SchemaMismatch> {
        owner.downcast_ref::<T>().ok_or(SchemaMismatch {
            expected: self.type_name(),
        })
    }

    #[inline]
    fn downcast_mut<'a>(&self, owner: &'a mut dyn Any) -> Result<&'a mut T, SchemaMismatch> {
        owner.downcast_mut::<T>().ok_or(SchemaMismatch {
            expected: self.type_name(),
        })
    }
}

impl<T: Properties> ErasedSchema for Schema<T> {
    #[inline]
    fn owner_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        Schema::type_name(self)
    }

    #[inline]
    fn len(&self) -> usize {
        Schema::len(self)
    }

    #[inline]
    fn info(&self, index: usize) -> Option<PropertyInfo> {
        self.get(index).map(|p| p.info())
    }

    #[inline]
    fn index_of(&self, name: &str) -> Option<usize> {
        Schema::index_of(self, name)
    }

    fn value<'a>(&'a self, owner: &'a dyn Any, index: usize) -> Option<PropertyRef<'a>> {
        let owner = self.downcast(owner).ok()?;
        Schema::value(self, owner, index)
    }

    fn value_mut<'a>(&'a self, owner: &'a mut dyn Any, index: usize) -> Option<PropertyMut<'a>> {
        let owner = self.downcast_mut(owner).ok()?;
        Schema::value_mut(self, owner, index)
    }

    fn new_instance(&self) -> Box<dyn Any + Send + Sync> {
        Box::new(T::default())
    }

    fn default_instance(&self) -> Box<dyn Any + Send + Sync> {
        let mut owner = T::default();
        codec::set_defaults(self, &mut owner);
        Box::new(owner)
    }

    fn set_defaults(&self, owner: &mut dyn Any) -> Result<(), SchemaMismatch> {
        codec::set_defaults(self, self.downcast_mut(owner)?);
        Ok(())
    }

    fn load(
        &self,
        owner: &mut dyn Any,
        root: RootId,
        reader: &mut dyn DocumentReader,
        cx: &mut LoadContext<'_>,
    ) -> Result<(), LoadError> {
        codec::load(self, self.downcast_mut(owner)?, root, reader, cx)
    }

    fn save(
        &self,
        owner: &dyn Any,
        root: RootId,
        writer: &mut dyn DocumentWriter,
    ) -> Result<(), SchemaMismatch> {
        codec::save(self, self.downcast(owner)?, root, writer)
    }

    fn post_load(
        &self,
        owner: &mut dyn Any,
        root: RootId,
        lookup: &dyn EntityLookup,
        summary: &mut ResolveSummary,
    ) -> Result<(), SchemaMismatch> {
        codec::post_load(self, self.downcast_mut(owner)?, root, lookup, summary)
    }

    fn copy_from(
        &self,
        owner: &mut dyn Any,
        root: RootId,
        source: &dyn Any,
        source_schema: &dyn ErasedSchema,
    ) -> Result<usize, SchemaMismatch> {
        codec::copy_from(self, self.downcast_mut(owner)?, root, source, source_schema)
    }

    #[inline]
    fn take_changed_with(&self, visited: &mut Vec<TypeId>) -> bool {
        codec::take_changed(self, visited)
    }
}
