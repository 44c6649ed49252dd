use core::any::Any;
use core::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::access::RootId;
use crate::codec::{LoadContext, LoadError, ResolveSummary};
use crate::document::{DocumentReader, DocumentWriter};
use crate::scene::{EntityId, EntityLookup};
use crate::schema::{ErasedSchema, SchemaMismatch};

/// Shared ownership of a scene [`Entity`].
pub type EntityHandle = Arc<Entity>;

// -----------------------------------------------------------------------------
// Entity

/// A type-erased scene object and the schema describing it.
///
/// The object sits behind a lock so entities can be shared through
/// [`EntityHandle`] and still be edited.
pub struct Entity {
    uid: EntityId,
    name: String,
    schema: Arc<dyn ErasedSchema>,
    object: RwLock<Box<dyn Any + Send + Sync>>,
}

impl Entity {
    /// Wraps `object`, which must be of the schema's owner type.
    pub fn new(
        uid: EntityId,
        name: impl Into<String>,
        schema: Arc<dyn ErasedSchema>,
        object: Box<dyn Any + Send + Sync>,
    ) -> Result<Self, SchemaMismatch> {
        if (*object).type_id() != schema.owner_type_id() {
            return Err(SchemaMismatch {
                expected: schema.type_name(),
            });
        }
        Ok(Self::from_parts(uid, name.into(), schema, object))
    }

    pub(crate) fn from_parts(
        uid: EntityId,
        name: String,
        schema: Arc<dyn ErasedSchema>,
        object: Box<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            uid,
            name,
            schema,
            object: RwLock::new(object),
        }
    }

    #[inline]
    pub fn uid(&self) -> EntityId {
        self.uid
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn schema(&self) -> &Arc<dyn ErasedSchema> {
        &self.schema
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.schema.type_name()
    }

    /// The root of every property owned by this entity.
    ///
    /// Derived from the uid, so it is the same before and after a reload.
    #[inline]
    pub fn root(&self) -> RootId {
        RootId::from_raw(self.uid.get() as usize)
    }

    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, Box<dyn Any + Send + Sync>> {
        self.object.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, Box<dyn Any + Send + Sync>> {
        self.object.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` on the object if it is a `T`.
    pub fn with<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.read().downcast_ref::<T>().map(f)
    }

    pub fn with_mut<T: 'static, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.write().downcast_mut::<T>().map(f)
    }

    pub fn set_defaults(&self) -> Result<(), SchemaMismatch> {
        self.schema.set_defaults(&mut **self.write())
    }

    pub fn load(
        &self,
        reader: &mut dyn DocumentReader,
        cx: &mut LoadContext<'_>,
    ) -> Result<(), LoadError> {
        self.schema.load(&mut **self.write(), self.root(), reader, cx)
    }

    pub fn save(&self, writer: &mut dyn DocumentWriter) -> Result<(), SchemaMismatch> {
        self.schema.save(&**self.read(), self.root(), writer)
    }

    pub fn post_load(&self, lookup: &dyn EntityLookup) -> Result<ResolveSummary, SchemaMismatch> {
        let mut summary = ResolveSummary::default();
        self.schema
            .post_load(&mut **self.write(), self.root(), lookup, &mut summary)?;
        Ok(summary)
    }

    /// Copies the same-named properties of `source` whose kinds match.
    /// Integers and enumerations match each other.
    ///
    /// Copying an entity onto itself does nothing.
    pub fn copy_from(&self, source: &Entity) -> Result<usize, SchemaMismatch> {
        if core::ptr::eq(self, source) {
            return Ok(0);
        }
        let source_object = source.read();
        let mut object = self.write();
        self.schema
            .copy_from(&mut **object, self.root(), &**source_object, &*source.schema)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("uid", &self.uid)
            .field("name", &self.name)
            .field("type", &self.schema.type_name())
            .finish_non_exhaustive()
    }
}
