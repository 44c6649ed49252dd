use core::any::Any;
use std::sync::{Arc, OnceLock};

use crate::codec;
use crate::info::StringPool;
use crate::ops::Elements;
use crate::schema::{ErasedSchema, Field, Properties, Schema};

// -----------------------------------------------------------------------------
// CollectionAdapter

/// Reaches a collection of sub-objects inside an owner of type `T`.
///
/// The adapter keeps no owner: every call receives it. The element schema is
/// owned by the adapter and shared by all owners.
pub trait CollectionAdapter<T>: Send + Sync {
    fn elements<'a>(&self, owner: &'a T) -> &'a dyn Elements;

    fn elements_mut<'a>(&self, owner: &'a mut T) -> &'a mut dyn Elements;

    fn element_schema(&self) -> &dyn ErasedSchema;

    /// Appends an element holding its declared defaults, returns its index.
    fn push_default(&self, owner: &mut T) -> usize;

    #[inline]
    fn len(&self, owner: &T) -> usize {
        self.elements(owner).len()
    }

    #[inline]
    fn resize(&self, owner: &mut T, len: usize) {
        self.elements_mut(owner).resize(len);
    }

    #[inline]
    fn item<'a>(&self, owner: &'a T, index: usize) -> Option<&'a dyn Any> {
        self.elements(owner).item(index)
    }

    #[inline]
    fn item_mut<'a>(&self, owner: &'a mut T, index: usize) -> Option<&'a mut dyn Any> {
        self.elements_mut(owner).item_mut(index)
    }

    #[inline]
    fn push_back(&self, owner: &mut T) -> usize {
        self.elements_mut(owner).push_back()
    }

    #[inline]
    fn delete(&self, owner: &mut T, index: usize) -> bool {
        self.elements_mut(owner).delete(index)
    }
}

// -----------------------------------------------------------------------------
// ElementSchema

/// A shared slot for a schema that is still being built.
pub(crate) type SchemaSlot<E> = Arc<OnceLock<Arc<Schema<E>>>>;

/// The element schema of a [`VecAdapter`].
///
/// Recursive element types reference the schema of a type still being built;
/// the registry fills the slot once that build ends. Until then the elements
/// read as having no properties.
pub(crate) enum ElementSchema<E: 'static> {
    Ready(Arc<Schema<E>>),
    Deferred { slot: SchemaSlot<E>, empty: Schema<E> },
}

impl<E: Properties> ElementSchema<E> {
    pub(crate) fn deferred(slot: SchemaSlot<E>) -> Self {
        let empty = Schema::new(E::type_name(), Vec::new(), StringPool::default(), Vec::new());
        Self::Deferred { slot, empty }
    }

    #[inline]
    fn get(&self) -> &Schema<E> {
        match self {
            Self::Ready(schema) => &**schema,
            Self::Deferred { slot, empty } => slot.get().map_or(empty, |schema| &**schema),
        }
    }
}

// -----------------------------------------------------------------------------
// VecAdapter

/// The [`CollectionAdapter`] of a `Vec<E>` field.
pub struct VecAdapter<T, E: Properties> {
    field: Field<T, Vec<E>>,
    element: ElementSchema<E>,
}

impl<T, E: Properties> VecAdapter<T, E> {
    #[inline]
    pub fn new(field: Field<T, Vec<E>>, schema: Arc<Schema<E>>) -> Self {
        Self::with_element(field, ElementSchema::Ready(schema))
    }

    #[inline]
    pub(crate) fn with_element(field: Field<T, Vec<E>>, element: ElementSchema<E>) -> Self {
        Self { field, element }
    }

    #[inline]
    pub fn schema(&self) -> &Schema<E> {
        self.element.get()
    }
}

impl<T, E: Properties> CollectionAdapter<T> for VecAdapter<T, E> {
    #[inline]
    fn elements<'a>(&self, owner: &'a T) -> &'a dyn Elements {
        self.field.get(owner)
    }

    #[inline]
    fn elements_mut<'a>(&self, owner: &'a mut T) -> &'a mut dyn Elements {
        self.field.get_mut(owner)
    }

    #[inline]
    fn element_schema(&self) -> &dyn ErasedSchema {
        self.element.get()
    }

    fn push_default(&self, owner: &mut T) -> usize {
        let mut element = E::default();
        codec::set_defaults(self.element.get(), &mut element);
        let items = self.field.get_mut(owner);
        items.push(element);
        items.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use crate::field;
    use crate::ops::{CollectionAdapter, VecAdapter};
    use crate::registry::SchemaRegistry;
    use crate::schema::{Properties, SchemaBuilder};

    #[derive(Default)]
    struct Waypoint {
        wait: f32,
    }

    impl Properties for Waypoint {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.float("wait", field!(Waypoint, wait), 0.5);
        }
    }

    #[derive(Default)]
    struct Path {
        points: Vec<Waypoint>,
    }

    #[test]
    fn owner_is_passed_per_call() {
        let mut registry = SchemaRegistry::new();
        let adapter = VecAdapter::new(field!(Path, points), registry.schema::<Waypoint>());

        let mut a = Path::default();
        let mut b = Path::default();
        adapter.resize(&mut a, 2);
        adapter.push_back(&mut b);

        assert_eq!(adapter.len(&a), 2);
        assert_eq!(adapter.len(&b), 1);
        assert_eq!(adapter.element_schema().type_name(), registry.schema::<Waypoint>().type_name());
        assert!(adapter.delete(&mut a, 1));
        assert_eq!(a.points.len(), 1);
    }

    #[test]
    fn pushed_elements_hold_declared_defaults() {
        let mut registry = SchemaRegistry::new();
        let adapter = VecAdapter::new(field!(Path, points), registry.schema::<Waypoint>());

        let mut path = Path::default();
        adapter.resize(&mut path, 1);
        assert_eq!(adapter.push_default(&mut path), 1);
        assert_eq!(path.points[0].wait, 0.0);
        assert_eq!(path.points[1].wait, 0.5);
    }
}
