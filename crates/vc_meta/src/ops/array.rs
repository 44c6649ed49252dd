use core::any::Any;
use core::fmt;

use crate::ops::Elements;
use crate::schema::{ErasedSchema, SchemaMismatch};

// -----------------------------------------------------------------------------
// ArrayRef

/// A collection property of a bound owner.
#[derive(Clone, Copy)]
pub struct ArrayRef<'a> {
    elements: &'a dyn Elements,
    schema: &'a dyn ErasedSchema,
}

impl<'a> ArrayRef<'a> {
    #[inline]
    pub(crate) fn new(elements: &'a dyn Elements, schema: &'a dyn ErasedSchema) -> Self {
        Self { elements, schema }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.len() == 0
    }

    /// The schema shared by every element.
    #[inline]
    pub fn schema(&self) -> &'a dyn ErasedSchema {
        self.schema
    }

    #[inline]
    pub fn item(&self, index: usize) -> Option<&'a dyn Any> {
        self.elements.item(index)
    }
}

impl fmt::Debug for ArrayRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayRef")
            .field("element", &self.schema.type_name())
            .field("len", &self.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ArrayMut

/// A mutable collection property of a bound owner.
pub struct ArrayMut<'a> {
    elements: &'a mut dyn Elements,
    schema: &'a dyn ErasedSchema,
}

impl<'a> ArrayMut<'a> {
    #[inline]
    pub(crate) fn new(elements: &'a mut dyn Elements, schema: &'a dyn ErasedSchema) -> Self {
        Self { elements, schema }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.len() == 0
    }

    #[inline]
    pub fn schema(&self) -> &'a dyn ErasedSchema {
        self.schema
    }

    #[inline]
    pub fn resize(&mut self, len: usize) {
        self.elements.resize(len);
    }

    #[inline]
    pub fn item(&self, index: usize) -> Option<&dyn Any> {
        self.elements.item(index)
    }

    #[inline]
    pub fn item_mut(&mut self, index: usize) -> Option<&mut dyn Any> {
        self.elements.item_mut(index)
    }

    /// Appends an element holding its declared defaults, returns its index.
    ///
    /// The new element is removed again if it does not match the schema.
    pub fn push_default(&mut self) -> Result<usize, SchemaMismatch> {
        let index = self.elements.push_back();
        let result = match self.elements.item_mut(index) {
            Some(item) => self.schema.set_defaults(item),
            None => Ok(()),
        };
        if result.is_err() {
            self.elements.delete(index);
        }
        result.map(|()| index)
    }

    #[inline]
    pub fn delete(&mut self, index: usize) -> bool {
        self.elements.delete(index)
    }

    /// Consumes the view, keeping a mutable borrow of one element.
    #[inline]
    pub fn into_item_mut(self, index: usize) -> Option<(&'a dyn ErasedSchema, &'a mut dyn Any)> {
        let schema = self.schema;
        self.elements.item_mut(index).map(|item| (schema, item))
    }
}

impl fmt::Debug for ArrayMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayMut")
            .field("element", &self.schema.type_name())
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::access::PropertyMut;
    use crate::field;
    use crate::ops::ArrayMut;
    use crate::registry::SchemaRegistry;
    use crate::schema::{Properties, SchemaBuilder};

    #[derive(Default)]
    struct Knot {
        tension: f32,
    }

    impl Properties for Knot {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.float("tension", field!(Knot, tension), 0.25);
        }
    }

    #[derive(Default)]
    struct Spline {
        knots: Vec<Knot>,
    }

    impl Properties for Spline {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.array("knots", field!(Spline, knots));
        }
    }

    #[test]
    fn push_default_applies_declared_defaults() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Spline>();
        let mut spline = Spline::default();

        let mut binding = schema.prepare(&mut spline);
        let Some(PropertyMut::Array(mut knots)) = binding.value_mut(0) else {
            panic!("`knots` is an array");
        };
        assert_eq!(knots.push_default(), Ok(0));
        assert_eq!(knots.len(), 1);
        assert_eq!(spline.knots[0].tension, 0.25);
    }

    #[test]
    fn mismatched_element_is_removed() {
        let mut registry = SchemaRegistry::new();
        let knot = registry.schema::<Knot>();
        let mut items: Vec<u8> = vec![1];

        let mut array = ArrayMut::new(&mut items, &*knot);
        assert!(array.push_default().is_err());
        assert_eq!(items, [1]);
    }
}
