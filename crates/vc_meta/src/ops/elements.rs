use core::any::Any;

// -----------------------------------------------------------------------------
// Elements

/// A resizable sequence of elements of one type.
pub trait Elements: Any + Send + Sync {
    fn len(&self) -> usize;

    /// Grows with `Default` elements or truncates to `len`.
    fn resize(&mut self, len: usize);

    fn item(&self, index: usize) -> Option<&dyn Any>;

    fn item_mut(&mut self, index: usize) -> Option<&mut dyn Any>;

    /// Appends a `Default` element and returns its index.
    fn push_back(&mut self) -> usize;

    /// Removes the element at `index`, shifting the following ones.
    ///
    /// Returns `false` if `index` is out of bounds.
    fn delete(&mut self, index: usize) -> bool;
}

impl<E: Default + Send + Sync + 'static> Elements for Vec<E> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn resize(&mut self, len: usize) {
        self.resize_with(len, E::default);
    }

    #[inline]
    fn item(&self, index: usize) -> Option<&dyn Any> {
        self.get(index).map(|e| e as &dyn Any)
    }

    #[inline]
    fn item_mut(&mut self, index: usize) -> Option<&mut dyn Any> {
        self.get_mut(index).map(|e| e as &mut dyn Any)
    }

    fn push_back(&mut self) -> usize {
        self.push(E::default());
        Vec::len(self) - 1
    }

    fn delete(&mut self, index: usize) -> bool {
        if index < Vec::len(self) {
            self.remove(index);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Elements;

    #[test]
    fn resize_is_idempotent() {
        let mut items: Vec<u32> = vec![1, 2, 3, 4, 5];
        Elements::resize(&mut items, 3);
        Elements::resize(&mut items, 3);
        assert_eq!(items, [1, 2, 3]);

        Elements::resize(&mut items, 4);
        assert_eq!(items, [1, 2, 3, 0]);
    }

    #[test]
    fn delete_shifts() {
        let mut items: Vec<u32> = vec![1, 2, 3];
        assert!(items.delete(0));
        assert!(!items.delete(5));
        assert_eq!(items, [2, 3]);
        assert_eq!(items.push_back(), 2);
        assert_eq!(items.item(0).and_then(|e| e.downcast_ref::<u32>()), Some(&2));
    }
}
