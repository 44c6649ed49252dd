use core::ptr;

// -----------------------------------------------------------------------------
// RootId

/// Identity of the topmost object of a traversal.
///
/// Nested elements are bound with the id of the object that contains them,
/// so editors can key widget state per root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId(usize);

impl RootId {
    /// The address of `value`. Only meaningful while `value` does not move.
    #[inline]
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self(ptr::from_ref(value).cast::<()>().addr())
    }

    #[inline]
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0
    }
}
