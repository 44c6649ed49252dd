use core::any::TypeId;
use core::fmt;
use core::hash::{BuildHasher, BuildHasherDefault, Hasher};

use hashbrown::HashMap;

use crate::hash::FixedHashState;

// -----------------------------------------------------------------------------
// TypeIdHasher

/// Keeps the `u64` a [`TypeId`] writes as its hash.
#[derive(Default)]
struct TypeIdHasher {
    hash: u64,
}

impl Hasher for TypeIdHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    #[inline]
    fn write_u64(&mut self, value: u64) {
        self.hash = value;
    }

    // Only reached if `TypeId` stops hashing as a single `u64`.
    fn write(&mut self, bytes: &[u8]) {
        self.hash = FixedHashState.hash_one((self.hash, bytes));
    }
}

type TypeIdState = BuildHasherDefault<TypeIdHasher>;

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map keyed by [`TypeId`], which is already a hash and is not hashed
/// again.
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use vc_utils::TypeIdMap;
///
/// let mut map = TypeIdMap::new();
/// map.insert(TypeId::of::<f32>(), "float");
///
/// assert_eq!(map.get_type::<f32>(), Some(&"float"));
/// assert!(!map.contains_type::<i32>());
/// ```
pub struct TypeIdMap<V> {
    entries: HashMap<TypeId, V, TypeIdState>,
}

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: HashMap::with_hasher(TypeIdState::new()),
        }
    }

    /// Stores `value` for `type_id`, returning the value it replaces.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.entries.insert(type_id, value)
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.entries.get(type_id)
    }

    #[inline]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.entries.get(&TypeId::of::<T>())
    }

    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.entries.contains_key(type_id)
    }

    #[inline]
    pub fn contains_type<T: ?Sized + 'static>(&self) -> bool {
        self.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visits the values in no particular order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.entries.values()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use core::hash::{BuildHasher, Hash, Hasher};

    use super::{TypeIdMap, TypeIdState};

    #[test]
    fn type_ids_are_not_rehashed() {
        let mut hasher = TypeIdState::new().build_hasher();
        hasher.write_u64(1234);
        assert_eq!(hasher.finish(), 1234);

        let id = TypeId::of::<u8>();
        assert_eq!(TypeIdState::new().hash_one(id), TypeIdState::new().hash_one(id));
        let mut hasher = TypeIdState::new().build_hasher();
        id.hash(&mut hasher);
        assert_ne!(hasher.finish(), TypeIdState::new().hash_one(TypeId::of::<u16>()));
    }

    #[test]
    fn insert_replaces() {
        let mut map = TypeIdMap::new();
        assert_eq!(map.insert(TypeId::of::<bool>(), 3), None);
        assert_eq!(map.insert(TypeId::of::<bool>(), 4), Some(3));
        assert_eq!(map.get(&TypeId::of::<bool>()), Some(&4));
        assert!(map.contains_type::<bool>());
        assert_eq!(map.values().count(), 1);
        assert!(!map.is_empty());
    }
}
