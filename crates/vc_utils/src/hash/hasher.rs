use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const SEED: u64 = 0x95EE04C4F326B271;

/// Builds `foldhash` hashers from one compile-time seed.
///
/// A key hashes to the same value in every process, so the iteration order
/// of a map depends on its keys alone.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("position"), FixedHashState.hash_one("position"));
/// assert_ne!(FixedHashState.hash_one("position"), FixedHashState.hash_one("rotation"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        const STATE: FixedState = FixedState::with_seed(SEED);
        STATE.build_hasher()
    }
}

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use super::FixedHashState;

    #[test]
    fn hashes_do_not_depend_on_the_instance() {
        let a = FixedHashState;
        let b = FixedHashState::default();
        assert_eq!(a.hash_one(b"Elem"), b.hash_one(b"Elem"));
    }
}
