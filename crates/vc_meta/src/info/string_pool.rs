use vc_utils::hash::HashMap;

// -----------------------------------------------------------------------------
// StrIndex

/// Index of a string inside a [`StringPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrIndex(u16);

impl StrIndex {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// -----------------------------------------------------------------------------
// StringPool

/// De-duplicated default strings of one schema.
///
/// Descriptors keep a small [`StrIndex`] instead of their own copy.
///
/// # Examples
///
/// ```
/// use vc_meta::info::StringPool;
///
/// let mut pool = StringPool::default();
/// let a = pool.intern("default");
/// let b = pool.intern("default");
///
/// assert_eq!(a, b);
/// assert_eq!(pool.get(a), "default");
/// assert_eq!(pool.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StringPool {
    strings: Vec<&'static str>,
    index: HashMap<&'static str, StrIndex>,
}

impl StringPool {
    /// Returns the index of `value`, adding it on first use.
    ///
    /// # Panics
    ///
    /// Panics if the pool would exceed `u16::MAX` strings.
    pub fn intern(&mut self, value: &'static str) -> StrIndex {
        if let Some(index) = self.index.get(value) {
            return *index;
        }
        let Ok(raw) = u16::try_from(self.strings.len()) else {
            panic!("too many default strings in one schema");
        };
        let index = StrIndex(raw);
        self.strings.push(value);
        self.index.insert(value, index);
        index
    }

    /// Returns the string stored at `index`.
    ///
    /// An index from another pool yields an empty string.
    #[inline]
    pub fn get(&self, index: StrIndex) -> &'static str {
        self.strings.get(index.index()).copied().unwrap_or("")
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.strings.iter().copied()
    }
}
