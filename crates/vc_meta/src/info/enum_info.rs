// -----------------------------------------------------------------------------
// EnumIndex

/// Index of an [`EnumDescriptor`] inside the enum table of one schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumIndex(pub(crate) u16);

impl EnumIndex {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// -----------------------------------------------------------------------------
// EnumDescriptor

/// A named integer domain: an ordered list of `(label, value)` pairs plus
/// the index of the default entry.
///
/// # Examples
///
/// ```
/// use vc_meta::info::EnumDescriptor;
///
/// const FILTER: EnumDescriptor =
///     EnumDescriptor::new("TextureFilter", &[("Point", 0), ("Linear", 1)], 1);
///
/// assert_eq!(FILTER.default_value(), 1);
/// assert_eq!(FILTER.label_of(0), Some("Point"));
/// assert_eq!(FILTER.value_of("Linear"), Some(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumDescriptor {
    name: &'static str,
    entries: &'static [(&'static str, i32)],
    default_index: usize,
}

impl EnumDescriptor {
    #[inline]
    pub const fn new(
        name: &'static str,
        entries: &'static [(&'static str, i32)],
        default_index: usize,
    ) -> Self {
        Self {
            name,
            entries,
            default_index,
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn entries(&self) -> &'static [(&'static str, i32)] {
        self.entries
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub const fn default_index(&self) -> usize {
        self.default_index
    }

    /// Returns the integer value of the default entry.
    ///
    /// An out of range default index, or an empty domain, yields `0`.
    pub fn default_value(&self) -> i32 {
        self.entries.get(self.default_index).map_or(0, |entry| entry.1)
    }

    /// Returns the label of the first entry holding `value`.
    pub fn label_of(&self, value: i32) -> Option<&'static str> {
        self.entries.iter().find(|e| e.1 == value).map(|e| e.0)
    }

    /// Returns the value of the entry labelled `label`.
    pub fn value_of(&self, label: &str) -> Option<i32> {
        self.entries.iter().find(|e| e.0 == label).map(|e| e.1)
    }

    /// Returns the position of the first entry holding `value`.
    pub fn index_of(&self, value: i32) -> Option<usize> {
        self.entries.iter().position(|e| e.1 == value)
    }
}

// -----------------------------------------------------------------------------
// EnumDomain

/// A type naming an integer domain, used by `#[property(enumeration = ..)]`.
///
/// # Examples
///
/// ```
/// use vc_meta::info::{EnumDescriptor, EnumDomain};
///
/// struct BlendMode;
///
/// impl EnumDomain for BlendMode {
///     const DESCRIPTOR: EnumDescriptor =
///         EnumDescriptor::new("BlendMode", &[("Alpha", 0), ("Add", 1)], 0);
/// }
///
/// assert_eq!(BlendMode::DESCRIPTOR.len(), 2);
/// ```
pub trait EnumDomain {
    const DESCRIPTOR: EnumDescriptor;
}

#[cfg(test)]
mod tests {
    use super::EnumDescriptor;

    #[test]
    fn empty_domain_defaults_to_zero() {
        let empty = EnumDescriptor::new("Empty", &[], 3);
        assert_eq!(empty.default_value(), 0);
        assert_eq!(empty.label_of(0), None);
    }

    #[test]
    fn duplicate_values_resolve_to_first_label() {
        let alias = EnumDescriptor::new("Alias", &[("A", 2), ("B", 2)], 1);
        assert_eq!(alias.label_of(2), Some("A"));
        assert_eq!(alias.index_of(2), Some(0));
        assert_eq!(alias.default_value(), 2);
    }
}
