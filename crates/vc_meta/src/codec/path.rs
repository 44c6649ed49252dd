use core::fmt;

use crate::codec::ELEMENT_BLOCK;

// -----------------------------------------------------------------------------
// PropertyPath

/// One step from an owner to a nested property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    Property { index: usize, name: &'static str },
    Element(usize),
}

/// The location of a property below a root owner.
///
/// # Examples
///
/// ```
/// use vc_meta::codec::{PathSegment, PropertyPath};
///
/// let mut path = PropertyPath::new();
/// path.push(PathSegment::Property { index: 2, name: "targets" });
/// path.push(PathSegment::Element(1));
/// path.push(PathSegment::Property { index: 0, name: "entity" });
///
/// assert_eq!(path.to_string(), "targets/Elem[1]/entity");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<PathSegment>,
}

impl PropertyPath {
    #[inline]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match segment {
                PathSegment::Property { name, .. } => f.write_str(name)?,
                PathSegment::Element(index) => write!(f, "{ELEMENT_BLOCK}[{index}]")?,
            }
        }
        Ok(())
    }
}
