use thiserror::Error;

use crate::document::NodeKind;

// -----------------------------------------------------------------------------
// DocumentError

/// Errors raised by document readers and writers.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("field `{field}` holds {found}, expected {expected}")]
    TypeMismatch {
        field: String,
        expected: NodeKind,
        found: NodeKind,
    },

    #[error("field `{field}` holds {value}, which is out of range")]
    OutOfRange { field: String, value: i64 },

    #[error("field `{field}` holds {found} components, expected {expected}")]
    InvalidLength {
        field: String,
        expected: usize,
        found: usize,
    },

    #[error("unbalanced document writer: {0}")]
    Unbalanced(&'static str),
}

impl DocumentError {
    #[inline]
    pub(crate) fn mismatch(field: &str, expected: NodeKind, found: NodeKind) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            found,
        }
    }

    #[inline]
    pub(crate) fn out_of_range(field: &str, value: i64) -> Self {
        Self::OutOfRange {
            field: field.into(),
            value,
        }
    }
}
