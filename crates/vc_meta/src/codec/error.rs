use thiserror::Error;

use crate::codec::PropertyPath;
use crate::document::DocumentError;
use crate::schema::SchemaMismatch;

// -----------------------------------------------------------------------------
// LoadError

/// Errors raised while loading properties from a document.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("cannot load `{path}`: {source}")]
    Document {
        path: PropertyPath,
        source: DocumentError,
    },

    #[error("array `{path}` has a negative element count {count}")]
    InvalidCount { path: PropertyPath, count: i64 },

    #[error(transparent)]
    Schema(#[from] SchemaMismatch),
}
