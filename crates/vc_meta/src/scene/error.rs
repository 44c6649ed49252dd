use thiserror::Error;

use crate::codec::LoadError;
use crate::document::DocumentError;
use crate::scene::EntityId;

// -----------------------------------------------------------------------------
// SceneError

/// Errors raised while loading or building a [`Scene`](crate::scene::Scene).
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SceneError {
    #[error("invalid scene document: {0}")]
    Document(#[from] DocumentError),

    #[error("invalid entity count {0}")]
    InvalidCount(i64),

    #[error("an entity has no type")]
    MissingType,

    #[error("no schema is registered for `{0}`")]
    UnknownType(String),

    #[error("an entity of type `{0}` has no valid uid")]
    MissingUid(String),

    #[error("entity {0} appears twice")]
    DuplicateUid(EntityId),

    #[error("cannot load entity {uid}: {source}")]
    Load { uid: EntityId, source: LoadError },
}
