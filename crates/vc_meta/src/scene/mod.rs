//! Scene entities and the references between them.
//!
//! ## Menu
//!
//! - [`EntityId`]: the persistent id of an entity, never zero.
//! - [`EntityRef`]: a property referring to another entity. Loaded as an id,
//!   resolved to a weak handle once the whole scene exists.
//! - [`EntityLookup`]: finds entities by id during resolution.
//! - [`Entity`] / [`Scene`]: type-erased objects with their schema.
//! - [`SceneLoad`]: the first phase of a scene load, holding the
//!   [`PendingReferences`] that [`SceneLoad::resolve`] patches.

// -----------------------------------------------------------------------------
// Modules

mod entity;
mod entity_id;
mod entity_ref;
mod error;
mod scene;

// -----------------------------------------------------------------------------
// Exports

pub use entity::{Entity, EntityHandle};
pub use entity_id::EntityId;
pub use entity_ref::{EntityLookup, EntityRef, Resolution};
pub use error::SceneError;
pub use scene::{PendingReferences, Scene, SceneLoad};
