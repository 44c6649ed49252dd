use core::fmt;
use core::hash::BuildHasher;
use std::sync::{Arc, Weak};

use vc_utils::hash::HashMap;

use crate::scene::{Entity, EntityHandle, EntityId};

// -----------------------------------------------------------------------------
// EntityLookup

/// Finds scene entities by id.
///
/// `()` finds nothing.
pub trait EntityLookup {
    fn find_entity(&self, id: EntityId) -> Option<EntityHandle>;
}

impl EntityLookup for () {
    #[inline]
    fn find_entity(&self, _id: EntityId) -> Option<EntityHandle> {
        None
    }
}

impl<S: BuildHasher> EntityLookup for HashMap<EntityId, EntityHandle, S> {
    #[inline]
    fn find_entity(&self, id: EntityId) -> Option<EntityHandle> {
        self.get(&id).cloned()
    }
}

// -----------------------------------------------------------------------------
// EntityRef

#[derive(Clone, Default)]
enum EntityLink {
    #[default]
    Empty,
    Unresolved(EntityId),
    Resolved(EntityId, Weak<Entity>),
    Missing(EntityId),
}

/// What [`EntityRef::resolve`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The reference was empty or already resolved.
    Unchanged,
    Resolved,
    /// The target is not in the scene; the reference reads as empty.
    Missing(EntityId),
}

/// A reference to another scene entity.
///
/// Load stores the target id only. [`resolve`](Self::resolve) then turns it
/// into a weak handle, once. A handle whose target was destroyed reads as
/// empty and is not looked up again.
///
/// Cloning shares the handle.
#[derive(Clone, Default)]
pub struct EntityRef {
    link: EntityLink,
}

impl EntityRef {
    #[inline]
    pub const fn empty() -> Self {
        Self {
            link: EntityLink::Empty,
        }
    }

    /// A reference to `target` that still needs resolving.
    #[inline]
    pub const fn unresolved(target: EntityId) -> Self {
        Self {
            link: EntityLink::Unresolved(target),
        }
    }

    /// A resolved reference to `entity`.
    #[inline]
    pub fn to(entity: &EntityHandle) -> Self {
        Self {
            link: EntityLink::Resolved(entity.uid(), Arc::downgrade(entity)),
        }
    }

    /// The target id, if any was set or loaded.
    #[inline]
    pub fn uid(&self) -> Option<EntityId> {
        match self.link {
            EntityLink::Empty => None,
            EntityLink::Unresolved(id) | EntityLink::Resolved(id, _) | EntityLink::Missing(id) => {
                Some(id)
            }
        }
    }

    /// The target, if resolved and still alive.
    #[inline]
    pub fn entity(&self) -> Option<EntityHandle> {
        match &self.link {
            EntityLink::Resolved(_, entity) => entity.upgrade(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self.link, EntityLink::Empty)
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        matches!(self.link, EntityLink::Resolved(..))
    }

    /// Resolves a loaded id through `lookup`.
    ///
    /// Only unresolved references are looked up.
    pub fn resolve(&mut self, lookup: &dyn EntityLookup) -> Resolution {
        let EntityLink::Unresolved(id) = self.link else {
            return Resolution::Unchanged;
        };
        match lookup.find_entity(id) {
            Some(entity) => {
                self.link = EntityLink::Resolved(id, Arc::downgrade(&entity));
                Resolution::Resolved
            }
            None => {
                self.link = EntityLink::Missing(id);
                Resolution::Missing(id)
            }
        }
    }

    #[inline]
    pub fn set(&mut self, entity: &EntityHandle) {
        *self = Self::to(entity);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.link = EntityLink::Empty;
    }
}

impl fmt::Debug for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.link {
            EntityLink::Empty => f.write_str("EntityRef(None)"),
            EntityLink::Unresolved(id) => write!(f, "EntityRef({id}, unresolved)"),
            EntityLink::Resolved(id, entity) if entity.strong_count() > 0 => {
                write!(f, "EntityRef({id})")
            }
            EntityLink::Resolved(id, _) => write!(f, "EntityRef({id}, destroyed)"),
            EntityLink::Missing(id) => write!(f, "EntityRef({id}, missing)"),
        }
    }
}
