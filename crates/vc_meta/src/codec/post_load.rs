use crate::access::RootId;
use crate::scene::{EntityId, EntityLookup, Resolution};
use crate::schema::{Access, Schema, SchemaMismatch};

// -----------------------------------------------------------------------------
// ResolveSummary

/// Outcome of resolving entity references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    /// References now pointing to a live entity.
    pub resolved: usize,
    /// Targets that were not found; their references read as empty.
    pub missing: Vec<EntityId>,
}

impl ResolveSummary {
    /// Returns `true` if no target was missing.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Resolved => self.resolved += 1,
            Resolution::Missing(id) => {
                log::debug!("entity {} is not in the scene", id.get());
                self.missing.push(id);
            }
            Resolution::Unchanged => {}
        }
    }

    pub fn merge(&mut self, other: ResolveSummary) {
        self.resolved += other.resolved;
        self.missing.extend(other.missing);
    }
}

/// Resolves every unresolved entity reference, recursing into arrays.
pub(crate) fn post_load<T: 'static>(
    schema: &Schema<T>,
    owner: &mut T,
    root: RootId,
    lookup: &dyn EntityLookup,
    summary: &mut ResolveSummary,
) -> Result<(), SchemaMismatch> {
    for descriptor in schema.iter() {
        match descriptor.access() {
            Access::Entity { field } => summary.record(field.get_mut(owner).resolve(lookup)),
            Access::Array { adapter } => {
                let schema = adapter.element_schema();
                for index in 0..adapter.len(owner) {
                    if let Some(item) = adapter.item_mut(owner, index) {
                        schema.post_load(item, root, lookup, summary)?;
                    }
                }
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use vc_utils::hash::HashMap;

    use crate::field;
    use crate::registry::SchemaRegistry;
    use crate::scene::{EntityHandle, EntityId, EntityRef, Scene};
    use crate::schema::{Properties, SchemaBuilder};

    #[derive(Default)]
    struct Slot {
        link: EntityRef,
    }

    impl Properties for Slot {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.entity("link", field!(Slot, link));
        }
    }

    #[derive(Default)]
    struct Rack {
        slots: Vec<Slot>,
    }

    impl Properties for Rack {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.array("slots", field!(Rack, slots));
        }
    }

    #[test]
    fn resolves_inside_array_elements() {
        let mut registry = SchemaRegistry::new();
        let mut scene = Scene::new();
        let target = scene.spawn::<Slot>(&mut registry, "target");
        let mut lookup: HashMap<EntityId, EntityHandle> = HashMap::default();
        lookup.insert(target.uid(), target.clone());

        let absent = EntityId::new(99).unwrap();
        let mut rack = Rack {
            slots: vec![
                Slot {
                    link: EntityRef::unresolved(target.uid()),
                },
                Slot {
                    link: EntityRef::unresolved(absent),
                },
                Slot::default(),
            ],
        };

        let schema = registry.schema::<Rack>();
        let summary = schema.prepare(&mut rack).post_load(&lookup).unwrap();
        assert_eq!(summary.resolved, 1);
        assert_eq!(summary.missing, vec![absent]);
        assert!(!summary.is_complete());

        let found = rack.slots[0].link.entity().map(|e| e.uid());
        assert_eq!(found, Some(target.uid()));
        assert!(rack.slots[1].link.entity().is_none());
        assert!(rack.slots[2].link.is_empty());

        // Resolution is one-shot.
        let again = schema.prepare(&mut rack).post_load(&lookup).unwrap();
        assert_eq!(again.resolved, 0);
        assert!(again.is_complete());
    }
}
