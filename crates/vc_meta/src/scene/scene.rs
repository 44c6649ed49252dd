use core::any::Any;
use std::sync::Arc;

use vc_utils::hash::HashMap;

use crate::access::PropertyMut;
use crate::codec::{DeferredReference, LoadContext, PathSegment, ResolveSummary};
use crate::document::{DocumentReader, DocumentWriter};
use crate::registry::SchemaRegistry;
use crate::scene::{Entity, EntityHandle, EntityId, EntityLookup, Resolution, SceneError};
use crate::schema::{ErasedSchema, Properties, SchemaMismatch};

const COUNT_FIELD: &str = "count";
const ENTITY_BLOCK: &str = "Entity";
const PROPERTIES_BLOCK: &str = "Properties";

// -----------------------------------------------------------------------------
// Scene

/// An ordered set of entities, indexed by uid.
///
/// # Examples
///
/// ```
/// use vc_meta::Properties;
/// use vc_meta::registry::SchemaRegistry;
/// use vc_meta::scene::{EntityRef, Scene};
///
/// #[derive(Properties, Default)]
/// struct Follower {
///     #[property]
///     target: EntityRef,
/// }
///
/// let mut registry = SchemaRegistry::new();
/// let mut scene = Scene::new();
/// let leader = scene.spawn::<Follower>(&mut registry, "leader");
/// let follower = scene.spawn::<Follower>(&mut registry, "follower");
///
/// follower.with_mut(|f: &mut Follower| f.target.set(&leader));
/// let target = follower.with(|f: &Follower| f.target.entity()).flatten();
/// assert_eq!(target.map(|e| e.uid()), Some(leader.uid()));
/// ```
#[derive(Debug, Default)]
pub struct Scene {
    entities: Vec<EntityHandle>,
    by_uid: HashMap<EntityId, EntityHandle>,
    next_uid: u32,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates entities in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &EntityHandle> {
        self.entities.iter()
    }

    #[inline]
    pub fn get(&self, uid: EntityId) -> Option<&EntityHandle> {
        self.by_uid.get(&uid)
    }

    fn allocate_uid(&mut self) -> EntityId {
        loop {
            self.next_uid = self.next_uid.wrapping_add(1);
            if let Some(uid) = EntityId::new(self.next_uid)
                && !self.by_uid.contains_key(&uid)
            {
                return uid;
            }
        }
    }

    /// Creates a `T` holding its declared defaults, under a fresh uid.
    pub fn spawn<T: Properties>(
        &mut self,
        registry: &mut SchemaRegistry,
        name: impl Into<String>,
    ) -> EntityHandle {
        let schema: Arc<dyn ErasedSchema> = registry.schema::<T>();
        self.spawn_erased(schema, name)
    }

    /// Creates an object of the schema's type holding its declared defaults.
    pub fn spawn_erased(
        &mut self,
        schema: Arc<dyn ErasedSchema>,
        name: impl Into<String>,
    ) -> EntityHandle {
        let uid = self.allocate_uid();
        let object = schema.default_instance();
        let entity = Arc::new(Entity::from_parts(uid, name.into(), schema, object));
        self.attach(entity.clone());
        entity
    }

    /// Adds an existing entity.
    pub fn insert(&mut self, entity: Entity) -> Result<EntityHandle, SceneError> {
        let uid = entity.uid();
        if self.by_uid.contains_key(&uid) {
            return Err(SceneError::DuplicateUid(uid));
        }
        let entity = Arc::new(entity);
        self.attach(entity.clone());
        Ok(entity)
    }

    fn attach(&mut self, entity: EntityHandle) {
        self.next_uid = self.next_uid.max(entity.uid().get());
        self.by_uid.insert(entity.uid(), entity.clone());
        self.entities.push(entity);
    }

    /// Removes an entity. References to it then read as empty once the
    /// returned handle is dropped.
    pub fn remove(&mut self, uid: EntityId) -> Option<EntityHandle> {
        let entity = self.by_uid.remove(&uid)?;
        self.entities.retain(|e| e.uid() != uid);
        Some(entity)
    }

    /// Spawns a deep copy of `prototype`.
    ///
    /// The copy starts from its declared defaults, then takes every
    /// same-named property of the prototype.
    pub fn instantiate(
        &mut self,
        prototype: &Entity,
        name: impl Into<String>,
    ) -> Result<EntityHandle, SchemaMismatch> {
        let entity = self.spawn_erased(prototype.schema().clone(), name);
        entity.copy_from(prototype)?;
        Ok(entity)
    }

    /// Writes every entity with its type name, uid and properties.
    pub fn save(&self, writer: &mut dyn DocumentWriter) -> Result<(), SchemaMismatch> {
        writer.write_int(COUNT_FIELD, self.entities.len() as i64);
        writer.start_array(ENTITY_BLOCK);
        for entity in &self.entities {
            writer.start_block(None);
            writer.write_string("type", entity.type_name());
            writer.write_int("uid", i64::from(entity.uid().get()));
            writer.write_string("name", entity.name());
            writer.start_block(Some(PROPERTIES_BLOCK));
            let result = entity.save(writer);
            writer.finish_block();
            writer.finish_block();
            result?;
        }
        writer.finish_array();
        Ok(())
    }

    /// Loads a scene written by [`save`](Self::save).
    ///
    /// Entity references stay unresolved: they are only valid once every
    /// entity exists, see [`SceneLoad::resolve`]. `cx` should not hold
    /// deferred references from an earlier load.
    pub fn load(
        reader: &mut dyn DocumentReader,
        registry: &SchemaRegistry,
        cx: &mut LoadContext<'_>,
    ) -> Result<SceneLoad, SceneError> {
        let count = reader.read_int(COUNT_FIELD)?.unwrap_or(0);
        let count = usize::try_from(count).map_err(|_| SceneError::InvalidCount(count))?;

        let mut scene = Scene::new();
        let mut pending = PendingReferences::default();
        for index in 0..count {
            if !reader.enter_block(ENTITY_BLOCK) {
                log::warn!("scene declares {count} entities, found {index}");
                break;
            }
            let result = load_entity(reader, registry, cx);
            reader.leave_block();
            let entity = result?;
            let uid = entity.uid();
            scene.insert(entity)?;
            pending
                .entries
                .extend(cx.take_deferred().into_iter().map(|r| (uid, r)));
        }
        log::debug!(
            "loaded {} entities, {} references pending",
            scene.len(),
            pending.len()
        );
        Ok(SceneLoad { scene, pending })
    }

    /// Resolves every entity reference of the scene against itself.
    pub fn post_load(&self) -> Result<ResolveSummary, SchemaMismatch> {
        let mut summary = ResolveSummary::default();
        for entity in &self.entities {
            summary.merge(entity.post_load(self)?);
        }
        Ok(summary)
    }
}

impl EntityLookup for Scene {
    #[inline]
    fn find_entity(&self, id: EntityId) -> Option<EntityHandle> {
        self.by_uid.get(&id).cloned()
    }
}

fn load_entity(
    reader: &mut dyn DocumentReader,
    registry: &SchemaRegistry,
    cx: &mut LoadContext<'_>,
) -> Result<Entity, SceneError> {
    let type_name = reader.read_string("type")?.ok_or(SceneError::MissingType)?;
    let Some(schema) = registry.find(&type_name) else {
        return Err(SceneError::UnknownType(type_name));
    };
    let uid = reader
        .read_int("uid")?
        .and_then(|raw| u32::try_from(raw).ok())
        .and_then(EntityId::new)
        .ok_or(SceneError::MissingUid(type_name))?;
    let name = reader.read_string("name")?.unwrap_or_default();

    let object = schema.default_instance();
    let entity = Entity::from_parts(uid, name, schema.clone(), object);
    if reader.enter_block(PROPERTIES_BLOCK) {
        let result = entity.load(reader, cx);
        reader.leave_block();
        result.map_err(|source| SceneError::Load { uid, source })?;
    }
    Ok(entity)
}

// -----------------------------------------------------------------------------
// SceneLoad

/// Entity references recorded while loading, keyed by the owning entity.
#[derive(Debug, Clone, Default)]
pub struct PendingReferences {
    entries: Vec<(EntityId, DeferredReference)>,
}

impl PendingReferences {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &(EntityId, DeferredReference)> {
        self.entries.iter()
    }
}

/// A loaded scene whose entity references are not resolved yet.
#[derive(Debug)]
pub struct SceneLoad {
    pub scene: Scene,
    pub pending: PendingReferences,
}

impl SceneLoad {
    /// Patches every recorded reference now that all entities exist.
    pub fn resolve(self) -> (Scene, ResolveSummary) {
        let SceneLoad { scene, pending } = self;
        let mut summary = ResolveSummary::default();
        for (owner, reference) in pending.entries {
            let Some(entity) = scene.get(owner) else {
                continue;
            };
            let mut object = entity.write();
            let resolution = resolve_path(
                &**entity.schema(),
                &mut **object,
                reference.path.segments(),
                &scene,
            );
            if resolution == Resolution::Unchanged {
                log::debug!("reference `{}` of entity {owner} was not patched", reference.path);
            }
            summary.record(resolution);
        }
        (scene, summary)
    }
}

fn resolve_path(
    schema: &dyn ErasedSchema,
    owner: &mut dyn Any,
    segments: &[PathSegment],
    lookup: &dyn EntityLookup,
) -> Resolution {
    let Some((PathSegment::Property { index, .. }, rest)) = segments.split_first() else {
        return Resolution::Unchanged;
    };
    match (schema.value_mut(owner, *index), rest) {
        (Some(PropertyMut::Entity(link)), []) => link.resolve(lookup),
        (Some(PropertyMut::Array(array)), [PathSegment::Element(element), rest @ ..]) => {
            match array.into_item_mut(*element) {
                Some((schema, item)) => resolve_path(schema, item, rest, lookup),
                None => Resolution::Unchanged,
            }
        }
        _ => Resolution::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::codec::LoadContext;
    use crate::document::{NodeReader, NodeWriter};
    use crate::field;
    use crate::registry::SchemaRegistry;
    use crate::scene::{EntityId, EntityRef, Scene, SceneError};
    use crate::schema::{Properties, SchemaBuilder};
    use crate::value::{AssetCache, Texture, TextureRef};

    #[derive(Default)]
    struct Link {
        target: EntityRef,
    }

    impl Properties for Link {
        fn type_name() -> &'static str {
            "Link"
        }

        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.entity("target", field!(Link, target));
        }
    }

    #[derive(Default)]
    struct Node {
        label: String,
        skin: TextureRef,
        links: Vec<Link>,
    }

    impl Properties for Node {
        fn type_name() -> &'static str {
            "Node"
        }

        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.string("label", field!(Node, label), "node");
            schema.texture("skin", field!(Node, skin));
            schema.array("links", field!(Node, links));
        }
    }

    fn id(raw: u32) -> EntityId {
        EntityId::new(raw).unwrap()
    }

    #[test]
    fn forward_references_resolve_after_load() {
        let doc = serde_json::from_str(
            r#"{
                "count": 2,
                "Entity": [
                    { "type": "Node", "uid": 7, "name": "a", "Properties": {
                        "links": { "count": 1, "Elem": [{ "target": { "uid": 42 } }] }
                    } },
                    { "type": "Node", "uid": 42, "name": "b" }
                ]
            }"#,
        )
        .unwrap();

        let mut registry = SchemaRegistry::new();
        registry.register::<Node>();
        let mut cx = LoadContext::detached();
        let load = Scene::load(&mut NodeReader::new(&doc), &registry, &mut cx).unwrap();
        assert_eq!(load.pending.len(), 1);

        let (scene, summary) = load.resolve();
        assert_eq!(summary.resolved, 1);
        assert!(summary.is_complete());

        let a = scene.get(id(7)).unwrap();
        let target = a.with(|node: &Node| node.links[0].target.entity()).flatten();
        assert_eq!(target.map(|e| e.uid()), Some(id(42)));
        let b = scene.get(id(42)).unwrap();
        assert_eq!(b.with(|node: &Node| node.label.clone()).as_deref(), Some("node"));
    }

    #[test]
    fn post_load_resolves_the_whole_scene() {
        let doc = serde_json::from_str(
            r#"{
                "count": 2,
                "Entity": [
                    { "type": "Node", "uid": 7, "Properties": {
                        "links": { "count": 2, "Elem": [
                            { "target": { "uid": 42 } },
                            { "target": { "uid": 5 } }
                        ] }
                    } },
                    { "type": "Node", "uid": 42 }
                ]
            }"#,
        )
        .unwrap();

        let mut registry = SchemaRegistry::new();
        registry.register::<Node>();
        let mut cx = LoadContext::detached();
        let load = Scene::load(&mut NodeReader::new(&doc), &registry, &mut cx).unwrap();
        let scene = load.scene;

        let summary = scene.post_load().unwrap();
        assert_eq!(summary.resolved, 1);
        assert_eq!(summary.missing, vec![id(5)]);

        let a = scene.get(id(7)).unwrap();
        let target = a.with(|node: &Node| node.links[0].target.entity()).flatten();
        assert_eq!(target.map(|e| e.uid()), Some(id(42)));
        let missing = a.with(|node: &Node| node.links[1].target.entity()).flatten();
        assert!(missing.is_none());

        let again = scene.post_load().unwrap();
        assert_eq!(again.resolved, 0);
        assert!(again.is_complete());
    }

    #[test]
    fn missing_targets_are_reported() {
        let doc = serde_json::from_str(
            r#"{ "count": 1, "Entity": [
                { "type": "Link", "uid": 1, "Properties": { "target": { "uid": 9 } } }
            ] }"#,
        )
        .unwrap();

        let mut registry = SchemaRegistry::new();
        registry.register::<Link>();
        let mut cx = LoadContext::detached();
        let load = Scene::load(&mut NodeReader::new(&doc), &registry, &mut cx).unwrap();
        let (scene, summary) = load.resolve();
        assert_eq!(summary.missing, vec![id(9)]);

        let link = scene.get(id(1)).unwrap();
        assert_eq!(link.with(|l: &Link| l.target.uid()), Some(Some(id(9))));
        assert_eq!(link.with(|l: &Link| l.target.entity().is_none()), Some(true));
    }

    #[test]
    fn load_errors_name_the_entity() {
        let doc = serde_json::from_str(
            r#"{ "count": 2, "Entity": [
                { "type": "Link", "uid": 1 },
                { "type": "Link", "uid": 1 }
            ] }"#,
        )
        .unwrap();
        let mut registry = SchemaRegistry::new();
        registry.register::<Link>();
        let mut cx = LoadContext::detached();
        let result = Scene::load(&mut NodeReader::new(&doc), &registry, &mut cx);
        assert!(matches!(result, Err(SceneError::DuplicateUid(uid)) if uid == id(1)));

        let doc = serde_json::from_str(r#"{ "count": 1, "Entity": [{ "type": "Ghost", "uid": 1 }] }"#)
            .unwrap();
        let result = Scene::load(&mut NodeReader::new(&doc), &registry, &mut cx);
        assert!(matches!(result, Err(SceneError::UnknownType(name)) if name == "Ghost"));
    }

    #[test]
    fn save_then_load_keeps_references() {
        let mut registry = SchemaRegistry::new();
        let mut scene = Scene::new();
        let target = scene.spawn::<Link>(&mut registry, "target");
        let source = scene.spawn::<Link>(&mut registry, "source");
        source.with_mut(|l: &mut Link| l.target.set(&target));

        let mut writer = NodeWriter::new();
        scene.save(&mut writer).unwrap();
        let doc = writer.finish().unwrap();

        let mut cx = LoadContext::detached();
        let load = Scene::load(&mut NodeReader::new(&doc), &registry, &mut cx).unwrap();
        let (loaded, summary) = load.resolve();
        assert_eq!(loaded.len(), 2);
        assert_eq!(summary.resolved, 1);

        let source = loaded.get(source.uid()).unwrap();
        assert_eq!(source.name(), "source");
        let found = source.with(|l: &Link| l.target.entity()).flatten();
        assert_eq!(found.map(|e| e.uid()), Some(target.uid()));
    }

    #[test]
    fn instantiate_copies_deeply() {
        let mut cache = AssetCache::default();
        let texture = cache.insert_texture(Texture {
            path: "stone.png".into(),
            width: 16,
            height: 16,
        });

        let mut registry = SchemaRegistry::new();
        let mut scene = Scene::new();
        let prototype = scene.spawn::<Node>(&mut registry, "prototype");
        prototype.with_mut(|node: &mut Node| {
            node.label = "rock".into();
            node.skin = TextureRef::new(texture.clone());
            node.links = vec![Link::default(), Link::default()];
        });

        let copy = scene.instantiate(&prototype, "copy").unwrap();
        assert_ne!(copy.uid(), prototype.uid());
        copy.with_mut(|node: &mut Node| node.label.push('!'));

        assert_eq!(copy.with(|n: &Node| n.label.clone()).as_deref(), Some("rock!"));
        assert_eq!(prototype.with(|n: &Node| n.label.clone()).as_deref(), Some("rock"));
        assert_eq!(copy.with(|n: &Node| n.links.len()), Some(2));
        // cache + local + prototype + copy
        assert_eq!(Arc::strong_count(&texture), 4);
    }

    #[test]
    fn removed_targets_read_as_empty() {
        let mut registry = SchemaRegistry::new();
        let mut scene = Scene::new();
        let target = scene.spawn::<Link>(&mut registry, "target");
        let source = scene.spawn::<Link>(&mut registry, "source");
        source.with_mut(|l: &mut Link| l.target.set(&target));

        let uid = target.uid();
        drop(target);
        assert!(scene.remove(uid).is_some());

        assert_eq!(source.with(|l: &Link| l.target.entity().is_none()), Some(true));
        assert_eq!(source.with(|l: &Link| l.target.uid()), Some(Some(uid)));
    }
}
