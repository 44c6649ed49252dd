use core::any::{Any, TypeId};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vc_utils::TypeIdMap;
use vc_utils::hash::{HashMap, HashSet};

use crate::ops::{ElementSchema, SchemaSlot};
use crate::schema::{ErasedSchema, Properties, Schema, SchemaBuilder};

// -----------------------------------------------------------------------------
// SchemaRegistry

struct SchemaEntry {
    typed: Arc<dyn Any + Send + Sync>,
    erased: Arc<dyn ErasedSchema>,
}

/// The schemas of every type used so far.
///
/// A schema is built the first time it is requested, by running
/// [`Properties::declare`], and shared afterwards. Element schemas of array
/// properties are built along with their owner. An array of a type whose
/// schema is still being built, as in `struct Node { children: Vec<Node> }`,
/// receives that schema when its build ends.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_meta::Properties;
/// use vc_meta::registry::SchemaRegistry;
///
/// #[derive(Properties, Default)]
/// struct Marker {
///     #[property]
///     visible: bool,
/// }
///
/// let mut registry = SchemaRegistry::new();
/// let a = registry.schema::<Marker>();
/// let b = registry.schema::<Marker>();
///
/// assert!(Arc::ptr_eq(&a, &b));
/// assert!(registry.get_with_type_name("Marker").is_some());
/// ```
pub struct SchemaRegistry {
    schemas: TypeIdMap<SchemaEntry>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
    building: Vec<(TypeId, &'static str)>,
    pending: Vec<(TypeId, Box<dyn Any + Send + Sync>)>,
    auto_registered: bool,
}

impl Default for SchemaRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            schemas: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
            building: Vec::new(),
            pending: Vec::new(),
            auto_registered: false,
        }
    }

    /// Returns the schema of `T`, building it on first use.
    ///
    /// # Panics
    ///
    /// Panics if `T` is being built and its declaration asks for its own
    /// schema directly. Arrays of `T` are accepted, see
    /// [`SchemaBuilder::array`].
    pub fn schema<T: Properties>(&mut self) -> Arc<Schema<T>> {
        if let Some(schema) = self.get::<T>() {
            return schema;
        }
        let type_id = TypeId::of::<T>();
        if self.building.iter().any(|(id, _)| *id == type_id) {
            let chain: Vec<&str> = self.building.iter().map(|(_, name)| *name).collect();
            panic!(
                "the schema of `{}` depends on itself: {} -> {}",
                T::type_name(),
                chain.join(" -> "),
                T::type_name(),
            );
        }

        self.building.push((type_id, T::type_name()));
        let mut builder = SchemaBuilder::<T>::new(self, T::type_name());
        T::declare(&mut builder);
        let schema = Arc::new(builder.build());
        self.building.pop();
        self.fill_pending(&schema);

        log::trace!(
            "built the schema of `{}` with {} properties",
            schema.type_name(),
            schema.len()
        );
        self.insert(type_id, schema.clone());
        schema
    }

    /// Builds the schema of `T` if needed.
    ///
    /// Returns `false` if it already existed.
    #[inline]
    pub fn register<T: Properties>(&mut self) -> bool {
        let existed = self.contains_type::<T>();
        self.schema::<T>();
        !existed
    }

    /// The element schema of an array of `E`, deferred while `E` is being
    /// built.
    pub(crate) fn element_schema<E: Properties>(&mut self) -> ElementSchema<E> {
        let type_id = TypeId::of::<E>();
        if !self.building.iter().any(|(id, _)| *id == type_id) {
            return ElementSchema::Ready(self.schema::<E>());
        }
        log::trace!("deferring the element schema of `{}`", E::type_name());
        let slot: SchemaSlot<E> = Arc::new(OnceLock::new());
        self.pending.push((type_id, Box::new(slot.clone())));
        ElementSchema::deferred(slot)
    }

    fn fill_pending<T: Properties>(&mut self, schema: &Arc<Schema<T>>) {
        let type_id = TypeId::of::<T>();
        let (ready, rest): (Vec<_>, Vec<_>) = core::mem::take(&mut self.pending)
            .into_iter()
            .partition(|(id, _)| *id == type_id);
        self.pending = rest;
        for (_, slot) in ready {
            if let Ok(slot) = slot.downcast::<SchemaSlot<T>>() {
                slot.get_or_init(|| schema.clone());
            }
        }
    }

    fn insert<T: Properties>(&mut self, type_id: TypeId, schema: Arc<Schema<T>>) {
        let type_path = schema.type_name();
        let type_name = short_name(type_path);
        let entry = SchemaEntry {
            typed: schema.clone(),
            erased: schema,
        };
        self.schemas.insert(type_id, entry);

        if !self.ambiguous_names.contains(type_name) {
            if self.type_name_to_id.contains_key(type_name) {
                log::warn!("type name `{type_name}` is ambiguous, use the full name instead");
                self.type_name_to_id.remove(type_name);
                self.ambiguous_names.insert(type_name);
            } else {
                self.type_name_to_id.insert(type_name, type_id);
            }
        }
        self.type_path_to_id.insert(type_path, type_id);
    }

    /// Returns the schema of `T` if it was built already.
    pub fn get<T: Properties>(&self) -> Option<Arc<Schema<T>>> {
        let entry = self.schemas.get_type::<T>()?;
        entry.typed.clone().downcast::<Schema<T>>().ok()
    }

    #[inline]
    pub fn get_erased(&self, type_id: TypeId) -> Option<&Arc<dyn ErasedSchema>> {
        self.schemas.get(&type_id).map(|entry| &entry.erased)
    }

    /// Returns the schema declared with exactly `type_path` as its name.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&Arc<dyn ErasedSchema>> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get_erased(*id),
            None => None,
        }
    }

    /// Returns the schema whose name ends with `type_name`, without the
    /// module path.
    ///
    /// Ambiguous names return `None`.
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&Arc<dyn ErasedSchema>> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get_erased(*id),
            None => None,
        }
    }

    /// Looks `name` up as a full name first, then as a short name.
    #[inline]
    pub fn find(&self, name: &str) -> Option<&Arc<dyn ErasedSchema>> {
        self.get_with_type_path(name)
            .or_else(|| self.get_with_type_name(name))
    }

    /// Returns `true` if several registered types share the short name.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.schemas.contains(&type_id)
    }

    #[inline]
    pub fn contains_type<T: 'static>(&self) -> bool {
        self.schemas.contains_type::<T>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates the built schemas, in no particular order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Arc<dyn ErasedSchema>> {
        self.schemas.values().map(|entry| &entry.erased)
    }

    /// Registers every type marked `#[properties(auto_register)]`.
    ///
    /// Returns `true` if automatic registration works on this platform.
    /// Later calls are cheap and return the same result.
    ///
    /// Requires the `auto_register` feature, otherwise always returns `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use vc_meta::Properties;
    /// use vc_meta::registry::SchemaRegistry;
    ///
    /// #[derive(Properties, Default)]
    /// #[properties(auto_register)]
    /// struct Spawner {
    ///     #[property(default = 1)]
    ///     count: i32,
    /// }
    ///
    /// let mut registry = SchemaRegistry::new();
    /// assert!(registry.auto_register());
    /// assert!(registry.contains_type::<Spawner>());
    /// ```
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> bool {
        if !self.auto_registered {
            self.auto_registered = crate::__macro_exports::auto_register::register_types(self);
        }
        self.auto_registered
    }

    /// Registers every type marked `#[properties(auto_register)]`.
    ///
    /// Always `false`: the `auto_register` feature is disabled.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        self.auto_registered
    }
}

// `a::b::Name<c::D>` -> `Name<c::D>`
fn short_name(type_path: &'static str) -> &'static str {
    let generics = type_path.find('<').unwrap_or(type_path.len());
    let start = type_path[..generics].rfind("::").map_or(0, |i| i + 2);
    &type_path[start..]
}

// -----------------------------------------------------------------------------
// SchemaRegistryArc

/// A [`SchemaRegistry`] shared behind a lock.
#[derive(Clone, Default)]
pub struct SchemaRegistryArc {
    pub internal: Arc<RwLock<SchemaRegistry>>,
}

impl SchemaRegistryArc {
    /// Takes a read lock on the underlying [`SchemaRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, SchemaRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`SchemaRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, SchemaRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::{SchemaRegistry, short_name};
    use crate::field;
    use crate::schema::{Properties, SchemaBuilder};

    #[test]
    fn short_names() {
        assert_eq!(short_name("Plain"), "Plain");
        assert_eq!(short_name("a::b::Name"), "Name");
        assert_eq!(short_name("a::Name<b::C>"), "Name<b::C>");
    }

    mod first {
        #[derive(Default)]
        pub struct Tile {
            pub solid: bool,
        }
    }

    mod second {
        #[derive(Default)]
        pub struct Tile {
            pub solid: bool,
        }
    }

    impl Properties for first::Tile {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.boolean("solid", field!(first::Tile, solid), true);
        }
    }

    impl Properties for second::Tile {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.boolean("solid", field!(second::Tile, solid), false);
        }
    }

    #[test]
    fn ambiguous_short_names() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.register::<first::Tile>());
        assert!(!registry.register::<first::Tile>());
        assert!(registry.get_with_type_name("Tile").is_some());

        registry.register::<second::Tile>();
        assert!(registry.is_ambiguous("Tile"));
        assert!(registry.get_with_type_name("Tile").is_none());
        assert!(registry.find(core::any::type_name::<second::Tile>()).is_some());
        assert_eq!(registry.len(), 2);
    }

    #[derive(Default)]
    struct Node {
        weight: f32,
        children: Vec<Node>,
    }

    impl Properties for Node {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.float("weight", field!(Node, weight), 1.0);
            schema.array("children", field!(Node, children));
        }
    }

    #[test]
    fn recursive_element_schema() {
        let mut registry = SchemaRegistry::new();
        let schema = registry.schema::<Node>();
        assert_eq!(registry.len(), 1);

        let adapter = schema.get(1).and_then(|p| p.adapter()).unwrap();
        assert_eq!(adapter.element_schema().type_name(), schema.type_name());
        assert_eq!(adapter.element_schema().len(), 2);

        let mut root = Node::default();
        let mut binding = schema.prepare(&mut root);
        assert_eq!(binding.push_element(1), Some(0));
        assert!(binding.take_changed());
        assert!(!binding.take_changed());
        assert_eq!(root.children[0].weight, 1.0);
    }

    #[derive(Default)]
    struct Branch {
        leaves: Vec<Leaf>,
    }

    #[derive(Default)]
    struct Leaf {
        size: i32,
        branches: Vec<Branch>,
    }

    impl Properties for Branch {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.array("leaves", field!(Branch, leaves));
        }
    }

    impl Properties for Leaf {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.integer("size", field!(Leaf, size), 3);
            schema.array("branches", field!(Leaf, branches));
        }
    }

    #[test]
    fn mutually_recursive_element_schemas() {
        let mut registry = SchemaRegistry::new();
        let branch = registry.schema::<Branch>();
        let leaf = registry.get::<Leaf>().unwrap();

        let to_leaf = branch.get(0).and_then(|p| p.adapter()).unwrap();
        let to_branch = leaf.get(1).and_then(|p| p.adapter()).unwrap();
        assert_eq!(to_leaf.element_schema().len(), 2);
        assert_eq!(to_branch.element_schema().len(), 1);
        assert_eq!(to_branch.element_schema().type_name(), branch.type_name());
    }

    #[derive(Default)]
    struct Selfish;

    impl Properties for Selfish {
        fn declare(schema: &mut SchemaBuilder<'_, Self>) {
            schema.registry().schema::<Selfish>();
        }
    }

    #[test]
    #[should_panic(expected = "depends on itself")]
    fn direct_self_request_panics() {
        SchemaRegistry::new().schema::<Selfish>();
    }
}
