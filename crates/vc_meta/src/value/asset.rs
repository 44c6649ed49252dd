use core::fmt;
use std::sync::Arc;

use vc_utils::hash::HashMap;

use crate::document::{DocumentError, DocumentReader, DocumentWriter};
use crate::info::AssetKind;

// -----------------------------------------------------------------------------
// Asset

/// A shared asset that properties can refer to by path.
pub trait Asset: Send + Sync + 'static {
    const KIND: AssetKind;

    /// The path the asset was loaded from, used as its saved value.
    fn path(&self) -> &str;

    /// Resolves `path` through `catalog`.
    fn fetch(catalog: &dyn AssetCatalog, path: &str) -> Option<Arc<Self>>;
}

/// Texture metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

impl Asset for Texture {
    const KIND: AssetKind = AssetKind::Texture;

    #[inline]
    fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    fn fetch(catalog: &dyn AssetCatalog, path: &str) -> Option<Arc<Self>> {
        catalog.texture(path)
    }
}

/// Animation graph metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimGraph {
    pub path: String,
    /// Node names of the graph, in declaration order.
    pub nodes: Vec<String>,
}

impl Asset for AnimGraph {
    const KIND: AssetKind = AssetKind::AnimGraph;

    #[inline]
    fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    fn fetch(catalog: &dyn AssetCatalog, path: &str) -> Option<Arc<Self>> {
        catalog.anim_graph(path)
    }
}

// -----------------------------------------------------------------------------
// AssetCatalog

/// Resolves asset paths to shared assets during load.
///
/// `()` is a catalog where nothing exists.
pub trait AssetCatalog {
    fn texture(&self, path: &str) -> Option<Arc<Texture>>;

    fn anim_graph(&self, path: &str) -> Option<Arc<AnimGraph>>;
}

impl AssetCatalog for () {
    #[inline]
    fn texture(&self, _path: &str) -> Option<Arc<Texture>> {
        None
    }

    #[inline]
    fn anim_graph(&self, _path: &str) -> Option<Arc<AnimGraph>> {
        None
    }
}

/// An [`AssetCatalog`] keeping assets by path.
///
/// # Examples
///
/// ```
/// use vc_meta::value::{AssetCache, AssetCatalog, Texture};
///
/// let mut cache = AssetCache::default();
/// cache.insert_texture(Texture { path: "hero.png".into(), width: 32, height: 32 });
///
/// assert_eq!(cache.texture("hero.png").map(|t| t.width), Some(32));
/// assert!(cache.texture("villain.png").is_none());
/// ```
#[derive(Default)]
pub struct AssetCache {
    textures: HashMap<String, Arc<Texture>>,
    anim_graphs: HashMap<String, Arc<AnimGraph>>,
}

impl AssetCache {
    /// Stores a texture under its path, replacing any previous one.
    pub fn insert_texture(&mut self, texture: Texture) -> Arc<Texture> {
        let texture = Arc::new(texture);
        self.textures.insert(texture.path.clone(), texture.clone());
        texture
    }

    /// Stores an animation graph under its path, replacing any previous one.
    pub fn insert_anim_graph(&mut self, graph: AnimGraph) -> Arc<AnimGraph> {
        let graph = Arc::new(graph);
        self.anim_graphs.insert(graph.path.clone(), graph.clone());
        graph
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len() + self.anim_graphs.len()
    }
}

impl AssetCatalog for AssetCache {
    #[inline]
    fn texture(&self, path: &str) -> Option<Arc<Texture>> {
        self.textures.get(path).cloned()
    }

    #[inline]
    fn anim_graph(&self, path: &str) -> Option<Arc<AnimGraph>> {
        self.anim_graphs.get(path).cloned()
    }
}

// -----------------------------------------------------------------------------
// AssetRef

/// A reference-counted handle to an asset, or nothing.
///
/// Cloning shares the asset; [`release`](Self::release) drops this handle.
pub struct AssetRef<A: Asset> {
    handle: Option<Arc<A>>,
}

pub type TextureRef = AssetRef<Texture>;
pub type AnimGraphRef = AssetRef<AnimGraph>;

impl<A: Asset> AssetRef<A> {
    #[inline]
    pub const fn empty() -> Self {
        Self { handle: None }
    }

    #[inline]
    pub fn new(asset: Arc<A>) -> Self {
        Self {
            handle: Some(asset),
        }
    }

    #[inline]
    pub fn get(&self) -> Option<&Arc<A>> {
        self.handle.as_ref()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }

    #[inline]
    pub fn path(&self) -> Option<&str> {
        self.handle.as_deref().map(A::path)
    }

    /// Drops this handle.
    #[inline]
    pub fn release(&mut self) {
        self.handle = None;
    }

    /// Returns `true` if both handles share the same asset.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.handle, &other.handle) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Reads the path stored in the field `name` and resolves it.
    ///
    /// An absent field keeps the handle, an empty path releases it.
    /// A path the catalog does not know also releases it, with a warning.
    pub fn load_data(
        &mut self,
        reader: &mut dyn DocumentReader,
        name: &str,
        catalog: &dyn AssetCatalog,
    ) -> Result<(), DocumentError> {
        let Some(path) = reader.read_string(name)? else {
            return Ok(());
        };
        if path.is_empty() {
            self.release();
            return Ok(());
        }
        self.handle = A::fetch(catalog, &path);
        if self.handle.is_none() {
            log::warn!("{} `{path}` of field `{name}` was not found", A::KIND.name());
        }
        Ok(())
    }

    /// Writes the asset path, or an empty string, into the field `name`.
    pub fn save_data(&self, writer: &mut dyn DocumentWriter, name: &str) {
        writer.write_string(name, self.path().unwrap_or(""));
    }
}

impl<A: Asset> Clone for AssetRef<A> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            handle: self.handle.clone(),
        }
    }
}

impl<A: Asset> Default for AssetRef<A> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<A: Asset> fmt::Debug for AssetRef<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}({path:?})", A::KIND.name()),
            None => write!(f, "{}(None)", A::KIND.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{AssetCache, Texture, TextureRef};
    use crate::document::{DocNode, NodeReader, NodeWriter};

    fn cache() -> AssetCache {
        let mut cache = AssetCache::default();
        cache.insert_texture(Texture {
            path: "tiles.png".into(),
            width: 128,
            height: 64,
        });
        cache
    }

    #[test]
    fn clone_shares_the_asset() {
        let cache = cache();
        let mut a = TextureRef::empty();
        let doc: DocNode = serde_json::from_str(r#"{ "tex": "tiles.png" }"#).unwrap();
        a.load_data(&mut NodeReader::new(&doc), "tex", &cache).unwrap();

        let b = a.clone();
        assert!(a.ptr_eq(&b));
        // cache + a + b
        assert_eq!(a.get().map(Arc::strong_count), Some(3));

        a.release();
        assert!(a.is_empty());
        assert_eq!(b.get().map(Arc::strong_count), Some(2));
    }

    #[test]
    fn save_then_load_by_path() {
        let cache = cache();
        let source = TextureRef::new(cache.texture_arc("tiles.png"));
        let mut writer = NodeWriter::new();
        source.save_data(&mut writer, "tex");
        let doc = writer.finish().unwrap();
        assert_eq!(doc.get("tex"), Some(&DocNode::String("tiles.png".into())));

        let mut target = TextureRef::empty();
        target.load_data(&mut NodeReader::new(&doc), "tex", &cache).unwrap();
        assert!(target.ptr_eq(&source));
    }

    #[test]
    fn unknown_or_empty_path_releases() {
        let cache = cache();
        let mut target = TextureRef::new(cache.texture_arc("tiles.png"));
        let doc: DocNode = serde_json::from_str(r#"{ "a": "", "b": "missing.png" }"#).unwrap();

        target.load_data(&mut NodeReader::new(&doc), "absent", &cache).unwrap();
        assert!(!target.is_empty());
        target.load_data(&mut NodeReader::new(&doc), "a", &cache).unwrap();
        assert!(target.is_empty());

        target = TextureRef::new(cache.texture_arc("tiles.png"));
        target.load_data(&mut NodeReader::new(&doc), "b", &cache).unwrap();
        assert!(target.is_empty());
    }

    impl AssetCache {
        fn texture_arc(&self, path: &str) -> Arc<Texture> {
            use super::AssetCatalog;
            self.texture(path).unwrap()
        }
    }
}
