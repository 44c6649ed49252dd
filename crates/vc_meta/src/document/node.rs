use core::fmt;

// -----------------------------------------------------------------------------
// NodeKind

/// The representation of a [`DocNode`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Array,
    Block,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "a boolean",
            NodeKind::Int => "an integer",
            NodeKind::Float => "a float",
            NodeKind::String => "a string",
            NodeKind::Array => "an array",
            NodeKind::Block => "a block",
        })
    }
}

// -----------------------------------------------------------------------------
// DocNode

/// One value of an in-memory document.
///
/// # Examples
///
/// ```
/// use vc_meta::document::{Block, DocNode};
///
/// let mut block = Block::new();
/// block.insert("zoom", DocNode::Float(1.5));
/// let doc = DocNode::Block(block);
///
/// assert_eq!(doc.get("zoom"), Some(&DocNode::Float(1.5)));
/// assert_eq!(doc.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DocNode {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<DocNode>),
    Block(Block),
}

impl DocNode {
    pub const fn kind(&self) -> NodeKind {
        match self {
            DocNode::Null => NodeKind::Null,
            DocNode::Bool(_) => NodeKind::Bool,
            DocNode::Int(_) => NodeKind::Int,
            DocNode::Float(_) => NodeKind::Float,
            DocNode::String(_) => NodeKind::String,
            DocNode::Array(_) => NodeKind::Array,
            DocNode::Block(_) => NodeKind::Block,
        }
    }

    #[inline]
    pub const fn as_block(&self) -> Option<&Block> {
        match self {
            DocNode::Block(block) => Some(block),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[DocNode]> {
        match self {
            DocNode::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the field `name` if `self` is a block.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&DocNode> {
        self.as_block().and_then(|block| block.get(name))
    }

    /// Returns the field `name` if `self` is a block.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut DocNode> {
        match self {
            DocNode::Block(block) => block.get_mut(name),
            _ => None,
        }
    }
}

impl From<Block> for DocNode {
    #[inline]
    fn from(value: Block) -> Self {
        DocNode::Block(value)
    }
}

// -----------------------------------------------------------------------------
// Block

/// An ordered set of named fields.
///
/// Field order is the order of first insertion, so saved documents follow
/// property declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    entries: Vec<(String, DocNode)>,
}

impl Block {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the position of the field `name`.
    #[inline]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(key, _)| key == name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&DocNode> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut DocNode> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    /// Returns the field stored at `position`.
    #[inline]
    pub fn get_at(&self, position: usize) -> Option<(&str, &DocNode)> {
        self.entries
            .get(position)
            .map(|(key, node)| (key.as_str(), node))
    }

    /// Sets the field `name`, keeping its position if it already exists.
    ///
    /// Returns the previous value.
    pub fn insert(&mut self, name: impl Into<String>, node: DocNode) -> Option<DocNode> {
        let name = name.into();
        match self.get_mut(&name) {
            Some(slot) => Some(core::mem::replace(slot, node)),
            None => {
                self.entries.push((name, node));
                None
            }
        }
    }

    /// Removes the field `name`, shifting later fields.
    pub fn remove(&mut self, name: &str) -> Option<DocNode> {
        let position = self.position(name)?;
        Some(self.entries.remove(position).1)
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &DocNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }
}

impl<K: Into<String>> FromIterator<(K, DocNode)> for Block {
    fn from_iter<I: IntoIterator<Item = (K, DocNode)>>(iter: I) -> Self {
        let mut block = Block::new();
        for (key, node) in iter {
            block.insert(key, node);
        }
        block
    }
}

#[cfg(test)]
mod tests {
    use super::{Block, DocNode, NodeKind};

    #[test]
    fn insert_keeps_first_position() {
        let mut block = Block::new();
        block.insert("a", DocNode::Int(1));
        block.insert("b", DocNode::Int(2));
        assert_eq!(block.insert("a", DocNode::Int(3)), Some(DocNode::Int(1)));

        let keys: Vec<_> = block.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(block.get("a"), Some(&DocNode::Int(3)));
    }

    #[test]
    fn remove_shifts_fields() {
        let mut block: Block = [("a", DocNode::Null), ("b", DocNode::Bool(true))]
            .into_iter()
            .collect();
        assert_eq!(block.remove("a"), Some(DocNode::Null));
        assert_eq!(block.position("b"), Some(0));
        assert_eq!(block.remove("a"), None);
    }

    #[test]
    fn kind_of_nested_values() {
        let doc = DocNode::Block([("items", DocNode::Array(vec![]))].into_iter().collect());
        assert_eq!(doc.kind(), NodeKind::Block);
        assert_eq!(doc.get("items").map(DocNode::kind), Some(NodeKind::Array));
        assert!(DocNode::Float(0.5).as_block().is_none());
    }
}
