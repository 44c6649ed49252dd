use crate::document::{Block, DocNode, DocumentError, DocumentReader, NodeKind};
use crate::value::Color;

static EMPTY_BLOCK: Block = Block::new();

// -----------------------------------------------------------------------------
// NodeReader

struct Frame<'a> {
    block: &'a Block,
    // (field position, next element) for each array entered from this block.
    cursors: Vec<(usize, usize)>,
}

impl<'a> Frame<'a> {
    #[inline]
    const fn new(block: &'a Block) -> Self {
        Self {
            block,
            cursors: Vec::new(),
        }
    }

    fn next_element(&mut self, position: usize) -> usize {
        match self.cursors.iter_mut().find(|(pos, _)| *pos == position) {
            Some((_, cursor)) => {
                let current = *cursor;
                *cursor += 1;
                current
            }
            None => {
                self.cursors.push((position, 1));
                0
            }
        }
    }
}

/// A [`DocumentReader`] over a borrowed [`DocNode`] tree.
///
/// A root that is not a block reads as an empty block.
///
/// # Examples
///
/// ```
/// use vc_meta::document::{DocNode, DocumentReader, NodeReader};
///
/// let doc: DocNode = serde_json::from_str(r#"{ "zoom": 2.0, "Elem": [{ "id": 1 }, { "id": 2 }] }"#).unwrap();
/// let mut reader = NodeReader::new(&doc);
///
/// assert_eq!(reader.read_float("zoom"), Ok(Some(2.0)));
/// assert_eq!(reader.read_float("missing"), Ok(None));
///
/// assert!(reader.enter_block("Elem"));
/// assert_eq!(reader.read_int("id"), Ok(Some(1)));
/// reader.leave_block();
/// assert!(reader.enter_block("Elem"));
/// assert_eq!(reader.read_int("id"), Ok(Some(2)));
/// reader.leave_block();
/// assert!(!reader.enter_block("Elem"));
/// ```
pub struct NodeReader<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> NodeReader<'a> {
    pub fn new(root: &'a DocNode) -> Self {
        Self::from_block(root.as_block().unwrap_or(&EMPTY_BLOCK))
    }

    pub fn from_block(root: &'a Block) -> Self {
        Self {
            frames: vec![Frame::new(root)],
        }
    }

    /// Number of blocks entered and not left yet.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    #[inline]
    fn current(&self) -> &'a Block {
        self.frames.last().map_or(&EMPTY_BLOCK, |frame| frame.block)
    }

    // Null fields read as absent.
    #[inline]
    fn field(&self, name: &str) -> Option<&'a DocNode> {
        self.current()
            .get(name)
            .filter(|node| !matches!(node, DocNode::Null))
    }
}

impl DocumentReader for NodeReader<'_> {
    fn enter_block(&mut self, name: &str) -> bool {
        let Some(frame) = self.frames.last_mut() else {
            return false;
        };
        let block = frame.block;
        let Some(position) = block.position(name) else {
            return false;
        };
        let target = match block.get_at(position) {
            Some((_, DocNode::Block(inner))) => Some(inner),
            Some((_, DocNode::Array(items))) => {
                let element = frame.next_element(position);
                items.get(element).and_then(DocNode::as_block)
            }
            _ => None,
        };
        match target {
            Some(inner) => {
                self.frames.push(Frame::new(inner));
                true
            }
            None => false,
        }
    }

    fn leave_block(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        } else {
            log::warn!("`leave_block` called on the document root");
        }
    }

    fn read_bool(&mut self, name: &str) -> Result<Option<bool>, DocumentError> {
        match self.field(name) {
            None => Ok(None),
            Some(DocNode::Bool(value)) => Ok(Some(*value)),
            Some(other) => Err(DocumentError::mismatch(name, NodeKind::Bool, other.kind())),
        }
    }

    fn read_int(&mut self, name: &str) -> Result<Option<i64>, DocumentError> {
        match self.field(name) {
            None => Ok(None),
            Some(DocNode::Int(value)) => Ok(Some(*value)),
            Some(other) => Err(DocumentError::mismatch(name, NodeKind::Int, other.kind())),
        }
    }

    fn read_float(&mut self, name: &str) -> Result<Option<f32>, DocumentError> {
        match self.field(name) {
            None => Ok(None),
            Some(DocNode::Float(value)) => Ok(Some(*value as f32)),
            Some(DocNode::Int(value)) => Ok(Some(*value as f32)),
            Some(other) => Err(DocumentError::mismatch(name, NodeKind::Float, other.kind())),
        }
    }

    fn read_string(&mut self, name: &str) -> Result<Option<String>, DocumentError> {
        match self.field(name) {
            None => Ok(None),
            Some(DocNode::String(value)) => Ok(Some(value.clone())),
            Some(other) => Err(DocumentError::mismatch(name, NodeKind::String, other.kind())),
        }
    }

    fn read_color(&mut self, name: &str) -> Result<Option<Color>, DocumentError> {
        let items = match self.field(name) {
            None => return Ok(None),
            Some(DocNode::Array(items)) => items,
            Some(other) => {
                return Err(DocumentError::mismatch(name, NodeKind::Array, other.kind()));
            }
        };
        if items.len() != 4 {
            return Err(DocumentError::InvalidLength {
                field: name.into(),
                expected: 4,
                found: items.len(),
            });
        }
        let mut rgba = [0.0_f32; 4];
        for (slot, item) in rgba.iter_mut().zip(items) {
            *slot = match item {
                DocNode::Float(value) => *value as f32,
                DocNode::Int(value) => *value as f32,
                other => {
                    return Err(DocumentError::mismatch(name, NodeKind::Float, other.kind()));
                }
            };
        }
        Ok(Some(Color::from_array(rgba)))
    }
}
