use crate::document::{Block, DocNode, DocumentError, DocumentWriter};
use crate::value::Color;

// -----------------------------------------------------------------------------
// NodeWriter

enum Frame {
    Block { name: Option<String>, block: Block },
    Array { name: String, items: Vec<DocNode> },
}

/// A [`DocumentWriter`] building a [`DocNode`] tree.
///
/// Misuse, such as writing a field directly into an array, does not panic:
/// the first error is kept and reported by [`finish`](Self::finish).
///
/// # Examples
///
/// ```
/// use vc_meta::document::{DocNode, DocumentWriter, NodeWriter};
///
/// let mut writer = NodeWriter::new();
/// writer.write_int("count", 1);
/// writer.start_array("Elem");
/// writer.start_block(None);
/// writer.write_string("name", "first");
/// writer.finish_block();
/// writer.finish_array();
///
/// let doc = writer.finish().unwrap();
/// assert_eq!(
///     serde_json::to_string(&doc).unwrap(),
///     r#"{"count":1,"Elem":[{"name":"first"}]}"#,
/// );
/// ```
pub struct NodeWriter {
    frames: Vec<Frame>,
    error: Option<DocumentError>,
}

impl Default for NodeWriter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl NodeWriter {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::Block {
                name: None,
                block: Block::new(),
            }],
            error: None,
        }
    }

    /// Returns the written tree, or the first misuse error.
    pub fn finish(mut self) -> Result<DocNode, DocumentError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.frames.len() != 1 {
            return Err(DocumentError::Unbalanced("a block or array was not finished"));
        }
        match self.frames.pop() {
            Some(Frame::Block { block, .. }) => Ok(DocNode::Block(block)),
            _ => Err(DocumentError::Unbalanced("the root is not a block")),
        }
    }

    fn fail(&mut self, reason: &'static str) {
        if self.error.is_none() {
            self.error = Some(DocumentError::Unbalanced(reason));
        }
    }

    fn write(&mut self, name: &str, node: DocNode) {
        if let Some(Frame::Block { block, .. }) = self.frames.last_mut() {
            block.insert(name, node);
            return;
        }
        self.fail("a field was written directly into an array");
    }

    fn attach(&mut self, name: Option<String>, node: DocNode) {
        let reason = match (self.frames.last_mut(), name) {
            (Some(Frame::Block { block, .. }), Some(name)) => {
                block.insert(name, node);
                return;
            }
            (Some(Frame::Array { items, .. }), _) => {
                items.push(node);
                return;
            }
            (Some(Frame::Block { .. }), None) => "an unnamed block was written into a block",
            (None, _) => "the root was closed",
        };
        self.fail(reason);
    }
}

impl DocumentWriter for NodeWriter {
    fn start_block(&mut self, name: Option<&str>) {
        self.frames.push(Frame::Block {
            name: name.map(String::from),
            block: Block::new(),
        });
    }

    fn finish_block(&mut self) {
        if self.frames.len() <= 1 {
            return self.fail("`finish_block` without `start_block`");
        }
        match self.frames.pop() {
            Some(Frame::Block { name, block }) => self.attach(name, DocNode::Block(block)),
            Some(frame) => {
                self.frames.push(frame);
                self.fail("`finish_block` closes an array");
            }
            None => {}
        }
    }

    fn start_array(&mut self, name: &str) {
        self.frames.push(Frame::Array {
            name: name.into(),
            items: Vec::new(),
        });
    }

    fn finish_array(&mut self) {
        match self.frames.pop() {
            Some(Frame::Array { name, items }) => self.attach(Some(name), DocNode::Array(items)),
            Some(frame) => {
                self.frames.push(frame);
                self.fail("`finish_array` closes a block");
            }
            None => {}
        }
    }

    fn write_bool(&mut self, name: &str, value: bool) {
        self.write(name, DocNode::Bool(value));
    }

    fn write_int(&mut self, name: &str, value: i64) {
        self.write(name, DocNode::Int(value));
    }

    fn write_float(&mut self, name: &str, value: f32) {
        self.write(name, DocNode::Float(f64::from(value)));
    }

    fn write_string(&mut self, name: &str, value: &str) {
        self.write(name, DocNode::String(value.into()));
    }

    fn write_color(&mut self, name: &str, value: Color) {
        let items = value
            .to_array()
            .into_iter()
            .map(|c| DocNode::Float(f64::from(c)))
            .collect();
        self.write(name, DocNode::Array(items));
    }
}

#[cfg(test)]
mod tests {
    use crate::document::{DocNode, DocumentError, DocumentWriter, NodeWriter};

    #[test]
    fn nested_blocks() {
        let mut writer = NodeWriter::new();
        writer.start_block(Some("transform"));
        writer.write_float("x", 0.5);
        writer.finish_block();
        let doc = writer.finish().unwrap();
        assert_eq!(
            doc.get("transform").and_then(|t| t.get("x")),
            Some(&DocNode::Float(0.5))
        );
    }

    #[test]
    fn unfinished_block_is_reported() {
        let mut writer = NodeWriter::new();
        writer.start_block(Some("open"));
        assert!(matches!(writer.finish(), Err(DocumentError::Unbalanced(_))));
    }

    #[test]
    fn field_inside_array_is_reported() {
        let mut writer = NodeWriter::new();
        writer.start_array("Elem");
        writer.write_int("oops", 1);
        writer.finish_array();
        assert!(matches!(writer.finish(), Err(DocumentError::Unbalanced(_))));
    }

    #[test]
    fn extra_finish_is_reported() {
        let mut writer = NodeWriter::new();
        writer.finish_block();
        assert!(writer.finish().is_err());
    }
}
