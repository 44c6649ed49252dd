//! Hierarchical named-field documents.
//!
//! The codec only talks to [`DocumentReader`] and [`DocumentWriter`].
//! [`DocNode`] is an in-memory tree implementing both through [`NodeReader`]
//! and [`NodeWriter`]; it implements serde's `Serialize` and `Deserialize`,
//! so any serde format can store it on disk.
//!
//! ## Layout
//!
//! - A block is an ordered set of named fields.
//! - An array is a named list of unnamed blocks. Entering the array's name
//!   repeatedly visits its elements in order.
//! - Colors are arrays of four numbers.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod node;
mod reader;
mod serde;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use error::DocumentError;
pub use node::{Block, DocNode, NodeKind};
pub use reader::NodeReader;
pub use writer::NodeWriter;

use crate::value::Color;

// -----------------------------------------------------------------------------
// Traits

/// Read primitives of a hierarchical document.
///
/// Every `read_*` method returns `Ok(None)` when the field is absent, and an
/// error when it is present with another representation.
pub trait DocumentReader {
    /// Enters the block named `name` in the current block.
    ///
    /// If `name` holds an array, enters its next element instead.
    /// Returns `false` and stays in place if there is nothing to enter.
    fn enter_block(&mut self, name: &str) -> bool;

    /// Returns to the block that was current before the last successful
    /// [`enter_block`](Self::enter_block).
    fn leave_block(&mut self);

    fn read_bool(&mut self, name: &str) -> Result<Option<bool>, DocumentError>;

    fn read_int(&mut self, name: &str) -> Result<Option<i64>, DocumentError>;

    fn read_float(&mut self, name: &str) -> Result<Option<f32>, DocumentError>;

    fn read_string(&mut self, name: &str) -> Result<Option<String>, DocumentError>;

    fn read_color(&mut self, name: &str) -> Result<Option<Color>, DocumentError>;
}

/// Write primitives of a hierarchical document.
pub trait DocumentWriter {
    /// Opens a block. Blocks inside a block are named, blocks inside an
    /// array are not.
    fn start_block(&mut self, name: Option<&str>);

    fn finish_block(&mut self);

    /// Opens a named array inside the current block.
    fn start_array(&mut self, name: &str);

    fn finish_array(&mut self);

    fn write_bool(&mut self, name: &str, value: bool);

    fn write_int(&mut self, name: &str, value: i64);

    fn write_float(&mut self, name: &str, value: f32);

    fn write_string(&mut self, name: &str, value: &str);

    fn write_color(&mut self, name: &str, value: Color);
}
