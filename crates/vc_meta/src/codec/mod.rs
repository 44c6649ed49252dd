//! Generic operations over a bound schema.
//!
//! Each operation matches [`Access`](crate::schema::Access) exhaustively and
//! recurses into array elements through their erased schema, passing the
//! root along.
//!
//! ## Menu
//!
//! - `set_defaults`: declared defaults.
//! - `load` / `save`: document codec, see [`LoadContext`] and [`LoadError`].
//! - `copy_from`: by-name copy between instances, possibly of other types.
//! - `post_load`: entity reference resolution, see [`ResolveSummary`].
//! - `take_changed`: the change tracker.
//!
//! These are reached through [`Binding`](crate::access::Binding) or
//! [`ErasedSchema`](crate::schema::ErasedSchema).

// -----------------------------------------------------------------------------
// Modules

mod changes;
mod context;
mod copy;
mod defaults;
mod error;
mod load;
mod path;
mod post_load;
mod save;

// -----------------------------------------------------------------------------
// Exports

pub use context::{DeferredReference, LoadContext, LoadOptions, MismatchPolicy};
pub use error::LoadError;
pub use path::{PathSegment, PropertyPath};
pub use post_load::ResolveSummary;

pub(crate) use changes::take_changed;
pub(crate) use copy::copy_from;
pub(crate) use defaults::set_defaults;
pub(crate) use load::load;
pub(crate) use post_load::post_load;
pub(crate) use save::save;

/// The block name of each array element.
pub const ELEMENT_BLOCK: &str = "Elem";

/// The field holding the element count of an array block.
pub const COUNT_FIELD: &str = "count";

/// The field holding the target id inside an entity reference block.
pub const UID_FIELD: &str = "uid";
