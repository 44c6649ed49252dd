//! Collections of sub-objects.
//!
//! ## Menu
//!
//! - [`Elements`]: a resizable sequence of elements, seen as `dyn Any`.
//! - [`CollectionAdapter`]: selects the sequence inside an owner and knows
//!   the element schema. The owner is passed on every call.
//! - [`VecAdapter`]: the adapter of a `Vec<E>` field.
//! - [`ArrayRef`] / [`ArrayMut`]: a bound collection, as returned by
//!   [`PropertyRef::Array`](crate::access::PropertyRef::Array) and
//!   [`PropertyMut::Array`](crate::access::PropertyMut::Array).

// -----------------------------------------------------------------------------
// Modules

mod adapter;
mod array;
mod elements;

// -----------------------------------------------------------------------------
// Exports

pub use adapter::{CollectionAdapter, VecAdapter};
pub(crate) use adapter::{ElementSchema, SchemaSlot};
pub use array::{ArrayMut, ArrayRef};
pub use elements::Elements;
