//! Bound access to the properties of one owner.
//!
//! ## Menu
//!
//! - [`Binding`]: a schema bound to an owner, from
//!   [`Schema::prepare`](crate::schema::Schema::prepare). Every codec
//!   operation and the editor interface go through it.
//! - [`PropertyRef`] / [`PropertyMut`]: a property value tagged with its kind.
//! - [`RootId`]: identity of the topmost object of a nested traversal.

// -----------------------------------------------------------------------------
// Modules

mod binding;
mod root;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use binding::Binding;
pub use root::RootId;
pub use value::{PropertyMut, PropertyRef};

pub(crate) use value::{property_mut, property_ref};
