//! Per-type property schemas.
//!
//! ## Menu
//!
//! - [`Properties`]: implemented by types that declare persisted fields,
//!   usually through `#[derive(Properties)]`.
//! - [`SchemaBuilder`]: receives the declarations, in order.
//! - [`Schema`]: the frozen, ordered descriptor table of one type.
//! - [`PropertyDescriptor`] / [`Access`]: one declared field and its kind payload.
//! - [`Field`]: a pair of accessor functions selecting one field of an owner.
//! - [`ErasedSchema`]: object-safe access to a schema whose owner type is not
//!   statically known, such as array elements and scene entities.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod descriptor;
mod erased;
mod field;
mod properties;
mod schema;

// -----------------------------------------------------------------------------
// Exports

pub use builder::{PropertyHandle, SchemaBuilder};
pub use descriptor::{Access, DefaultValue, PropertyDescriptor, PropertyInfo};
pub use erased::{ErasedSchema, SchemaMismatch};
pub use field::Field;
pub use properties::{Properties, PropertyValue};
pub use schema::Schema;
