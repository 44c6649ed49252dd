//! Static information shared by property descriptors.
//!
//! ## Menu
//!
//! - [`PropertyKind`]: the closed set of persisted field kinds.
//! - [`AssetKind`]: the asset families an asset reference may point to.
//! - [`EnumDescriptor`] / [`EnumDomain`]: named integer domains of enum properties.
//! - [`StringPool`]: de-duplicated default strings of a schema.
//! - [`Category`]: properties grouped by category name, in first-seen order.

// -----------------------------------------------------------------------------
// Modules

mod category;
mod enum_info;
mod kind;
mod string_pool;

// -----------------------------------------------------------------------------
// Exports

pub use category::Category;
pub use enum_info::{EnumDescriptor, EnumDomain, EnumIndex};
pub use kind::{AssetKind, PropertyKind};
pub use string_pool::{StrIndex, StringPool};

pub(crate) use category::group_categories;
