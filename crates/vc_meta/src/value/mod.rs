//! Value types stored by non-primitive property kinds.
//!
//! ## Menu
//!
//! - [`Color`]: four `f32` components.
//! - [`Transform`]: position, rotation, scale, size and pivot offset.
//! - [`AssetRef`]: a shared handle to a [`Texture`] or an [`AnimGraph`],
//!   resolved by path through an [`AssetCatalog`].

// -----------------------------------------------------------------------------
// Modules

mod asset;
mod color;
mod transform;

// -----------------------------------------------------------------------------
// Exports

pub use asset::{AnimGraph, AnimGraphRef, Asset, AssetCache, AssetCatalog, AssetRef};
pub use asset::{Texture, TextureRef};
pub use color::Color;
pub use transform::Transform;
