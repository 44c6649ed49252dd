//! Schema storage.
//!
//! ## Menu
//!
//! - [`SchemaRegistry`]: builds each schema once, on first request, and
//!   keeps it for the registry's lifetime.
//! - [`SchemaRegistryArc`]: a registry shared between threads.
//!
//! ## auto_register
//!
//! See [`SchemaRegistry::auto_register`].
//!
//! Types marked `#[properties(auto_register)]` are collected with the
//! [`inventory`] crate. Not every platform supports it; there the call
//! registers nothing and returns `false`.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod schema_registry;

// -----------------------------------------------------------------------------
// Exports

pub use schema_registry::{SchemaRegistry, SchemaRegistryArc};
