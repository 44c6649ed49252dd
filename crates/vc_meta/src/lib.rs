//! Declarative property metadata for scene objects.
//!
//! A type describes its persisted fields once, through [`Properties`].
//! The resulting [`Schema`](schema::Schema) then drives every generic operation:
//!
//! - [`set_defaults`](access::Binding::set_defaults)
//! - [`load`](access::Binding::load) / [`save`](access::Binding::save) against a
//!   [`document`] reader or writer
//! - [`copy_from`](access::Binding::copy_from) another instance, matched by name
//! - [`post_load`](access::Binding::post_load), resolving entity references
//! - [`take_changed`](access::Binding::take_changed), the editor change tracker
//!
//! ## Example
//!
//! ```
//! use vc_meta::Properties;
//! use vc_meta::codec::LoadContext;
//! use vc_meta::document::{NodeReader, NodeWriter};
//! use vc_meta::registry::SchemaRegistry;
//!
//! #[derive(Properties, Default)]
//! struct Camera2D {
//!     #[property(default = 1.0)]
//!     zoom: f32,
//!     #[property(default = "main")]
//!     layer: String,
//! }
//!
//! let mut registry = SchemaRegistry::new();
//! let schema = registry.schema::<Camera2D>();
//!
//! let mut camera = Camera2D::default();
//! schema.prepare(&mut camera).set_defaults();
//! assert_eq!(camera.zoom, 1.0);
//!
//! camera.zoom = 2.5;
//! let mut writer = NodeWriter::new();
//! schema.prepare(&mut camera).save(&mut writer).unwrap();
//! let doc = writer.finish().unwrap();
//!
//! let mut copy = Camera2D::default();
//! let mut cx = LoadContext::detached();
//! schema.prepare(&mut copy).load(&mut NodeReader::new(&doc), &mut cx).unwrap();
//! assert_eq!(copy.zoom, 2.5);
//! assert_eq!(copy.layer, "main");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output names `vc_meta`, which must also resolve inside this crate.
extern crate self as vc_meta;

// -----------------------------------------------------------------------------
// Modules

pub mod access;
pub mod codec;
pub mod document;
pub mod info;
pub mod ops;
pub mod registry;
pub mod scene;
pub mod schema;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use schema::{Properties, PropertyValue};
pub use vc_meta_derive as derive;
pub use vc_meta_derive::Properties;

/// Commonly used items.
pub mod prelude {
    pub use crate::Properties;
    pub use crate::access::{Binding, PropertyMut, PropertyRef, RootId};
    pub use crate::codec::{LoadContext, LoadError};
    pub use crate::document::{DocNode, DocumentReader, DocumentWriter, NodeReader, NodeWriter};
    pub use crate::info::{EnumDescriptor, EnumDomain, PropertyKind};
    pub use crate::registry::SchemaRegistry;
    pub use crate::scene::{EntityId, EntityRef, Scene};
    pub use crate::schema::{Field, Schema, SchemaBuilder};
    pub use crate::value::{AnimGraphRef, Color, TextureRef, Transform};
}
