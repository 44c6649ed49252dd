//! Declarative property metadata for scene objects.
//!
//! Re-exports the workspace crates under short names:
//!
//! - [`meta`]: schemas, the document codec and scene entities.
//! - [`utils`]: hash containers shared by the other crates.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use vc_meta as meta;
pub use vc_utils as utils;
