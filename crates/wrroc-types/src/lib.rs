//! Foundation types for WRROC provenance append.
//!
//! This crate provides the document and record types shared by every other
//! crate in the workspace. It holds no merge logic; see `wrroc-merge`.
//!
//! # Key Types
//!
//! - [`Graph`] -- Ordered JSON-LD node set with an id index
//! - [`Node`] -- A single linked-data node keyed by `@id`
//! - [`FileProvenanceRecord`] -- One produced file from a workflow run
//! - [`CrateIdentity`] -- Freshly minted crate UUID and the URLs derived from it

pub mod error;
pub mod graph;
pub mod identity;
pub mod node;
pub mod record;
pub mod vocab;

pub use error::TypeError;
pub use graph::Graph;
pub use identity::CrateIdentity;
pub use node::{id_ref, Node};
pub use record::FileProvenanceRecord;
