//! Provenance merge engine for WRROC.
//!
//! Folds the per-file records exported by a workflow run into an RO-Crate
//! metadata graph. Every newly produced file becomes a `File` node plus a
//! `FormalParameter` node, the workflow node's `output` list is rewritten to
//! this run's parameters, and the root dataset's `hasPart` list grows by the
//! new files. Files already described by the crate only get their
//! `dateCreated` and `url` refreshed.
//!
//! The merge is a pure, synchronous transform over a `&mut Graph`: no I/O,
//! no shared state. Callers that need all-or-nothing semantics should merge
//! into a clone; validation failures are detected before any mutation.
//!
//! # Key Types
//!
//! - [`ProvenanceMerger`] -- The three-pass merge (transform, reconcile, patch)
//! - [`MergeOptions`] -- Workflow suffix, root id, and duplicate-id strictness
//! - [`MergeReport`] -- Which ids were added and which were refreshed
//! - [`ProvenanceEntities`] -- The node pair derived from one record

pub mod entity;
pub mod error;
pub mod merger;
pub mod options;
pub mod report;

pub use entity::ProvenanceEntities;
pub use error::{MergeError, MergeResult};
pub use merger::{merge, ProvenanceMerger};
pub use options::MergeOptions;
pub use report::MergeReport;
