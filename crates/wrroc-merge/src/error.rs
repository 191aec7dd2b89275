//! Error types for the merge crate.

use thiserror::Error;
use wrroc_types::TypeError;

/// Errors that can occur while merging provenance into a graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    /// The graph lacks a required singleton node or holds more than one.
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    /// A provenance record lacks a required attribute.
    #[error("provenance record {index} is missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// Several existing nodes share an id that must be patched (strict mode).
    #[error("ambiguous id {id}: {count} nodes share it")]
    DuplicateId { id: String, count: usize },
}

impl From<TypeError> for MergeError {
    fn from(err: TypeError) -> Self {
        MergeError::MalformedGraph(err.to_string())
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T> = Result<T, MergeError>;
