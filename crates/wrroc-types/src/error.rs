use thiserror::Error;

/// Errors produced while reading documents into typed values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid metadata document: {0}")]
    InvalidDocument(String),

    #[error("node at position {position} is not a JSON object")]
    InvalidNode { position: usize },

    #[error("node at position {position} has no string @id")]
    MissingId { position: usize },

    #[error("serialization error: {0}")]
    Serialization(String),
}
