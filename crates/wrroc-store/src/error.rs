use std::fmt;

/// Errors from graph store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A previous writer panicked while holding the store lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// A node id, key or type does not resolve to a valid IRI.
    #[error("invalid IRI {iri}: {reason}")]
    InvalidIri { iri: String, reason: String },

    /// A literal or blank node label rejected by the RDF model.
    #[error("invalid RDF term: {0}")]
    InvalidTerm(String),

    /// I/O error while serializing or persisting the graph.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

pub(crate) fn invalid_iri(iri: &str, reason: impl fmt::Display) -> StoreError {
    StoreError::InvalidIri {
        iri: iri.to_string(),
        reason: reason.to_string(),
    }
}
