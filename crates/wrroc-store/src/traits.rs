use oxrdf::Triple;

use crate::error::StoreResult;

/// Aggregate triple store that merged crates are loaded into.
///
/// Implementations must satisfy these invariants:
/// - A triple is stored at most once; inserting it again is a no-op.
/// - `triples()` returns statements in first-insertion order, so output
///   written from the store is reproducible for the same input sequence.
/// - Concurrent reads are safe.
pub trait GraphStore: Send + Sync {
    /// Insert one triple. Returns `true` if it was not already present.
    fn insert(&self, triple: Triple) -> StoreResult<bool>;

    /// Check whether a triple is present.
    fn contains(&self, triple: &Triple) -> StoreResult<bool>;

    /// Number of distinct triples held.
    fn len(&self) -> StoreResult<usize>;

    /// Snapshot of all triples in insertion order.
    fn triples(&self) -> StoreResult<Vec<Triple>>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Insert many triples and return how many were new.
    ///
    /// Default implementation calls `insert()` for each one.
    fn extend(&self, triples: Vec<Triple>) -> StoreResult<usize> {
        let mut added = 0;
        for triple in triples {
            if self.insert(triple)? {
                added += 1;
            }
        }
        Ok(added)
    }
}
