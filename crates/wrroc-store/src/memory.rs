use std::collections::HashSet;
use std::sync::RwLock;

use oxrdf::Triple;

use crate::error::{StoreError, StoreResult};
use crate::traits::GraphStore;

#[derive(Default)]
struct Inner {
    order: Vec<Triple>,
    seen: HashSet<Triple>,
}

/// In-memory triple store.
///
/// Triples live behind a `RwLock`; a set guards against duplicates while a
/// vector keeps insertion order.
#[derive(Default)]
pub struct InMemoryGraphStore {
    inner: RwLock<Inner>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every triple.
    pub fn clear(&self) -> StoreResult<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.order.clear();
        inner.seen.clear();
        Ok(())
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> StoreError {
    StoreError::LockPoisoned(err.to_string())
}

impl GraphStore for InMemoryGraphStore {
    fn insert(&self, triple: Triple) -> StoreResult<bool> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        if inner.seen.contains(&triple) {
            return Ok(false);
        }
        inner.seen.insert(triple.clone());
        inner.order.push(triple);
        Ok(true)
    }

    fn contains(&self, triple: &Triple) -> StoreResult<bool> {
        Ok(self.inner.read().map_err(poisoned)?.seen.contains(triple))
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.inner.read().map_err(poisoned)?.order.len())
    }

    fn triples(&self) -> StoreResult<Vec<Triple>> {
        Ok(self.inner.read().map_err(poisoned)?.order.clone())
    }
}
