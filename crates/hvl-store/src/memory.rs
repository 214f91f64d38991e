use std::collections::BTreeMap;
use std::sync::RwLock;

use hvl_types::{ActorId, AssetRecord, SequenceId};

use crate::error::{StoreError, StoreResult};
use crate::traits::{AccessMatrix, RecordStore};

/// In-memory, `BTreeMap`-based record store.
///
/// Intended for tests, demos, and embedding. Records are held behind a
/// `RwLock` and cloned on read. Iteration order follows sequence ids.
pub struct InMemoryRecordStore {
    records: RwLock<BTreeMap<SequenceId, AssetRecord>>,
}

impl InMemoryRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Rebuild a store from `(id, record)` pairs, e.g. a loaded snapshot.
    pub fn from_entries(entries: impl IntoIterator<Item = (SequenceId, AssetRecord)>) -> Self {
        Self {
            records: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// All ids currently present, in increasing order.
    pub fn ids(&self) -> Vec<SequenceId> {
        let map = self.records.read().expect("lock poisoned");
        map.keys().copied().collect()
    }

    /// All `(id, record)` pairs, in increasing id order.
    pub fn entries(&self) -> Vec<(SequenceId, AssetRecord)> {
        let map = self.records.read().expect("lock poisoned");
        map.iter().map(|(id, rec)| (*id, rec.clone())).collect()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn insert(&self, id: SequenceId, record: &AssetRecord) -> StoreResult<()> {
        let mut map = self.records.write().expect("lock poisoned");
        if map.contains_key(&id) {
            return Err(StoreError::DuplicateRecord(id));
        }
        map.insert(id, record.clone());
        Ok(())
    }

    fn get(&self, id: SequenceId) -> Option<AssetRecord> {
        let map = self.records.read().expect("lock poisoned");
        map.get(&id).cloned()
    }

    fn replace(&self, id: SequenceId, record: &AssetRecord) -> StoreResult<()> {
        let mut map = self.records.write().expect("lock poisoned");
        match map.get_mut(&id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(StoreError::RecordNotFound(id)),
        }
    }

    fn remove(&self, id: SequenceId) -> StoreResult<()> {
        let mut map = self.records.write().expect("lock poisoned");
        match map.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::RecordNotFound(id)),
        }
    }

    fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("record_count", &self.len())
            .finish()
    }
}

/// In-memory access matrix.
///
/// Grants are keyed by `(sequence id, accessor)` behind a `RwLock`.
pub struct InMemoryAccessMatrix {
    grants: RwLock<BTreeMap<(SequenceId, ActorId), bool>>,
}

impl InMemoryAccessMatrix {
    /// Create a new empty matrix.
    pub fn new() -> Self {
        Self {
            grants: RwLock::new(BTreeMap::new()),
        }
    }

    /// Rebuild a matrix from `(id, accessor, allowed)` triples.
    pub fn from_entries(entries: impl IntoIterator<Item = (SequenceId, ActorId, bool)>) -> Self {
        Self {
            grants: RwLock::new(
                entries
                    .into_iter()
                    .map(|(id, accessor, allowed)| ((id, accessor), allowed))
                    .collect(),
            ),
        }
    }

    /// All `(id, accessor, allowed)` triples, ordered by id then accessor.
    pub fn entries(&self) -> Vec<(SequenceId, ActorId, bool)> {
        let map = self.grants.read().expect("lock poisoned");
        map.iter()
            .map(|((id, accessor), allowed)| (*id, *accessor, *allowed))
            .collect()
    }

    /// Number of grant entries, stale ones included.
    pub fn len(&self) -> usize {
        self.grants.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no entries exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAccessMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessMatrix for InMemoryAccessMatrix {
    fn grant(&self, id: SequenceId, accessor: &ActorId, allowed: bool) {
        let mut map = self.grants.write().expect("lock poisoned");
        map.insert((id, *accessor), allowed);
    }

    fn check(&self, id: SequenceId, accessor: &ActorId) -> bool {
        let map = self.grants.read().expect("lock poisoned");
        map.get(&(id, *accessor)).copied().unwrap_or(false)
    }

    fn revoke(&self, id: SequenceId, accessor: &ActorId) -> bool {
        let mut map = self.grants.write().expect("lock poisoned");
        map.remove(&(id, *accessor)).is_some()
    }
}

impl std::fmt::Debug for InMemoryAccessMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAccessMatrix")
            .field("entry_count", &self.len())
            .finish()
    }
}
