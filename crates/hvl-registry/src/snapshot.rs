//! Serializable full-state snapshots.
//!
//! A [`LedgerSnapshot`] captures everything the registry owns: the
//! authority, the committed sequence counter, every record, and every
//! grant entry (stale ones included). Embedders and tooling use it to
//! persist a ledger session and resume it later. Grants are flattened to
//! entry triples because the matrix key is a pair, which JSON maps cannot
//! express directly.

use serde::{Deserialize, Serialize};

use hvl_store::{InMemoryAccessMatrix, InMemoryRecordStore, SequenceAllocator};
use hvl_types::{ActorId, AssetRecord, SequenceId};

use crate::registry::ProvenanceRegistry;

/// One stored record, keyed by its sequence id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub id: SequenceId,
    pub record: AssetRecord,
}

/// One access-matrix entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantEntry {
    pub record: SequenceId,
    pub accessor: ActorId,
    pub allowed: bool,
}

/// Full registry state at a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// The protocol authority fixed at initialization.
    pub authority: ActorId,
    /// The last committed sequence id value.
    pub sequence: u64,
    /// All records, in increasing id order.
    pub records: Vec<RecordEntry>,
    /// All grant entries, stale ones for purged ids included.
    pub grants: Vec<GrantEntry>,
}

impl ProvenanceRegistry<InMemoryRecordStore, InMemoryAccessMatrix> {
    /// Capture the full registry state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let (records, grants, allocator) = self.backends();
        LedgerSnapshot {
            authority: *self.authority(),
            sequence: allocator.current(),
            records: records
                .entries()
                .into_iter()
                .map(|(id, record)| RecordEntry { id, record })
                .collect(),
            grants: grants
                .entries()
                .into_iter()
                .map(|(record, accessor, allowed)| GrantEntry {
                    record,
                    accessor,
                    allowed,
                })
                .collect(),
        }
    }

    /// Rebuild a registry from a captured snapshot.
    ///
    /// Sequence allocation resumes from the snapshot's counter, so ids
    /// keep increasing across a persist/restore cycle.
    pub fn restore(snapshot: LedgerSnapshot) -> Self {
        let records = InMemoryRecordStore::from_entries(
            snapshot.records.into_iter().map(|e| (e.id, e.record)),
        );
        let grants = InMemoryAccessMatrix::from_entries(
            snapshot
                .grants
                .into_iter()
                .map(|e| (e.record, e.accessor, e.allowed)),
        );
        Self::new(
            records,
            grants,
            SequenceAllocator::with_current(snapshot.sequence),
            snapshot.authority,
        )
    }
}
