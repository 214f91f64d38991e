use hvl_types::{ActorId, AssetRecord, SequenceId};

use crate::error::StoreResult;

/// Keyed store mapping a sequence id to its record.
///
/// All implementations must satisfy these invariants:
/// - `insert` is insert-if-absent: a present id fails with
///   `DuplicateRecord` and leaves the store unchanged.
/// - `replace` and `remove` require prior existence.
/// - Reads never fail for missing ids; `get` returns `None`.
/// - The store never interprets record contents. Field validation is the
///   registry's job, before any write reaches the store.
pub trait RecordStore: Send + Sync {
    /// Store a record under a fresh id. Fails if `id` is already present.
    fn insert(&self, id: SequenceId, record: &AssetRecord) -> StoreResult<()>;

    /// Point lookup. Returns `None` if the id is not present.
    fn get(&self, id: SequenceId) -> Option<AssetRecord>;

    /// Overwrite an existing record in place. Fails if `id` is absent.
    fn replace(&self, id: SequenceId, record: &AssetRecord) -> StoreResult<()>;

    /// Delete an existing record. Fails if `id` is absent.
    fn remove(&self, id: SequenceId) -> StoreResult<()>;

    /// Whether `id` is currently present.
    fn contains(&self, id: SequenceId) -> bool {
        self.get(id).is_some()
    }

    /// Number of records currently stored.
    fn len(&self) -> usize;

    /// Returns `true` if no records are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keyed store mapping (sequence id, accessor) to a boolean grant.
///
/// Absence of an entry is equivalent to `false`, never an error. The
/// matrix carries no notion of record existence: entries for purged ids
/// simply go stale (ids are never reused, so they can never be
/// misattributed to a later record).
pub trait AccessMatrix: Send + Sync {
    /// Upsert the grant for `(id, accessor)`.
    fn grant(&self, id: SequenceId, accessor: &ActorId, allowed: bool);

    /// The stored grant, or `false` if no entry exists.
    fn check(&self, id: SequenceId, accessor: &ActorId) -> bool;

    /// Delete the entry if present. Returns whether an entry existed.
    fn revoke(&self, id: SequenceId, accessor: &ActorId) -> bool;
}
