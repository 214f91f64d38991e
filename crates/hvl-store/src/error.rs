use hvl_types::SequenceId;

/// Errors from record store and access matrix operations.
///
/// The substrate is assumed reliable (atomic read-modify-write per call),
/// so the only failures are the two key-existence violations the ledger's
/// coded error surface knows how to name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Insert attempted for a sequence id that is already present.
    #[error("record {0} already exists")]
    DuplicateRecord(SequenceId),

    /// Replace or remove attempted for a sequence id that is not present.
    #[error("record {0} not found")]
    RecordNotFound(SequenceId),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
