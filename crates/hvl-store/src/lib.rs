//! Storage boundary for the Harvest Provenance Ledger.
//!
//! The registry is built on a durable key-value substrate that is an
//! external collaborator of this system. This crate pins down the shape of
//! that substrate as two traits plus a sequence allocator:
//!
//! - [`RecordStore`] — sequence id → [`AssetRecord`], with insert-if-absent,
//!   point lookup, full replace, and delete
//! - [`AccessMatrix`] — (sequence id, accessor) → boolean grant, where an
//!   absent entry reads as `false`
//! - [`SequenceAllocator`] — the monotonic record-id counter, with a
//!   reserve/commit protocol that ties allocation to a successful insert
//!
//! # Backends
//!
//! - [`InMemoryRecordStore`] / [`InMemoryAccessMatrix`] — `RwLock`-guarded
//!   maps for tests and embedding
//!
//! # Design Rules
//!
//! 1. The substrate executes one operation at a time; atomicity within an
//!    operation is the environment's transaction boundary.
//! 2. Absence of a grant entry is `false`, never an error.
//! 3. Deleting a record never touches the access matrix; stale grant
//!    entries for purged ids are harmless because ids are never reused.
//! 4. A reserved sequence id is committed only after the paired insert
//!    succeeded, so failed creations never burn ids.

pub mod error;
pub mod memory;
pub mod sequence;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryAccessMatrix, InMemoryRecordStore};
pub use sequence::SequenceAllocator;
pub use traits::{AccessMatrix, RecordStore};

// Re-exported so backend implementors depend on one crate.
pub use hvl_types::{AssetRecord, SequenceId};
