//! Record-management and access-control engine for the Harvest Provenance
//! Ledger (HVL).
//!
//! This crate is the heart of HVL. It provides:
//! - Field validation rules for agricultural records
//! - The explicit authorization lattice (owner / grantee / authority)
//! - [`ProvenanceRegistry`], the operations layer composing the sequence
//!   allocator, the record store, and the access matrix
//! - Coded errors matching the ledger's wire enumeration
//! - Serializable full-state snapshots for embedding and tooling
//!
//! Every operation receives the caller's authenticated identity and the
//! current height from the execution environment via [`CallContext`]; the
//! environment also guarantees that operations execute one at a time.
//!
//! # Quick Start
//!
//! ```rust
//! use hvl_registry::{CallContext, ProvenanceRegistry, RecordDraft};
//! use hvl_types::ActorId;
//!
//! let registry = ProvenanceRegistry::in_memory(ActorId::ephemeral());
//! let alice = ActorId::ephemeral();
//!
//! let ctx = CallContext::new(alice, 100);
//! let draft = RecordDraft::new("Corn", 500, "Farm A", vec!["organic".into()]);
//! let id = registry.create_record(&ctx, draft).unwrap();
//!
//! let report = registry.verify_authenticity(&ctx, id, &alice).unwrap();
//! assert!(report.is_authentic);
//! ```

pub mod authorize;
pub mod error;
pub mod registry;
pub mod request;
pub mod snapshot;
pub mod validation;

pub use authorize::{denial, permits, Action};
pub use error::RegistryError;
pub use registry::{AuthenticityReport, ProvenanceRegistry};
pub use request::{CallContext, RecordDraft};
pub use snapshot::{GrantEntry, LedgerSnapshot, RecordEntry};
