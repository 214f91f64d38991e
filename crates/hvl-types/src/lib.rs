//! Foundation types for the Harvest Provenance Ledger (HVL).
//!
//! This crate provides the identity and record types used throughout the
//! HVL system. Every other HVL crate depends on `hvl-types`.
//!
//! # Key Types
//!
//! - [`ActorId`] — Opaque authenticated identity token (cultivators,
//!   inspectors, the protocol authority)
//! - [`SequenceId`] — Unique, strictly increasing record identifier
//! - [`AssetRecord`] — One agricultural production record

pub mod actor;
pub mod error;
pub mod record;
pub mod sequence;

pub use actor::{ActorId, IdentitySource};
pub use error::TypeError;
pub use record::AssetRecord;
pub use sequence::SequenceId;
