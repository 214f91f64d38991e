//! The authorization lattice.
//!
//! Ownership, access grants, and protocol authority form a small fixed
//! lattice: the owner may do everything, a grantee may inspect, the
//! authority may inspect and restrict. Every operation consults
//! [`permits`] through the same path instead of re-deriving its own
//! check, and [`denial`] names the error a refused action reports.

use hvl_types::{ActorId, AssetRecord};

use crate::error::RegistryError;

/// What an operation is about to do to a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Read-only authenticity verification.
    Inspect,
    /// Change the owning cultivator.
    Transfer,
    /// Grant or revoke an access entry.
    ManageAccess,
    /// Append classification tags.
    AmendMetadata,
    /// Overwrite the caller-supplied fields.
    Rewrite,
    /// Delete the record.
    Purge,
    /// Latch the emergency restriction.
    Restrict,
}

/// Whether `caller` may perform `action` on `record`.
///
/// `has_grant` is the caller's stored access grant for this record; it is
/// only consulted for [`Action::Inspect`].
pub fn permits(
    action: Action,
    record: &AssetRecord,
    caller: &ActorId,
    authority: &ActorId,
    has_grant: bool,
) -> bool {
    let is_owner = *caller == record.cultivator;
    match action {
        Action::Inspect => is_owner || has_grant || caller == authority,
        Action::Restrict => is_owner || caller == authority,
        Action::Transfer
        | Action::ManageAccess
        | Action::AmendMetadata
        | Action::Rewrite
        | Action::Purge => is_owner,
    }
}

/// The error a refused `action` reports.
pub const fn denial(action: Action) -> RegistryError {
    match action {
        Action::Inspect => RegistryError::PermissionDenied,
        Action::Restrict => RegistryError::AuthorityRequired,
        Action::Transfer
        | Action::ManageAccess
        | Action::AmendMetadata
        | Action::Rewrite
        | Action::Purge => RegistryError::OwnershipMismatch,
    }
}
