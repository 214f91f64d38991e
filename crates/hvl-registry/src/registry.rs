use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hvl_store::{
    AccessMatrix, InMemoryAccessMatrix, InMemoryRecordStore, RecordStore, SequenceAllocator,
};
use hvl_types::{ActorId, AssetRecord, SequenceId};

use crate::authorize::{denial, permits, Action};
use crate::error::RegistryError;
use crate::request::{CallContext, RecordDraft};
use crate::validation;

/// Result of an authenticity verification query.
///
/// A cultivator mismatch is data, not an error: the query succeeds for any
/// authorized caller and reports what it found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticityReport {
    /// Whether the record's current owner matches the expected cultivator.
    pub is_authentic: bool,
    /// The environment height at query time.
    pub current_height: u64,
    /// Heights elapsed since the record was registered.
    pub age: u64,
    /// Same comparison as `is_authentic`, kept as a separate field of the
    /// query surface.
    pub cultivator_match: bool,
}

/// The operations layer of the provenance ledger.
///
/// Composes the sequence allocator, the record store, and the access
/// matrix under the authorization lattice. The protocol authority is
/// fixed at construction and immutable thereafter.
///
/// Every operation follows the same check order: existence, then
/// authorization, then the restriction latch, then input validation, and
/// only then mutation, so any failure aborts with zero observable side
/// effects. The execution environment serializes operation calls; the
/// registry performs no internal locking beyond what its backends do.
pub struct ProvenanceRegistry<S: RecordStore, M: AccessMatrix> {
    records: S,
    grants: M,
    allocator: SequenceAllocator,
    authority: ActorId,
}

impl ProvenanceRegistry<InMemoryRecordStore, InMemoryAccessMatrix> {
    /// A registry over fresh in-memory backends, for tests and embedding.
    pub fn in_memory(authority: ActorId) -> Self {
        Self::new(
            InMemoryRecordStore::new(),
            InMemoryAccessMatrix::new(),
            SequenceAllocator::new(),
            authority,
        )
    }
}

impl<S: RecordStore, M: AccessMatrix> ProvenanceRegistry<S, M> {
    /// Assemble a registry from backends and the deployment-time authority.
    pub fn new(records: S, grants: M, allocator: SequenceAllocator, authority: ActorId) -> Self {
        Self {
            records,
            grants,
            allocator,
            authority,
        }
    }

    /// The protocol authority identity fixed at construction.
    pub fn authority(&self) -> &ActorId {
        &self.authority
    }

    /// Point lookup, no authorization. Intended for tooling and tests;
    /// the authenticated query surface is [`verify_authenticity`].
    ///
    /// [`verify_authenticity`]: Self::verify_authenticity
    pub fn record(&self, id: SequenceId) -> Option<AssetRecord> {
        self.records.get(id)
    }

    /// Number of records currently stored.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// The last committed sequence id value (0 before any creation).
    pub fn last_sequence(&self) -> u64 {
        self.allocator.current()
    }

    pub(crate) fn backends(&self) -> (&S, &M, &SequenceAllocator) {
        (&self.records, &self.grants, &self.allocator)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Register a new produce batch owned by the caller.
    ///
    /// Allocates the next sequence id, stores the record with the
    /// environment height as its registration timestamp, and grants the
    /// owner access. The sequence counter advances only after the insert
    /// succeeds; a rejected draft never consumes an id.
    ///
    /// Fails with `FieldLengthViolation`, `NumericRangeViolation`, or
    /// `MetadataFormatError` when a draft field is out of bounds.
    pub fn create_record(
        &self,
        ctx: &CallContext,
        draft: RecordDraft,
    ) -> Result<SequenceId, RegistryError> {
        validation::check_draft(&draft)?;

        let id = self.allocator.reserve();
        let record = AssetRecord {
            produce_name: draft.produce_name,
            cultivator: ctx.caller,
            volume: draft.volume,
            registered_at: ctx.height,
            origin: draft.origin,
            tags: draft.tags,
            restricted: false,
        };
        self.records.insert(id, &record)?;
        self.grants.grant(id, &ctx.caller, true);
        self.allocator.commit(id);

        info!(id = %id, cultivator = %ctx.caller, "record created");
        Ok(id)
    }

    /// Check a record's provenance against an expected cultivator.
    ///
    /// Read-only; available to the owner, any grantee, and the protocol
    /// authority, including on restricted records. Fails with
    /// `ResourceNotFound` or `PermissionDenied`, in that order; a
    /// cultivator mismatch is reported in the result, never as an error.
    pub fn verify_authenticity(
        &self,
        ctx: &CallContext,
        id: SequenceId,
        expected_cultivator: &ActorId,
    ) -> Result<AuthenticityReport, RegistryError> {
        let record = self.fetch(id)?;
        self.authorize(Action::Inspect, id, &record, &ctx.caller)?;

        let cultivator_match = record.cultivator == *expected_cultivator;
        Ok(AuthenticityReport {
            is_authentic: cultivator_match,
            current_height: ctx.height,
            age: ctx.height.saturating_sub(record.registered_at),
            cultivator_match,
        })
    }

    /// Hand ownership of a record to another cultivator.
    ///
    /// Owner-only. Fails with `ResourceNotFound`, `OwnershipMismatch`, or
    /// `AccessForbidden` (restricted record).
    pub fn transfer_ownership(
        &self,
        ctx: &CallContext,
        id: SequenceId,
        recipient: &ActorId,
    ) -> Result<(), RegistryError> {
        let mut record = self.fetch(id)?;
        self.authorize(Action::Transfer, id, &record, &ctx.caller)?;
        Self::ensure_unrestricted(&record)?;

        record.cultivator = *recipient;
        self.records.replace(id, &record)?;

        info!(id = %id, from = %ctx.caller, to = %recipient, "ownership transferred");
        Ok(())
    }

    /// Grant `target` verification access to a record.
    ///
    /// Owner-only; the owner's own implicit grant cannot be re-issued
    /// through this call. Fails with `ResourceNotFound`,
    /// `OwnershipMismatch`, `AuthorityRequired` (self-grant), or
    /// `AccessForbidden`.
    pub fn grant_access(
        &self,
        ctx: &CallContext,
        id: SequenceId,
        target: &ActorId,
    ) -> Result<(), RegistryError> {
        let record = self.fetch(id)?;
        self.authorize(Action::ManageAccess, id, &record, &ctx.caller)?;
        if target == &ctx.caller {
            return Err(RegistryError::AuthorityRequired);
        }
        Self::ensure_unrestricted(&record)?;

        self.grants.grant(id, target, true);
        debug!(id = %id, target = %target, "access granted");
        Ok(())
    }

    /// Delete `target`'s access entry for a record.
    ///
    /// Owner-only; self-revocation is refused. Revoking an absent entry is
    /// a no-op. Fails with `ResourceNotFound`, `OwnershipMismatch`,
    /// `AuthorityRequired` (self-revocation), or `AccessForbidden`.
    pub fn revoke_access(
        &self,
        ctx: &CallContext,
        id: SequenceId,
        target: &ActorId,
    ) -> Result<(), RegistryError> {
        let record = self.fetch(id)?;
        self.authorize(Action::ManageAccess, id, &record, &ctx.caller)?;
        if target == &ctx.caller {
            return Err(RegistryError::AuthorityRequired);
        }
        Self::ensure_unrestricted(&record)?;

        self.grants.revoke(id, target);
        debug!(id = %id, target = %target, "access revoked");
        Ok(())
    }

    /// Append classification tags to a record and return the merged
    /// collection.
    ///
    /// Owner-only. The merged collection must stay within the 10-tag
    /// bound and every supplementary tag must be individually valid; a
    /// rejected amendment leaves the record unchanged. Fails with
    /// `ResourceNotFound`, `OwnershipMismatch`, `AccessForbidden`, or
    /// `MetadataFormatError`.
    pub fn append_metadata(
        &self,
        ctx: &CallContext,
        id: SequenceId,
        tags: Vec<String>,
    ) -> Result<Vec<String>, RegistryError> {
        let mut record = self.fetch(id)?;
        self.authorize(Action::AmendMetadata, id, &record, &ctx.caller)?;
        Self::ensure_unrestricted(&record)?;
        validation::check_supplementary_tags(&tags)?;
        if record.tags.len() + tags.len() > validation::TAGS_MAX {
            return Err(RegistryError::MetadataFormatError);
        }

        record.tags.extend(tags);
        self.records.replace(id, &record)?;

        debug!(id = %id, tag_count = record.tags.len(), "metadata appended");
        Ok(record.tags)
    }

    /// Overwrite the caller-supplied fields of a record.
    ///
    /// Owner-only; ownership and the registration height are untouched.
    /// The draft is validated like a creation. Fails with
    /// `ResourceNotFound`, `OwnershipMismatch`, `AccessForbidden`,
    /// `FieldLengthViolation`, `NumericRangeViolation`, or
    /// `MetadataFormatError`.
    pub fn modify_record(
        &self,
        ctx: &CallContext,
        id: SequenceId,
        draft: RecordDraft,
    ) -> Result<(), RegistryError> {
        let mut record = self.fetch(id)?;
        self.authorize(Action::Rewrite, id, &record, &ctx.caller)?;
        Self::ensure_unrestricted(&record)?;
        validation::check_draft(&draft)?;

        record.produce_name = draft.produce_name;
        record.volume = draft.volume;
        record.origin = draft.origin;
        record.tags = draft.tags;
        self.records.replace(id, &record)?;

        debug!(id = %id, "record modified");
        Ok(())
    }

    /// Delete a record.
    ///
    /// Owner-only. The record's access-matrix entries are deliberately
    /// left in place; sequence ids are never reused, so the stale entries
    /// can never attach to a later record. Fails with `ResourceNotFound`,
    /// `OwnershipMismatch`, or `AccessForbidden`.
    pub fn purge_record(&self, ctx: &CallContext, id: SequenceId) -> Result<(), RegistryError> {
        let record = self.fetch(id)?;
        self.authorize(Action::Purge, id, &record, &ctx.caller)?;
        Self::ensure_unrestricted(&record)?;

        self.records.remove(id)?;
        info!(id = %id, "record purged");
        Ok(())
    }

    /// Latch the emergency restriction on a record.
    ///
    /// Available to the owner and the protocol authority. The latch is
    /// one-way and idempotent: once set, every mutating operation on the
    /// record fails with `AccessForbidden` while verification stays
    /// available. Fails with `ResourceNotFound` or `AuthorityRequired`.
    pub fn activate_emergency_restriction(
        &self,
        ctx: &CallContext,
        id: SequenceId,
    ) -> Result<(), RegistryError> {
        let mut record = self.fetch(id)?;
        self.authorize(Action::Restrict, id, &record, &ctx.caller)?;

        record.restricted = true;
        self.records.replace(id, &record)?;

        info!(id = %id, by = %ctx.caller, "emergency restriction activated");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Shared checks
    // -----------------------------------------------------------------------

    /// Existence is always checked first so a missing record never leaks
    /// an authorization signal.
    fn fetch(&self, id: SequenceId) -> Result<AssetRecord, RegistryError> {
        self.records.get(id).ok_or(RegistryError::ResourceNotFound)
    }

    fn authorize(
        &self,
        action: Action,
        id: SequenceId,
        record: &AssetRecord,
        caller: &ActorId,
    ) -> Result<(), RegistryError> {
        let has_grant = matches!(action, Action::Inspect) && self.grants.check(id, caller);
        if permits(action, record, caller, &self.authority, has_grant) {
            Ok(())
        } else {
            Err(denial(action))
        }
    }

    fn ensure_unrestricted(record: &AssetRecord) -> Result<(), RegistryError> {
        if record.restricted {
            Err(RegistryError::AccessForbidden)
        } else {
            Ok(())
        }
    }
}

impl<S: RecordStore, M: AccessMatrix> std::fmt::Debug for ProvenanceRegistry<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvenanceRegistry")
            .field("authority", &self.authority)
            .field("record_count", &self.record_count())
            .field("last_sequence", &self.last_sequence())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(seed: u8) -> ActorId {
        ActorId::from_raw([seed; 32])
    }

    fn registry() -> ProvenanceRegistry<InMemoryRecordStore, InMemoryAccessMatrix> {
        ProvenanceRegistry::in_memory(actor(0xAA))
    }

    fn draft() -> RecordDraft {
        RecordDraft::new("Corn", 500, "Farm A", vec!["organic".into()])
    }

    fn ctx(caller: ActorId, height: u64) -> CallContext {
        CallContext::new(caller, height)
    }

    // -----------------------------------------------------------------------
    // Creation and sequence allocation
    // -----------------------------------------------------------------------

    #[test]
    fn ids_increase_strictly_from_one() {
        let reg = registry();
        let alice = actor(1);
        for expected in 1..=4u64 {
            let id = reg.create_record(&ctx(alice, 10), draft()).unwrap();
            assert_eq!(id, SequenceId::new(expected));
        }
        assert_eq!(reg.last_sequence(), 4);
        assert_eq!(reg.record_count(), 4);
    }

    #[test]
    fn creation_stores_caller_and_height() {
        let reg = registry();
        let alice = actor(1);
        let id = reg.create_record(&ctx(alice, 77), draft()).unwrap();

        let record = reg.record(id).unwrap();
        assert_eq!(record.cultivator, alice);
        assert_eq!(record.registered_at, 77);
        assert!(!record.restricted);
    }

    #[test]
    fn creation_rejects_out_of_bounds_fields() {
        let reg = registry();
        let alice = actor(1);
        let c = ctx(alice, 1);

        let mut d = draft();
        d.volume = 0;
        assert_eq!(
            reg.create_record(&c, d),
            Err(RegistryError::NumericRangeViolation)
        );

        let mut d = draft();
        d.volume = 1_000_000_000;
        assert_eq!(
            reg.create_record(&c, d),
            Err(RegistryError::NumericRangeViolation)
        );

        let mut d = draft();
        d.produce_name = "n".repeat(65);
        assert_eq!(
            reg.create_record(&c, d),
            Err(RegistryError::FieldLengthViolation)
        );

        let mut d = draft();
        d.origin = String::new();
        assert_eq!(
            reg.create_record(&c, d),
            Err(RegistryError::FieldLengthViolation)
        );

        let mut d = draft();
        d.tags = vec!["t".to_string(); 11];
        assert_eq!(
            reg.create_record(&c, d),
            Err(RegistryError::MetadataFormatError)
        );

        let mut d = draft();
        d.tags = vec![];
        assert_eq!(
            reg.create_record(&c, d),
            Err(RegistryError::MetadataFormatError)
        );
    }

    #[test]
    fn failed_creation_does_not_burn_a_sequence_id() {
        let reg = registry();
        let alice = actor(1);

        let mut bad = draft();
        bad.volume = 0;
        assert!(reg.create_record(&ctx(alice, 1), bad).is_err());
        assert_eq!(reg.last_sequence(), 0);

        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        assert_eq!(id, SequenceId::new(1));
    }

    // -----------------------------------------------------------------------
    // Verification
    // -----------------------------------------------------------------------

    #[test]
    fn owner_verification_scenario() {
        let reg = registry();
        let alice = actor(1);
        let other = actor(2);

        let id = reg
            .create_record(
                &ctx(alice, 100),
                RecordDraft::new("Corn", 500, "Farm A", vec!["organic".into()]),
            )
            .unwrap();
        assert_eq!(id, SequenceId::new(1));

        let report = reg.verify_authenticity(&ctx(alice, 110), id, &alice).unwrap();
        assert!(report.is_authentic);
        assert!(report.cultivator_match);
        assert_eq!(report.current_height, 110);
        assert_eq!(report.age, 10);

        // Mismatch is data, not an error.
        let report = reg.verify_authenticity(&ctx(alice, 110), id, &other).unwrap();
        assert!(!report.is_authentic);
        assert!(!report.cultivator_match);
    }

    #[test]
    fn verification_permission_lattice() {
        let reg = registry();
        let authority = *reg.authority();
        let alice = actor(1);
        let grantee = actor(2);
        let stranger = actor(3);

        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        reg.grant_access(&ctx(alice, 2), id, &grantee).unwrap();

        assert!(reg.verify_authenticity(&ctx(alice, 3), id, &alice).is_ok());
        assert!(reg.verify_authenticity(&ctx(grantee, 3), id, &alice).is_ok());
        assert!(reg.verify_authenticity(&ctx(authority, 3), id, &alice).is_ok());
        assert_eq!(
            reg.verify_authenticity(&ctx(stranger, 3), id, &alice),
            Err(RegistryError::PermissionDenied)
        );
    }

    #[test]
    fn verification_of_missing_record_is_not_found() {
        let reg = registry();
        let alice = actor(1);
        assert_eq!(
            reg.verify_authenticity(&ctx(alice, 1), SequenceId::new(9), &alice),
            Err(RegistryError::ResourceNotFound)
        );
    }

    #[test]
    fn missing_record_outranks_missing_permission() {
        let reg = registry();
        let stranger = actor(3);
        // A stranger probing a nonexistent id sees NotFound, not a
        // permission signal.
        assert_eq!(
            reg.verify_authenticity(&ctx(stranger, 1), SequenceId::new(1), &stranger),
            Err(RegistryError::ResourceNotFound)
        );
    }

    // -----------------------------------------------------------------------
    // Ownership transfer
    // -----------------------------------------------------------------------

    #[test]
    fn transfer_hands_over_ownership() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);
        let carol = actor(3);

        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        reg.transfer_ownership(&ctx(alice, 2), id, &bob).unwrap();
        assert_eq!(reg.record(id).unwrap().cultivator, bob);

        // Alice is no longer the owner; a second transfer by her fails.
        assert_eq!(
            reg.transfer_ownership(&ctx(alice, 3), id, &carol),
            Err(RegistryError::OwnershipMismatch)
        );

        // Bob can pass it on.
        reg.transfer_ownership(&ctx(bob, 4), id, &carol).unwrap();
        assert_eq!(reg.record(id).unwrap().cultivator, carol);
    }

    #[test]
    fn transfer_preserves_registration_height() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);

        let id = reg.create_record(&ctx(alice, 50), draft()).unwrap();
        reg.transfer_ownership(&ctx(alice, 60), id, &bob).unwrap();
        assert_eq!(reg.record(id).unwrap().registered_at, 50);
    }

    #[test]
    fn transfer_of_missing_record_is_not_found() {
        let reg = registry();
        assert_eq!(
            reg.transfer_ownership(&ctx(actor(1), 1), SequenceId::new(4), &actor(2)),
            Err(RegistryError::ResourceNotFound)
        );
    }

    // -----------------------------------------------------------------------
    // Access grants
    // -----------------------------------------------------------------------

    #[test]
    fn grant_then_revoke_controls_verification() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);

        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        assert_eq!(
            reg.verify_authenticity(&ctx(bob, 2), id, &alice),
            Err(RegistryError::PermissionDenied)
        );

        reg.grant_access(&ctx(alice, 3), id, &bob).unwrap();
        assert!(reg.verify_authenticity(&ctx(bob, 4), id, &alice).is_ok());

        reg.revoke_access(&ctx(alice, 5), id, &bob).unwrap();
        assert_eq!(
            reg.verify_authenticity(&ctx(bob, 6), id, &alice),
            Err(RegistryError::PermissionDenied)
        );
    }

    #[test]
    fn self_grant_and_self_revocation_are_refused() {
        let reg = registry();
        let alice = actor(1);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();

        assert_eq!(
            reg.grant_access(&ctx(alice, 2), id, &alice),
            Err(RegistryError::AuthorityRequired)
        );
        assert_eq!(
            reg.revoke_access(&ctx(alice, 2), id, &alice),
            Err(RegistryError::AuthorityRequired)
        );
        // The owner's implicit grant is untouched.
        assert!(reg.verify_authenticity(&ctx(alice, 3), id, &alice).is_ok());
    }

    #[test]
    fn only_the_owner_manages_access() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);
        let carol = actor(3);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();

        assert_eq!(
            reg.grant_access(&ctx(bob, 2), id, &carol),
            Err(RegistryError::OwnershipMismatch)
        );
        assert_eq!(
            reg.revoke_access(&ctx(bob, 2), id, &carol),
            Err(RegistryError::OwnershipMismatch)
        );
    }

    #[test]
    fn revoking_an_absent_grant_is_a_no_op() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        assert!(reg.revoke_access(&ctx(alice, 2), id, &bob).is_ok());
    }

    // -----------------------------------------------------------------------
    // Metadata amendment
    // -----------------------------------------------------------------------

    #[test]
    fn append_merges_and_returns_tags() {
        let reg = registry();
        let alice = actor(1);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();

        let merged = reg
            .append_metadata(&ctx(alice, 2), id, vec!["fair-trade".into(), "heirloom".into()])
            .unwrap();
        assert_eq!(merged, vec!["organic", "fair-trade", "heirloom"]);
        assert_eq!(reg.record(id).unwrap().tags, merged);
    }

    #[test]
    fn append_overflow_leaves_record_unchanged() {
        let reg = registry();
        let alice = actor(1);
        let mut d = draft();
        d.tags = vec!["t".to_string(); 9];
        let id = reg.create_record(&ctx(alice, 1), d).unwrap();

        let before = reg.record(id).unwrap();
        assert_eq!(
            reg.append_metadata(&ctx(alice, 2), id, vec!["a".into(), "b".into()]),
            Err(RegistryError::MetadataFormatError)
        );
        assert_eq!(reg.record(id).unwrap(), before);
    }

    #[test]
    fn append_rejects_invalid_supplementary_tag() {
        let reg = registry();
        let alice = actor(1);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();

        let before = reg.record(id).unwrap();
        assert_eq!(
            reg.append_metadata(&ctx(alice, 2), id, vec!["x".repeat(33)]),
            Err(RegistryError::MetadataFormatError)
        );
        assert_eq!(reg.record(id).unwrap(), before);
    }

    #[test]
    fn append_up_to_the_bound_succeeds() {
        let reg = registry();
        let alice = actor(1);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();

        let merged = reg
            .append_metadata(&ctx(alice, 2), id, vec!["t".to_string(); 9])
            .unwrap();
        assert_eq!(merged.len(), 10);
    }

    #[test]
    fn append_by_non_owner_is_refused() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();

        assert_eq!(
            reg.append_metadata(&ctx(bob, 2), id, vec!["x".into()]),
            Err(RegistryError::OwnershipMismatch)
        );
    }

    // -----------------------------------------------------------------------
    // Modification
    // -----------------------------------------------------------------------

    #[test]
    fn modify_overwrites_draft_fields_only() {
        let reg = registry();
        let alice = actor(1);
        let id = reg.create_record(&ctx(alice, 40), draft()).unwrap();

        reg.modify_record(
            &ctx(alice, 55),
            id,
            RecordDraft::new("Sweet Corn", 750, "Farm B", vec!["non-gmo".into()]),
        )
        .unwrap();

        let record = reg.record(id).unwrap();
        assert_eq!(record.produce_name, "Sweet Corn");
        assert_eq!(record.volume, 750);
        assert_eq!(record.origin, "Farm B");
        assert_eq!(record.tags, vec!["non-gmo"]);
        // Owner and registration height are untouched.
        assert_eq!(record.cultivator, alice);
        assert_eq!(record.registered_at, 40);
    }

    #[test]
    fn modify_validates_like_creation() {
        let reg = registry();
        let alice = actor(1);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();

        let before = reg.record(id).unwrap();
        assert_eq!(
            reg.modify_record(
                &ctx(alice, 2),
                id,
                RecordDraft::new("Corn", 0, "Farm A", vec!["organic".into()]),
            ),
            Err(RegistryError::NumericRangeViolation)
        );
        assert_eq!(reg.record(id).unwrap(), before);
    }

    #[test]
    fn modify_by_non_owner_is_refused() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();

        assert_eq!(
            reg.modify_record(&ctx(bob, 2), id, draft()),
            Err(RegistryError::OwnershipMismatch)
        );
    }

    // -----------------------------------------------------------------------
    // Purge
    // -----------------------------------------------------------------------

    #[test]
    fn purge_scenario() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);

        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        reg.purge_record(&ctx(alice, 2), id).unwrap();

        assert!(reg.record(id).is_none());
        assert_eq!(
            reg.verify_authenticity(&ctx(alice, 3), id, &alice),
            Err(RegistryError::ResourceNotFound)
        );
        assert_eq!(
            reg.verify_authenticity(&ctx(bob, 3), id, &alice),
            Err(RegistryError::ResourceNotFound)
        );
    }

    #[test]
    fn purge_by_non_owner_is_refused() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();

        assert_eq!(
            reg.purge_record(&ctx(bob, 2), id),
            Err(RegistryError::OwnershipMismatch)
        );
        assert!(reg.record(id).is_some());
    }

    #[test]
    fn purged_ids_are_never_reissued() {
        let reg = registry();
        let alice = actor(1);

        let first = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        reg.purge_record(&ctx(alice, 2), first).unwrap();

        let second = reg.create_record(&ctx(alice, 3), draft()).unwrap();
        assert_eq!(second, SequenceId::new(2));
    }

    #[test]
    fn grants_for_a_purged_id_stay_stale_but_unreachable() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);

        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        reg.grant_access(&ctx(alice, 2), id, &bob).unwrap();
        reg.purge_record(&ctx(alice, 3), id).unwrap();

        // The matrix still holds the entries (purge does not clean up)...
        let (_, grants, _) = reg.backends();
        assert!(grants.check(id, &bob));
        // ...but the ledger answers NotFound for everyone, grantee included.
        assert_eq!(
            reg.verify_authenticity(&ctx(bob, 4), id, &alice),
            Err(RegistryError::ResourceNotFound)
        );
    }

    // -----------------------------------------------------------------------
    // Emergency restriction
    // -----------------------------------------------------------------------

    #[test]
    fn restriction_latch_blocks_mutations() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);

        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        reg.activate_emergency_restriction(&ctx(alice, 2), id).unwrap();
        assert!(reg.record(id).unwrap().restricted);

        assert_eq!(
            reg.transfer_ownership(&ctx(alice, 3), id, &bob),
            Err(RegistryError::AccessForbidden)
        );
        assert_eq!(
            reg.grant_access(&ctx(alice, 3), id, &bob),
            Err(RegistryError::AccessForbidden)
        );
        assert_eq!(
            reg.revoke_access(&ctx(alice, 3), id, &bob),
            Err(RegistryError::AccessForbidden)
        );
        assert_eq!(
            reg.append_metadata(&ctx(alice, 3), id, vec!["x".into()]),
            Err(RegistryError::AccessForbidden)
        );
        assert_eq!(
            reg.modify_record(&ctx(alice, 3), id, draft()),
            Err(RegistryError::AccessForbidden)
        );
        assert_eq!(
            reg.purge_record(&ctx(alice, 3), id),
            Err(RegistryError::AccessForbidden)
        );
    }

    #[test]
    fn restricted_record_stays_verifiable() {
        let reg = registry();
        let alice = actor(1);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        reg.activate_emergency_restriction(&ctx(alice, 2), id).unwrap();

        let report = reg.verify_authenticity(&ctx(alice, 3), id, &alice).unwrap();
        assert!(report.is_authentic);
    }

    #[test]
    fn authority_may_restrict_but_stranger_may_not() {
        let reg = registry();
        let authority = *reg.authority();
        let alice = actor(1);
        let stranger = actor(3);

        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        assert_eq!(
            reg.activate_emergency_restriction(&ctx(stranger, 2), id),
            Err(RegistryError::AuthorityRequired)
        );
        reg.activate_emergency_restriction(&ctx(authority, 2), id)
            .unwrap();
        assert!(reg.record(id).unwrap().restricted);
    }

    #[test]
    fn restriction_is_idempotent() {
        let reg = registry();
        let alice = actor(1);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();

        reg.activate_emergency_restriction(&ctx(alice, 2), id).unwrap();
        reg.activate_emergency_restriction(&ctx(alice, 3), id).unwrap();
        assert!(reg.record(id).unwrap().restricted);
    }

    #[test]
    fn restriction_of_missing_record_is_not_found() {
        let reg = registry();
        assert_eq!(
            reg.activate_emergency_restriction(&ctx(actor(1), 1), SequenceId::new(8)),
            Err(RegistryError::ResourceNotFound)
        );
    }

    #[test]
    fn non_owner_sees_ownership_mismatch_even_on_restricted_record() {
        let reg = registry();
        let alice = actor(1);
        let bob = actor(2);
        let id = reg.create_record(&ctx(alice, 1), draft()).unwrap();
        reg.activate_emergency_restriction(&ctx(alice, 2), id).unwrap();

        // Authorization outranks the latch: the restriction is only
        // reported to callers who could otherwise act.
        assert_eq!(
            reg.transfer_ownership(&ctx(bob, 3), id, &bob),
            Err(RegistryError::OwnershipMismatch)
        );
    }
}
