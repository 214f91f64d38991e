//! Field validation rules.
//!
//! Pure, deterministic checks with no side effects. Every operation runs
//! the relevant checks before touching any store, so a failed validation
//! never leaves partial state behind. Bounds are counted in characters,
//! not bytes.

use crate::error::RegistryError;
use crate::request::RecordDraft;

/// Maximum produce name length, in characters.
pub const NAME_MAX_CHARS: usize = 64;
/// Maximum origin description length, in characters.
pub const ORIGIN_MAX_CHARS: usize = 128;
/// Maximum single tag length, in characters.
pub const TAG_MAX_CHARS: usize = 32;
/// Maximum number of tags on a record.
pub const TAGS_MAX: usize = 10;
/// Minimum production volume (inclusive).
pub const VOLUME_MIN: u64 = 1;
/// Production volume limit (exclusive).
pub const VOLUME_LIMIT: u64 = 1_000_000_000;

/// A tag is valid iff it is 1–32 characters long.
pub fn valid_tag(tag: &str) -> bool {
    let chars = tag.chars().count();
    (1..=TAG_MAX_CHARS).contains(&chars)
}

/// A tag collection is valid iff it holds 1–10 tags, each individually valid.
pub fn valid_tag_collection(tags: &[String]) -> bool {
    (1..=TAGS_MAX).contains(&tags.len()) && tags.iter().all(|tag| valid_tag(tag))
}

/// Produce name must be 1–64 characters.
pub fn check_produce_name(name: &str) -> Result<(), RegistryError> {
    let chars = name.chars().count();
    if (1..=NAME_MAX_CHARS).contains(&chars) {
        Ok(())
    } else {
        Err(RegistryError::FieldLengthViolation)
    }
}

/// Origin description must be 1–128 characters.
pub fn check_origin(origin: &str) -> Result<(), RegistryError> {
    let chars = origin.chars().count();
    if (1..=ORIGIN_MAX_CHARS).contains(&chars) {
        Ok(())
    } else {
        Err(RegistryError::FieldLengthViolation)
    }
}

/// Volume must satisfy `1 <= volume < 1_000_000_000`.
pub fn check_volume(volume: u64) -> Result<(), RegistryError> {
    if (VOLUME_MIN..VOLUME_LIMIT).contains(&volume) {
        Ok(())
    } else {
        Err(RegistryError::NumericRangeViolation)
    }
}

/// The stored tag collection must pass [`valid_tag_collection`].
pub fn check_tags(tags: &[String]) -> Result<(), RegistryError> {
    if valid_tag_collection(tags) {
        Ok(())
    } else {
        Err(RegistryError::MetadataFormatError)
    }
}

/// Tags supplied to a metadata amendment: at most 10, each individually
/// valid. Emptiness is allowed here; the merged collection's bound is
/// what the amendment operation enforces.
pub fn check_supplementary_tags(tags: &[String]) -> Result<(), RegistryError> {
    if tags.len() <= TAGS_MAX && tags.iter().all(|tag| valid_tag(tag)) {
        Ok(())
    } else {
        Err(RegistryError::MetadataFormatError)
    }
}

/// Validate every field of a draft, in stored-field order.
pub fn check_draft(draft: &RecordDraft) -> Result<(), RegistryError> {
    check_produce_name(&draft.produce_name)?;
    check_volume(draft.volume)?;
    check_origin(&draft.origin)?;
    check_tags(&draft.tags)?;
    Ok(())
}
