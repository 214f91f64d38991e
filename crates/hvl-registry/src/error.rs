use hvl_store::StoreError;

/// Errors produced by registry operations.
///
/// Each variant maps to one code of the ledger's wire enumeration; callers
/// distinguish "not allowed" (300, 305, 306, 307) from "malformed input"
/// (303, 304, 308) by variant, and [`code`](Self::code) exposes the
/// numeric form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("caller lacks the required authority")]
    AuthorityRequired,

    #[error("record not found")]
    ResourceNotFound,

    #[error("record already exists")]
    DuplicateResource,

    #[error("field length outside permitted bounds")]
    FieldLengthViolation,

    #[error("numeric value outside permitted range")]
    NumericRangeViolation,

    #[error("caller has no access grant for this record")]
    PermissionDenied,

    #[error("caller is not the record owner")]
    OwnershipMismatch,

    #[error("record is under emergency restriction")]
    AccessForbidden,

    #[error("malformed tag collection")]
    MetadataFormatError,
}

impl RegistryError {
    /// The numeric wire code for this error.
    pub const fn code(&self) -> u16 {
        match self {
            Self::AuthorityRequired => 300,
            Self::ResourceNotFound => 301,
            Self::DuplicateResource => 302,
            Self::FieldLengthViolation => 303,
            Self::NumericRangeViolation => 304,
            Self::PermissionDenied => 305,
            Self::OwnershipMismatch => 306,
            Self::AccessForbidden => 307,
            Self::MetadataFormatError => 308,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateRecord(_) => Self::DuplicateResource,
            StoreError::RecordNotFound(_) => Self::ResourceNotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hvl_types::SequenceId;

    #[test]
    fn codes_match_the_wire_enumeration() {
        assert_eq!(RegistryError::AuthorityRequired.code(), 300);
        assert_eq!(RegistryError::ResourceNotFound.code(), 301);
        assert_eq!(RegistryError::DuplicateResource.code(), 302);
        assert_eq!(RegistryError::FieldLengthViolation.code(), 303);
        assert_eq!(RegistryError::NumericRangeViolation.code(), 304);
        assert_eq!(RegistryError::PermissionDenied.code(), 305);
        assert_eq!(RegistryError::OwnershipMismatch.code(), 306);
        assert_eq!(RegistryError::AccessForbidden.code(), 307);
        assert_eq!(RegistryError::MetadataFormatError.code(), 308);
    }

    #[test]
    fn store_errors_fold_into_coded_variants() {
        let dup: RegistryError = StoreError::DuplicateRecord(SequenceId::new(1)).into();
        assert_eq!(dup, RegistryError::DuplicateResource);

        let missing: RegistryError = StoreError::RecordNotFound(SequenceId::new(1)).into();
        assert_eq!(missing, RegistryError::ResourceNotFound);
    }
}
