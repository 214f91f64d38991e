use serde::{Deserialize, Serialize};

use hvl_types::ActorId;

/// Per-call environment context.
///
/// The execution environment authenticates the caller and supplies the
/// current global height with every operation call. The ledger never
/// derives either value itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    /// The authenticated caller identity.
    pub caller: ActorId,
    /// The environment's global height counter at call time. Used only as
    /// a timestamp.
    pub height: u64,
}

impl CallContext {
    pub fn new(caller: ActorId, height: u64) -> Self {
        Self { caller, height }
    }
}

/// The caller-supplied fields of a record, used by creation and full
/// modification. Ownership and registration height are never part of a
/// draft; the registry fills those from the call context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub produce_name: String,
    pub volume: u64,
    pub origin: String,
    pub tags: Vec<String>,
}

impl RecordDraft {
    pub fn new(
        produce_name: impl Into<String>,
        volume: u64,
        origin: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            produce_name: produce_name.into(),
            volume,
            origin: origin.into(),
            tags,
        }
    }
}
