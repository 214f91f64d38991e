use serde::{Deserialize, Serialize};

use crate::actor::ActorId;

/// One agricultural production record.
///
/// A record is created once per produce batch, owned by its cultivator,
/// and mutated in place by transfer, amendment, and modification. Field
/// bounds (name 1–64 chars, origin 1–128 chars, volume in `[1, 1e9)`,
/// 1–10 tags of 1–32 chars) are enforced by the registry before any
/// record is stored or replaced; a stored record always satisfies them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Name of the produce batch.
    pub produce_name: String,
    /// Current owner. Changes only through ownership transfer.
    pub cultivator: ActorId,
    /// Production volume in the batch's native unit.
    pub volume: u64,
    /// Environment height at creation. Immutable.
    pub registered_at: u64,
    /// Free-form origin description (farm, plot, region).
    pub origin: String,
    /// Ordered classification tags.
    pub tags: Vec<String>,
    /// Emergency-restriction latch. Once set, all mutating operations on
    /// the record are refused. Absent in ledger files written before the
    /// latch existed, hence the default.
    #[serde(default)]
    pub restricted: bool,
}

impl AssetRecord {
    /// Convenience constructor used by tests across the workspace.
    pub fn sample(cultivator: ActorId, registered_at: u64) -> Self {
        Self {
            produce_name: "Winter Wheat".into(),
            cultivator,
            volume: 1200,
            registered_at,
            origin: "North Field, Lot 3".into(),
            tags: vec!["organic".into()],
            restricted: false,
        }
    }
}
