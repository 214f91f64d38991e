use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use hvl_registry::{CallContext, LedgerSnapshot, ProvenanceRegistry};
use hvl_store::{InMemoryAccessMatrix, InMemoryRecordStore};
use hvl_types::ActorId;

/// On-disk shape of a ledger session.
///
/// The CLI plays the execution environment: it supplies caller identities
/// and the global height counter. The height lives here, next to the
/// ledger state, and advances by one on every invocation that opens the
/// session.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    height: u64,
    ledger: LedgerSnapshot,
}

/// A loaded ledger session: registry state plus the environment height.
pub struct Session {
    path: PathBuf,
    height: u64,
    registry: ProvenanceRegistry<InMemoryRecordStore, InMemoryAccessMatrix>,
}

impl Session {
    /// Create a fresh session file with the given protocol authority.
    pub fn init(path: &Path, authority: ActorId, force: bool) -> anyhow::Result<Self> {
        if path.exists() && !force {
            bail!(
                "ledger {} already exists (use --force to overwrite)",
                path.display()
            );
        }
        let session = Self {
            path: path.to_path_buf(),
            height: 0,
            registry: ProvenanceRegistry::in_memory(authority),
        };
        session.save()?;
        Ok(session)
    }

    /// Load a session file and advance the height for this invocation.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read ledger {}", path.display()))?;
        let file: SessionFile = serde_json::from_str(&raw)
            .with_context(|| format!("cannot parse ledger {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            height: file.height + 1,
            registry: ProvenanceRegistry::restore(file.ledger),
        })
    }

    /// The environment context for `caller` at the current height.
    pub fn context(&self, caller: ActorId) -> CallContext {
        CallContext::new(caller, self.height)
    }

    /// The current height of this invocation.
    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn registry(&self) -> &ProvenanceRegistry<InMemoryRecordStore, InMemoryAccessMatrix> {
        &self.registry
    }

    /// Persist the registry state and the advanced height.
    pub fn save(&self) -> anyhow::Result<()> {
        let file = SessionFile {
            height: self.height,
            ledger: self.registry.snapshot(),
        };
        let raw = serde_json::to_string_pretty(&file).context("cannot serialize ledger")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("cannot write ledger {}", self.path.display()))?;
        Ok(())
    }
}
