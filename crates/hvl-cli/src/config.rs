use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default session file path when neither flag nor config names one.
pub const DEFAULT_LEDGER_PATH: &str = "hvl-ledger.json";

/// Config file looked up in the working directory when `--config` is not
/// passed.
pub const DEFAULT_CONFIG_PATH: &str = "hvl.toml";

/// CLI configuration, loaded from a toml file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default ledger session file.
    pub ledger: Option<PathBuf>,
    /// Default caller identity (hex ActorId) when `--as` is not passed.
    pub identity: Option<String>,
}

impl CliConfig {
    /// Load from an explicit path; the file must exist and parse.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("cannot parse config {}", path.display()))
    }

    /// Load `hvl.toml` from the working directory if present, otherwise
    /// fall back to defaults.
    pub fn load_default() -> anyhow::Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let config = CliConfig::default();
        assert!(config.ledger.is_none());
        assert!(config.identity.is_none());
    }

    #[test]
    fn toml_roundtrip() {
        let config = CliConfig {
            ledger: Some(PathBuf::from("/var/hvl/ledger.json")),
            identity: Some("ab".repeat(32)),
        };
        let raw = toml::to_string(&config).unwrap();
        let parsed: CliConfig = toml::from_str(&raw).unwrap();
        assert_eq!(parsed.ledger, config.ledger);
        assert_eq!(parsed.identity, config.identity);
    }

    #[test]
    fn partial_toml_parses() {
        let parsed: CliConfig = toml::from_str("identity = \"ff\"").unwrap();
        assert_eq!(parsed.identity, Some("ff".into()));
        assert!(parsed.ledger.is_none());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hvl.toml");
        std::fs::write(&path, "ledger = \"my-ledger.json\"\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.ledger, Some(PathBuf::from("my-ledger.json")));
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(CliConfig::load(Path::new("/nonexistent/hvl.toml")).is_err());
    }
}
