use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Credential material an [`ActorId`] is derived from.
///
/// The ledger never stores or compares raw credentials; only the derived
/// token ever appears in records or grants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentitySource {
    /// An ed25519-style public key (32 bytes) held by the actor.
    PublicKey([u8; 32]),
    /// A member identity issued by a registrar (e.g. a cooperative)
    /// under a human-readable label.
    Registered { registrar: [u8; 32], label: String },
}

/// Opaque authenticated identity token.
///
/// An `ActorId` is derived deterministically from [`IdentitySource`] using
/// domain-separated BLAKE3; the same material always produces the same
/// token. The execution environment authenticates callers and hands the
/// ledger an `ActorId` per call; the ledger itself only ever compares
/// tokens for equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId {
    token: [u8; 32],
}

impl ActorId {
    /// Derive an `ActorId` from credential material.
    pub fn derive(source: &IdentitySource) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"hvl-actor-v1:");
        match source {
            IdentitySource::PublicKey(pk) => {
                hasher.update(b"pubkey:");
                hasher.update(pk);
            }
            IdentitySource::Registered { registrar, label } => {
                hasher.update(b"registered:");
                hasher.update(registrar);
                hasher.update(b":");
                hasher.update(label.as_bytes());
            }
        }
        Self {
            token: *hasher.finalize().as_bytes(),
        }
    }

    /// Create an ephemeral (random) identity for tests and demos.
    pub fn ephemeral() -> Self {
        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        Self::derive(&IdentitySource::PublicKey(bytes))
    }

    /// The raw 32-byte token.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.token
    }

    /// Full hex-encoded string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.token)
    }

    /// Short identifier for logs (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("hv:{}", hex::encode(&self.token[..4]))
    }

    /// Parse from a hex string (64 hex characters, optional `hv:` prefix).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("hv:").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self { token: arr })
    }

    /// Create from a raw 32-byte token. Use `derive()` for production code.
    pub fn from_raw(token: [u8; 32]) -> Self {
        Self { token }
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.short_id())
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_is_deterministic() {
        let source = IdentitySource::PublicKey([42u8; 32]);
        let id1 = ActorId::derive(&source);
        let id2 = ActorId::derive(&source);
        assert_eq!(id1, id2);
    }

    #[test]
    fn different_material_produces_different_ids() {
        let id1 = ActorId::derive(&IdentitySource::PublicKey([1; 32]));
        let id2 = ActorId::derive(&IdentitySource::PublicKey([2; 32]));
        assert_ne!(id1, id2);
    }

    #[test]
    fn source_variants_are_domain_separated() {
        let bytes = [7u8; 32];
        let pubkey = ActorId::derive(&IdentitySource::PublicKey(bytes));
        let registered = ActorId::derive(&IdentitySource::Registered {
            registrar: bytes,
            label: String::new(),
        });
        assert_ne!(pubkey, registered);
    }

    #[test]
    fn registered_identity_includes_label() {
        let registrar = [5u8; 32];
        let id1 = ActorId::derive(&IdentitySource::Registered {
            registrar,
            label: "field-7-north".into(),
        });
        let id2 = ActorId::derive(&IdentitySource::Registered {
            registrar,
            label: "field-7-south".into(),
        });
        assert_ne!(id1, id2);
    }

    #[test]
    fn ephemeral_ids_are_unique() {
        let id1 = ActorId::ephemeral();
        let id2 = ActorId::ephemeral();
        assert_ne!(id1, id2);
    }

    #[test]
    fn short_id_format() {
        let id = ActorId::derive(&IdentitySource::PublicKey([0; 32]));
        let short = id.short_id();
        assert!(short.starts_with("hv:"));
        assert_eq!(short.len(), 11); // "hv:" + 8 hex chars
    }

    #[test]
    fn hex_roundtrip() {
        let id = ActorId::derive(&IdentitySource::PublicKey([99; 32]));
        let hex = id.to_hex();
        let parsed = ActorId::from_hex(&hex).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn hex_roundtrip_with_prefix() {
        let id = ActorId::derive(&IdentitySource::PublicKey([99; 32]));
        let prefixed = format!("hv:{}", id.to_hex());
        let parsed = ActorId::from_hex(&prefixed).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = ActorId::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        assert!(matches!(
            ActorId::from_hex("zz"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn serde_roundtrip() {
        let id = ActorId::derive(&IdentitySource::PublicKey([10; 32]));
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ActorId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn ordering_is_consistent() {
        let id1 = ActorId::from_raw([0; 32]);
        let id2 = ActorId::from_raw([1; 32]);
        assert!(id1 < id2);
    }
}
