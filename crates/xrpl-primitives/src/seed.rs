//! Family seeds and the signing key type they encode.
//!
//! A seed carries 16 bytes of entropy behind a version prefix. The prefix
//! also fixes the key algorithm the node will derive from it:
//!
//! | Prefix      | Payload | Key type  | Encoded form |
//! |-------------|---------|-----------|--------------|
//! | `01 E1 4B`  | 19 B    | Ed25519   | `sEd...`     |
//! | `21`        | 17 B    | secp256k1 | `s...`       |
//!
//! Only the encoding is checked here; no keys are derived locally.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::base58;
use crate::PrimitivesError;

/// Version prefix for Ed25519 seeds.
pub const ED25519_SEED_PREFIX: [u8; 3] = [0x01, 0xE1, 0x4B];

/// Version prefix for secp256k1 seeds.
pub const SECP256K1_SEED_PREFIX: u8 = 0x21;

/// Length of seed entropy in bytes.
pub const SEED_ENTROPY_LEN: usize = 16;

/// Signing algorithm encoded by a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Ed25519 keys.
    Ed25519,
    /// ECDSA over secp256k1.
    Secp256k1,
}

impl KeyType {
    /// Name used by the node's `key_type` request field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::Secp256k1 => "secp256k1",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated family seed.
///
/// The encoded secret is wiped from memory on drop and never printed by
/// `Debug`.
#[derive(Clone)]
pub struct Seed {
    secret: Zeroizing<String>,
    key_type: KeyType,
}

impl Seed {
    /// The key type this seed encodes.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// The encoded `s...` secret, for handing to the signing node.
    pub fn expose_secret(&self) -> &str {
        &self.secret
    }
}

impl FromStr for Seed {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.starts_with('s') {
            return Err(PrimitivesError::InvalidSeed(
                "family seeds start with 's'".to_string(),
            ));
        }
        let payload = Zeroizing::new(base58::check_decode(s)?);
        let key_type = match payload.len() {
            n if n == ED25519_SEED_PREFIX.len() + SEED_ENTROPY_LEN
                && payload[..3] == ED25519_SEED_PREFIX =>
            {
                KeyType::Ed25519
            }
            n if n == 1 + SEED_ENTROPY_LEN && payload[0] == SECP256K1_SEED_PREFIX => {
                KeyType::Secp256k1
            }
            n => {
                return Err(PrimitivesError::InvalidSeed(format!(
                    "unrecognized seed prefix ({n}-byte payload)"
                )))
            }
        };
        Ok(Seed {
            secret: Zeroizing::new(s.to_string()),
            key_type,
        })
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("secret", &"<redacted>")
            .field("key_type", &self.key_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ED25519_SEED: &str = "sEdSKaCy2JT7JaM7v95H9SxkhP9wS2r";
    const SECP256K1_SEED: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";

    #[test]
    fn test_ed25519_seed() {
        let seed: Seed = ED25519_SEED.parse().unwrap();
        assert_eq!(seed.key_type(), KeyType::Ed25519);
        assert_eq!(seed.expose_secret(), ED25519_SEED);
    }

    #[test]
    fn test_secp256k1_seed() {
        let seed: Seed = SECP256K1_SEED.parse().unwrap();
        assert_eq!(seed.key_type(), KeyType::Secp256k1);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let seed: Seed = format!("  {ED25519_SEED}\n").parse().unwrap();
        assert_eq!(seed.expose_secret(), ED25519_SEED);
    }

    #[test]
    fn test_address_is_not_a_seed() {
        assert!("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".parse::<Seed>().is_err());
    }

    #[test]
    fn test_corrupted_seed() {
        let err = "sEdSKaCy2JT7JaM7v95H9SxkhP9wS2s".parse::<Seed>().unwrap_err();
        assert!(matches!(err, PrimitivesError::ChecksumMismatch));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let seed: Seed = ED25519_SEED.parse().unwrap();
        let dbg = format!("{seed:?}");
        assert!(!dbg.contains(ED25519_SEED));
        assert!(dbg.contains("redacted"));
    }

    #[test]
    fn test_key_type_wire_name() {
        assert_eq!(KeyType::Ed25519.as_str(), "ed25519");
        assert_eq!(
            serde_json::to_string(&KeyType::Secp256k1).unwrap(),
            "\"secp256k1\""
        );
    }
}
