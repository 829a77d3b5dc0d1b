//! Account credentials.

use xrpl_primitives::{ClassicAddress, KeyType, Seed};

use crate::error::WalletError;

/// A seed together with the classic address it controls.
///
/// Immutable once built. The seed is only ever handed to the signing node;
/// `Debug` output redacts it.
#[derive(Debug, Clone)]
pub struct Wallet {
    seed: Seed,
    classic_address: ClassicAddress,
    public_key_hex: Option<String>,
}

impl Wallet {
    /// Pair a seed with its known address.
    pub fn new(seed: Seed, classic_address: ClassicAddress) -> Self {
        Wallet {
            seed,
            classic_address,
            public_key_hex: None,
        }
    }

    /// Parse and pair an encoded seed and address.
    pub fn from_parts(seed: &str, classic_address: &str) -> Result<Self, WalletError> {
        Ok(Wallet::new(seed.parse()?, classic_address.parse()?))
    }

    /// Attach the public key reported by the node.
    pub fn with_public_key(mut self, public_key_hex: impl Into<String>) -> Self {
        self.public_key_hex = Some(public_key_hex.into());
        self
    }

    /// The seed.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// The account address.
    pub fn classic_address(&self) -> &ClassicAddress {
        &self.classic_address
    }

    /// Key algorithm encoded by the seed.
    pub fn key_type(&self) -> KeyType {
        self.seed.key_type()
    }

    /// Hex-encoded public key, when the node reported one.
    pub fn public_key_hex(&self) -> Option<&str> {
        self.public_key_hex.as_deref()
    }
}
