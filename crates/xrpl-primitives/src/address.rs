//! Classic XRP Ledger account addresses.
//!
//! A classic address is the check-encoding of the version byte `0x00`
//! followed by the 20-byte account ID, e.g.
//! `rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::base58;
use crate::PrimitivesError;

/// Version prefix for account IDs.
pub const ACCOUNT_ID_PREFIX: u8 = 0x00;

/// Length of an account ID in bytes.
pub const ACCOUNT_ID_LEN: usize = 20;

/// A validated classic address.
///
/// Keeps the original string form alongside the decoded account ID so that
/// the address can be echoed back to the node exactly as configured.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassicAddress {
    encoded: String,
    account_id: [u8; ACCOUNT_ID_LEN],
}

impl ClassicAddress {
    /// Build an address from a raw 20-byte account ID.
    pub fn from_account_id(account_id: [u8; ACCOUNT_ID_LEN]) -> Self {
        let mut data = Vec::with_capacity(1 + ACCOUNT_ID_LEN);
        data.push(ACCOUNT_ID_PREFIX);
        data.extend_from_slice(&account_id);
        ClassicAddress {
            encoded: base58::check_encode(&data),
            account_id,
        }
    }

    /// The 20-byte account ID this address encodes.
    pub fn account_id(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.account_id
    }

    /// The `r...` string form.
    pub fn as_str(&self) -> &str {
        &self.encoded
    }
}

impl FromStr for ClassicAddress {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.starts_with('r') {
            return Err(PrimitivesError::InvalidAddress(format!(
                "{s}: classic addresses start with 'r'"
            )));
        }
        let payload = base58::check_decode(s)?;
        if payload.len() != 1 + ACCOUNT_ID_LEN {
            return Err(PrimitivesError::InvalidLength {
                expected: 1 + ACCOUNT_ID_LEN,
                got: payload.len(),
            });
        }
        if payload[0] != ACCOUNT_ID_PREFIX {
            return Err(PrimitivesError::InvalidAddress(format!(
                "{s}: unexpected version byte {:#04x}",
                payload[0]
            )));
        }
        let mut account_id = [0u8; ACCOUNT_ID_LEN];
        account_id.copy_from_slice(&payload[1..]);
        Ok(ClassicAddress {
            encoded: s.to_string(),
            account_id,
        })
    }
}

impl TryFrom<String> for ClassicAddress {
    type Error = PrimitivesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClassicAddress> for String {
    fn from(address: ClassicAddress) -> Self {
        address.encoded
    }
}

impl AsRef<str> for ClassicAddress {
    fn as_ref(&self) -> &str {
        &self.encoded
    }
}

impl fmt::Display for ClassicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl fmt::Debug for ClassicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassicAddress({})", self.encoded)
    }
}
