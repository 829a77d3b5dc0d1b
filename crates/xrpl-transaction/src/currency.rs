//! Currency codes for issued (non-XRP) assets.
//!
//! Two forms are accepted:
//! - a standard 3-character code made of ASCII letters, digits and
//!   `?!@#$%^&*<>(){}[]|`, excluding `XRP`;
//! - a nonstandard 160-bit code written as 40 hex digits, whose first byte
//!   must not be `0x00` (that prefix is reserved for standard codes).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TransactionError;

/// Symbols allowed in standard codes besides ASCII alphanumerics.
const STANDARD_SYMBOLS: &str = "?!@#$%^&*<>(){}[]|";

/// Length of a standard currency code.
pub const STANDARD_CODE_LEN: usize = 3;

/// Length of a hex-encoded nonstandard currency code.
pub const HEX_CODE_LEN: usize = 40;

/// A validated currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// The code as sent to the node.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a 3-character standard code.
    pub fn is_standard(&self) -> bool {
        self.0.len() == STANDARD_CODE_LEN
    }
}

impl FromStr for CurrencyCode {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.len() {
            STANDARD_CODE_LEN => {
                if s == "XRP" {
                    return Err(TransactionError::InvalidCurrency(
                        "XRP is not an issued currency".to_string(),
                    ));
                }
                let valid = s
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || STANDARD_SYMBOLS.contains(c));
                if !valid {
                    return Err(TransactionError::InvalidCurrency(format!(
                        "{s}: unsupported character in standard code"
                    )));
                }
                Ok(CurrencyCode(s.to_string()))
            }
            HEX_CODE_LEN => {
                let bytes = hex::decode(s).map_err(|e| {
                    TransactionError::InvalidCurrency(format!("{s}: {e}"))
                })?;
                if bytes[0] == 0 {
                    return Err(TransactionError::InvalidCurrency(format!(
                        "{s}: nonstandard codes must not start with 0x00"
                    )));
                }
                Ok(CurrencyCode(s.to_ascii_uppercase()))
            }
            n => Err(TransactionError::InvalidCurrency(format!(
                "{s}: expected 3 characters or 40 hex digits, got {n}"
            ))),
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = TransactionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
