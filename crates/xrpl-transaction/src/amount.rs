//! XRP and issued-currency amounts.
//!
//! XRP amounts travel as integer strings of drops (`"10"`). Issued amounts
//! travel as objects `{"currency", "issuer", "value"}` where `value` is a
//! decimal string the ledger stores with a 16-digit mantissa and an
//! exponent in `-96..=80`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use xrpl_primitives::ClassicAddress;

use crate::currency::CurrencyCode;
use crate::TransactionError;

/// Total XRP supply in drops; no amount can exceed it.
pub const MAX_DROPS: u64 = 100_000_000_000 * 1_000_000;

/// Maximum significant digits of an issued value.
pub const MAX_SIGNIFICANT_DIGITS: usize = 16;

/// Smallest exponent of a normalized issued value.
pub const MIN_EXPONENT: i32 = -96;

/// Largest exponent of a normalized issued value.
pub const MAX_EXPONENT: i32 = 80;

/// An amount of XRP in drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct XrpDrops(u64);

impl XrpDrops {
    /// Create a drops amount, rejecting values above the total supply.
    pub fn new(drops: u64) -> Result<Self, TransactionError> {
        if drops > MAX_DROPS {
            return Err(TransactionError::InvalidAmount(format!(
                "{drops} drops exceeds the total XRP supply"
            )));
        }
        Ok(XrpDrops(drops))
    }

    /// The amount in drops.
    pub fn drops(&self) -> u64 {
        self.0
    }
}

impl FromStr for XrpDrops {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TransactionError::InvalidAmount(format!(
                "{s:?}: drops must be a non-negative integer"
            )));
        }
        let drops = s
            .parse::<u64>()
            .map_err(|e| TransactionError::InvalidAmount(format!("{s}: {e}")))?;
        XrpDrops::new(drops)
    }
}

impl TryFrom<String> for XrpDrops {
    type Error = TransactionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<XrpDrops> for String {
    fn from(drops: XrpDrops) -> Self {
        drops.0.to_string()
    }
}

impl fmt::Display for XrpDrops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated decimal value of an issued currency.
///
/// Keeps the string exactly as given so the node sees the caller's value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssuedValue {
    text: String,
    negative: bool,
    zero: bool,
}

impl IssuedValue {
    /// The value as sent to the node.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the value is zero (in any notation).
    pub fn is_zero(&self) -> bool {
        self.zero
    }

    /// Whether the value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.negative && !self.zero
    }

    /// Whether the value is strictly positive.
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.zero
    }
}

impl FromStr for IssuedValue {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| TransactionError::InvalidAmount(format!("{s:?}: {why}"));

        let (negative, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(pos) => {
                let exp = unsigned[pos + 1..]
                    .parse::<i32>()
                    .map_err(|_| invalid("malformed exponent"))?;
                (&unsigned[..pos], exp)
            }
            None => (unsigned, 0),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid("no digits"));
        }
        let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid("not a decimal number"));
        }

        let digits = format!("{int_part}{frac_part}");
        let leading_trimmed = digits.trim_start_matches('0');
        let significant = leading_trimmed.trim_end_matches('0');
        let zero = significant.is_empty();

        if significant.len() > MAX_SIGNIFICANT_DIGITS {
            return Err(invalid("more than 16 significant digits"));
        }

        if !zero {
            // Exponents may sit at the ends of the i32 range.
            let trailing_zeros = i64::try_from(leading_trimmed.len() - significant.len())
                .map_err(|_| invalid("value too large"))?;
            let frac_len =
                i64::try_from(frac_part.len()).map_err(|_| invalid("value too small"))?;
            let unused_digits = (MAX_SIGNIFICANT_DIGITS - significant.len()) as i64;
            let normalized = i64::from(exponent)
                .checked_sub(frac_len)
                .and_then(|n| n.checked_sub(unused_digits))
                .ok_or_else(|| invalid("value too small"))?
                .checked_add(trailing_zeros)
                .ok_or_else(|| invalid("value too large"))?;
            if normalized > i64::from(MAX_EXPONENT) {
                return Err(invalid("value too large"));
            }
            if normalized < i64::from(MIN_EXPONENT) {
                return Err(invalid("value too small"));
            }
        }

        Ok(IssuedValue {
            text: s.to_string(),
            negative,
            zero,
        })
    }
}

impl TryFrom<String> for IssuedValue {
    type Error = TransactionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IssuedValue> for String {
    fn from(value: IssuedValue) -> Self {
        value.text
    }
}

impl fmt::Display for IssuedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// An amount of an issued currency, identified by code and issuer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssuedCurrencyAmount {
    /// Currency code.
    pub currency: CurrencyCode,
    /// Account that issues the currency.
    pub issuer: ClassicAddress,
    /// Decimal value.
    pub value: IssuedValue,
}

impl IssuedCurrencyAmount {
    /// Build an issued amount.
    pub fn new(currency: CurrencyCode, issuer: ClassicAddress, value: IssuedValue) -> Self {
        IssuedCurrencyAmount {
            currency,
            issuer,
            value,
        }
    }
}

impl fmt::Display for IssuedCurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.value, self.currency, self.issuer)
    }
}

/// Either an XRP amount or an issued-currency amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// XRP, in drops.
    Xrp(XrpDrops),
    /// An issued currency.
    Issued(IssuedCurrencyAmount),
}

impl Amount {
    /// Whether the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        match self {
            Amount::Xrp(drops) => drops.drops() > 0,
            Amount::Issued(issued) => issued.value.is_positive(),
        }
    }
}

impl From<XrpDrops> for Amount {
    fn from(drops: XrpDrops) -> Self {
        Amount::Xrp(drops)
    }
}

impl From<IssuedCurrencyAmount> for Amount {
    fn from(issued: IssuedCurrencyAmount) -> Self {
        Amount::Issued(issued)
    }
}
