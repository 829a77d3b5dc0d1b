/// XRP Ledger transaction models.
///
/// Provides currency codes, XRP and issued-currency amounts, and the
/// `Transaction` type covering `TrustSet` and `Payment`, with validation
/// and conversion to the node's `tx_json` form. Binary serialization and
/// signing are left to the node.

pub mod currency;
pub mod amount;
pub mod transaction;

mod error;
pub use error::TransactionError;
pub use currency::CurrencyCode;
pub use amount::{Amount, IssuedCurrencyAmount, IssuedValue, XrpDrops};
pub use transaction::{Transaction, TransactionKind};
