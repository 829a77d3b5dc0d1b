/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The currency code is neither a standard 3-character code nor 40 hex digits.
    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),
    /// An amount string could not be parsed or is out of range.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// A field required before signing was not set.
    #[error("missing field: {0}")]
    MissingField(&'static str),
    /// The transaction is structurally invalid (e.g. a payment to itself).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// JSON conversion failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
