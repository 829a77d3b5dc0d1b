//! Error types for JSON-RPC operations.

/// Errors that can occur when talking to a rippled node.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize or deserialize data.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Server returned a non-2xx response.
    #[error("server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code.
        status_code: u16,
        /// Response body.
        message: String,
    },

    /// The node answered with `status: "error"`.
    #[error("node error {error}: {message}")]
    Node {
        /// Error token, e.g. `actNotFound`.
        error: String,
        /// Numeric error code, when present.
        code: Option<i32>,
        /// Human-readable message, or the token when the node sent none.
        message: String,
    },

    /// A field the caller relies on was absent from the response.
    #[error("missing field in response: {0}")]
    MissingField(&'static str),

    /// Submission was rejected as malformed (`tem` class).
    #[error("transaction {hash} malformed ({engine_result}): {message}")]
    Malformed {
        /// Transaction hash.
        hash: String,
        /// Preliminary engine result, e.g. `temBAD_FEE`.
        engine_result: String,
        /// Engine result message.
        message: String,
    },

    /// Transaction was validated with a result other than `tesSUCCESS`.
    #[error("transaction {hash} failed: {result}")]
    Failed {
        /// Transaction hash.
        hash: String,
        /// Final transaction result, e.g. `tecNO_LINE`.
        result: String,
    },

    /// The validated ledger passed the transaction's `LastLedgerSequence`.
    #[error(
        "transaction {hash} expired: latest validated ledger {validated_ledger} \
         is greater than LastLedgerSequence {last_ledger_sequence}"
    )]
    Expired {
        /// Transaction hash.
        hash: String,
        /// Expiry bound carried by the transaction.
        last_ledger_sequence: u32,
        /// Latest validated ledger index at the time of the check.
        validated_ledger: u32,
    },
}

impl RpcError {
    /// Whether this is a node error with the given token.
    pub fn is_node_error(&self, token: &str) -> bool {
        matches!(self, RpcError::Node { error, .. } if error == token)
    }
}
