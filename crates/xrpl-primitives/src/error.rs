/// Unified error type for all primitives operations.
///
/// Covers encoding failures and malformed addresses or seeds.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("invalid payload length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
}
