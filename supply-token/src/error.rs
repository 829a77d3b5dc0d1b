//! Error types for configuration loading and the issuance flow.

use std::path::PathBuf;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A `${VAR}` placeholder names an unset environment variable.
    #[error("environment variable '{name}' is not set (referenced at position {position})")]
    MissingEnvVar {
        /// Variable name.
        name: String,
        /// Byte offset of the placeholder.
        position: usize,
    },

    /// A `${` placeholder is never closed or names nothing.
    #[error("malformed environment placeholder at position {0}")]
    MalformedPlaceholder(usize),

    /// A required setting is absent.
    #[error("missing setting: {0}")]
    Missing(&'static str),

    /// A setting has an unusable value.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Dotted setting name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors raised by the issuance flow.
#[derive(Debug, thiserror::Error)]
pub enum IssuanceError {
    /// A query or submission failed.
    #[error(transparent)]
    Rpc(#[from] xrpl_rpc::RpcError),

    /// Signing or credential resolution failed.
    #[error(transparent)]
    Wallet(#[from] xrpl_wallet::WalletError),

    /// A transaction or amount was invalid.
    #[error(transparent)]
    Transaction(#[from] xrpl_transaction::TransactionError),

    /// Configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The expiry bound does not fit a ledger index.
    #[error("ledger index {ledger_index} plus offset {offset} overflows")]
    LedgerIndexOverflow {
        /// Current ledger index.
        ledger_index: u32,
        /// Configured offset.
        offset: u32,
    },
}
