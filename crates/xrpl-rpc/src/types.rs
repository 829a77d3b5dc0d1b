//! JSON-RPC data types: client configuration and the response shapes of the
//! methods this crate calls.
//!
//! Response structs keep the fields callers read as typed members and carry
//! everything else in a flattened `extra` map, so serializing a response
//! reproduces what the node sent.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::RpcError;

/// Public XRP Ledger testnet JSON-RPC endpoint.
pub const TESTNET_URL: &str = "https://s.altnet.rippletest.net:51234/";

/// Configuration for a [`JsonRpcClient`](crate::JsonRpcClient).
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,
    /// Delay between polls while waiting for a submitted transaction.
    pub poll_interval: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: TESTNET_URL.to_string(),
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Ledger indexes arrive as JSON numbers from current nodes and as decimal
/// strings in the legacy `closed`/`open` ledger format.
fn deserialize_ledger_index<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Header fields of a ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerHeader {
    /// Ledger sequence number.
    #[serde(default, deserialize_with = "deserialize_ledger_index")]
    pub ledger_index: Option<u32>,
    /// Ledger hash.
    #[serde(default)]
    pub ledger_hash: Option<String>,
    /// Whether the ledger is closed.
    #[serde(default)]
    pub closed: Option<bool>,
    /// Remaining header fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wrapper used by the legacy `closed`/`open` sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSection {
    /// The ledger in this section.
    #[serde(default)]
    pub ledger: Option<LedgerHeader>,
}

/// Result of the `ledger` method.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerResponse {
    /// Index of the requested ledger.
    #[serde(default, deserialize_with = "deserialize_ledger_index")]
    pub ledger_index: Option<u32>,
    /// The requested ledger.
    #[serde(default)]
    pub ledger: Option<LedgerHeader>,
    /// Last closed ledger (legacy format for requests without a selector).
    #[serde(default)]
    pub closed: Option<LedgerSection>,
    /// Current open ledger (legacy format).
    #[serde(default)]
    pub open: Option<LedgerSection>,
    /// Whether the returned ledger is validated.
    #[serde(default)]
    pub validated: Option<bool>,
    /// Remaining result fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LedgerResponse {
    /// Index of the last closed ledger.
    ///
    /// Reads `closed.ledger.ledger_index` and falls back to
    /// `ledger.ledger_index` and then the top-level `ledger_index`.
    pub fn closed_ledger_index(&self) -> Option<u32> {
        self.closed
            .as_ref()
            .and_then(|s| s.ledger.as_ref())
            .and_then(|l| l.ledger_index)
            .or_else(|| self.ledger.as_ref().and_then(|l| l.ledger_index))
            .or(self.ledger_index)
    }
}

/// The `AccountRoot` ledger entry returned by `account_info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRoot {
    /// Classic address of the account.
    pub account: String,
    /// Next sequence number to use for a transaction from this account.
    pub sequence: u32,
    /// XRP balance in drops.
    #[serde(default)]
    pub balance: Option<String>,
    /// Number of owned objects (trust lines, offers, ...).
    #[serde(default)]
    pub owner_count: Option<u32>,
    /// Remaining entry fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of the `account_info` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfoResponse {
    /// The account's root entry.
    pub account_data: AccountRoot,
    /// Index of the open ledger the data was read from.
    #[serde(default)]
    pub ledger_current_index: Option<u32>,
    /// Whether the data comes from a validated ledger.
    #[serde(default)]
    pub validated: Option<bool>,
}

/// Fee levels in drops, as reported by the `fee` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeDrops {
    /// Transaction cost of a reference transaction.
    pub base_fee: String,
    /// Median fee of transactions in the last validated ledger.
    #[serde(default)]
    pub median_fee: Option<String>,
    /// Minimum fee to enter the transaction queue.
    #[serde(default)]
    pub minimum_fee: Option<String>,
    /// Minimum fee to enter the current open ledger.
    #[serde(default)]
    pub open_ledger_fee: Option<String>,
}

/// Result of the `fee` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeResponse {
    /// Fee levels in drops.
    pub drops: FeeDrops,
    /// Index of the current open ledger.
    #[serde(default)]
    pub ledger_current_index: Option<u32>,
}

/// Result of the `wallet_propose` method for a given seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletProposeResponse {
    /// Classic address derived from the seed.
    pub account_id: String,
    /// Public key, hex-encoded.
    #[serde(default)]
    pub public_key_hex: Option<String>,
    /// Key type the node used.
    #[serde(default)]
    pub key_type: Option<String>,
}

/// Result of the `sign` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignResponse {
    /// Signed transaction in binary form, hex-encoded.
    pub tx_blob: String,
    /// Signed transaction in JSON form, including its `hash`.
    pub tx_json: Value,
}

impl SignResponse {
    /// Extract what is needed to submit and track the transaction.
    pub fn into_signed(self) -> Result<SignedTransaction, RpcError> {
        let hash = self
            .tx_json
            .get("hash")
            .and_then(Value::as_str)
            .ok_or(RpcError::MissingField("tx_json.hash"))?
            .to_string();
        let last_ledger_sequence = self
            .tx_json
            .get("LastLedgerSequence")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(RpcError::MissingField("tx_json.LastLedgerSequence"))?;
        Ok(SignedTransaction {
            tx_blob: self.tx_blob,
            hash,
            last_ledger_sequence,
            tx_json: self.tx_json,
        })
    }
}

/// A signed transaction ready for submission.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    /// Binary form, hex-encoded.
    pub tx_blob: String,
    /// Transaction hash.
    pub hash: String,
    /// Expiry bound the transaction was signed with.
    pub last_ledger_sequence: u32,
    /// Signed JSON form.
    pub tx_json: Value,
}

/// Result of the `submit` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// Preliminary result code, e.g. `tesSUCCESS` or `terQUEUED`.
    pub engine_result: String,
    /// Numeric form of `engine_result`.
    #[serde(default)]
    pub engine_result_code: Option<i32>,
    /// Human-readable description of `engine_result`.
    #[serde(default)]
    pub engine_result_message: Option<String>,
    /// Whether the transaction was accepted into the open ledger or queue.
    #[serde(default)]
    pub accepted: Option<bool>,
    /// Remaining result fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Transaction metadata attached once a transaction is in a ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxMeta {
    /// Final result code, e.g. `tesSUCCESS`.
    #[serde(rename = "TransactionResult")]
    pub transaction_result: String,
    /// Remaining metadata fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of the `tx` method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxResponse {
    /// Transaction hash.
    #[serde(default)]
    pub hash: String,
    /// Whether the ledger containing the transaction is validated.
    #[serde(default)]
    pub validated: bool,
    /// Ledger the transaction is included in.
    #[serde(default, deserialize_with = "deserialize_ledger_index")]
    pub ledger_index: Option<u32>,
    /// Transaction metadata, absent until the transaction is in a ledger.
    #[serde(default)]
    pub meta: Option<TxMeta>,
    /// Remaining result fields (the transaction's own fields included).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TxResponse {
    /// Final result code, when the node has reported one.
    pub fn transaction_result(&self) -> Option<&str> {
        self.meta.as_ref().map(|m| m.transaction_result.as_str())
    }
}
