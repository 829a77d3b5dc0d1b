//! JSON-RPC HTTP client for rippled's public API methods.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;
use xrpl_primitives::{ClassicAddress, Seed};

use crate::error::RpcError;
use crate::types::{
    AccountInfoResponse, FeeResponse, LedgerResponse, RpcConfig, SignResponse, SubmitResponse,
    TxResponse, WalletProposeResponse,
};

/// Request envelope: rippled takes a single params object inside an array.
#[derive(Serialize)]
struct RpcRequest<'a> {
    method: &'a str,
    params: [Value; 1],
}

/// HTTP client for a rippled JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    /// Client configuration.
    config: RpcConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl JsonRpcClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RpcConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// The client configuration.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Fetch the default `ledger` view (no ledger selector).
    ///
    /// Nodes answer this with the legacy `closed`/`open` sections; use
    /// [`LedgerResponse::closed_ledger_index`] to read the index.
    pub async fn ledger(&self) -> Result<LedgerResponse, RpcError> {
        self.request("ledger", json!({})).await
    }

    /// Index of the most recent validated ledger.
    pub async fn validated_ledger_index(&self) -> Result<u32, RpcError> {
        let resp: LedgerResponse = self
            .request("ledger", json!({ "ledger_index": "validated" }))
            .await?;
        resp.ledger_index
            .or_else(|| resp.ledger.as_ref().and_then(|l| l.ledger_index))
            .ok_or(RpcError::MissingField("ledger_index"))
    }

    /// Fetch an account's root entry from the current open ledger.
    pub async fn account_info(
        &self,
        account: &ClassicAddress,
    ) -> Result<AccountInfoResponse, RpcError> {
        self.request(
            "account_info",
            json!({ "account": account.as_str(), "ledger_index": "current" }),
        )
        .await
    }

    /// Fetch the current transaction cost levels.
    pub async fn fee(&self) -> Result<FeeResponse, RpcError> {
        self.request("fee", json!({})).await
    }

    /// Ask the node for the address belonging to a seed.
    ///
    /// `wallet_propose` is an admin method on most public servers.
    pub async fn wallet_propose(&self, seed: &Seed) -> Result<WalletProposeResponse, RpcError> {
        self.request(
            "wallet_propose",
            json!({
                "seed": seed.expose_secret(),
                "key_type": seed.key_type().as_str(),
            }),
        )
        .await
    }

    /// Have the node sign a fully specified transaction.
    ///
    /// Signing runs in offline mode: the node does not fill in `Sequence`,
    /// `Fee` or `LastLedgerSequence`, so `tx_json` must already carry them.
    pub async fn sign(&self, tx_json: &Value, seed: &Seed) -> Result<SignResponse, RpcError> {
        self.request(
            "sign",
            json!({
                "tx_json": tx_json,
                "seed": seed.expose_secret(),
                "key_type": seed.key_type().as_str(),
                "offline": true,
            }),
        )
        .await
    }

    /// Submit a signed transaction blob.
    pub async fn submit(&self, tx_blob: &str) -> Result<SubmitResponse, RpcError> {
        self.request("submit", json!({ "tx_blob": tx_blob })).await
    }

    /// Look up a transaction by hash.
    pub async fn tx(&self, hash: &str) -> Result<TxResponse, RpcError> {
        self.request("tx", json!({ "transaction": hash })).await
    }

    /// Call a JSON-RPC method and deserialize its `result`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, RpcError> {
        let result = self.request_raw(method, params).await?;
        let parsed = serde_json::from_value(result)?;
        Ok(parsed)
    }

    /// Call a JSON-RPC method and return its `result` object untouched.
    pub async fn request_raw(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        debug!(method, url = %self.config.url, "rpc request");

        let body = RpcRequest {
            method,
            params: [params],
        };

        let resp = self.client.post(&self.config.url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RpcError::ServerError {
                status_code: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        let mut envelope: Value = serde_json::from_str(&text)?;
        let result = envelope
            .get_mut("result")
            .map(Value::take)
            .ok_or(RpcError::MissingField("result"))?;

        if result.get("status").and_then(Value::as_str) == Some("error") {
            return Err(node_error(&result));
        }

        Ok(result)
    }
}

/// Build an [`RpcError::Node`] from an error result.
fn node_error(result: &Value) -> RpcError {
    let error = result
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let code = result
        .get("error_code")
        .and_then(Value::as_i64)
        .and_then(|c| i32::try_from(c).ok());
    let message = result
        .get("error_message")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| error.clone());
    RpcError::Node {
        error,
        code,
        message,
    }
}
