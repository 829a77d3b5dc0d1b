//! Reliable submission: submit a signed transaction and wait until the
//! network reports a terminal outcome.
//!
//! A transaction is final once it appears in a validated ledger, or once
//! the latest validated ledger is past its `LastLedgerSequence` (it can no
//! longer be included anywhere).

use tracing::{debug, info};

use crate::client::JsonRpcClient;
use crate::error::RpcError;
use crate::types::{SignedTransaction, TxResponse};

/// Preliminary result class for malformed transactions.
const MALFORMED_PREFIX: &str = "tem";

/// Final result code of a successful transaction.
const SUCCESS: &str = "tesSUCCESS";

/// Node error returned by `tx` while the transaction is not in any ledger.
const TXN_NOT_FOUND: &str = "txnNotFound";

impl JsonRpcClient {
    /// Submit a signed transaction and block until it is validated or expired.
    ///
    /// # Returns
    /// The validated `tx` response when the final result is `tesSUCCESS`.
    /// Fails with [`RpcError::Malformed`] on a `tem` preliminary result,
    /// [`RpcError::Failed`] on any other validated result, and
    /// [`RpcError::Expired`] once the validated ledger passes the expiry bound.
    pub async fn submit_and_wait(
        &self,
        signed: &SignedTransaction,
    ) -> Result<TxResponse, RpcError> {
        let submitted = self.submit(&signed.tx_blob).await?;
        info!(
            hash = %signed.hash,
            engine_result = %submitted.engine_result,
            "transaction submitted"
        );

        if submitted.engine_result.starts_with(MALFORMED_PREFIX) {
            return Err(RpcError::Malformed {
                hash: signed.hash.clone(),
                engine_result: submitted.engine_result,
                message: submitted.engine_result_message.unwrap_or_default(),
            });
        }

        self.wait_for_final_outcome(&signed.hash, signed.last_ledger_sequence)
            .await
    }

    /// Poll `tx` until the transaction is validated or can no longer be.
    ///
    /// A validated transaction is always reported with its result, even when
    /// the validated ledger has already moved past `last_ledger_sequence`.
    /// Expiry is only declared when the transaction is still unvalidated
    /// after the bound has passed.
    pub async fn wait_for_final_outcome(
        &self,
        hash: &str,
        last_ledger_sequence: u32,
    ) -> Result<TxResponse, RpcError> {
        loop {
            tokio::time::sleep(self.config().poll_interval).await;

            if let Some(resp) = self.validated_tx(hash).await? {
                return settle(hash, resp);
            }

            let validated_ledger = self.validated_ledger_index().await?;
            if validated_ledger > last_ledger_sequence {
                // It may have been validated between the two lookups.
                if let Some(resp) = self.validated_tx(hash).await? {
                    return settle(hash, resp);
                }
                return Err(RpcError::Expired {
                    hash: hash.to_string(),
                    last_ledger_sequence,
                    validated_ledger,
                });
            }
            debug!(hash, validated_ledger, last_ledger_sequence, "waiting for validation");
        }
    }

    /// The `tx` response once validated; `None` while not found or pending.
    async fn validated_tx(&self, hash: &str) -> Result<Option<TxResponse>, RpcError> {
        match self.tx(hash).await {
            Ok(resp) if resp.validated => Ok(Some(resp)),
            Ok(_) => {
                debug!(hash, "transaction not validated yet");
                Ok(None)
            }
            Err(e) if e.is_node_error(TXN_NOT_FOUND) => {
                debug!(hash, "transaction not found yet");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

/// Turn a validated `tx` response into the final outcome.
fn settle(hash: &str, resp: TxResponse) -> Result<TxResponse, RpcError> {
    let result = resp
        .transaction_result()
        .ok_or(RpcError::MissingField("meta.TransactionResult"))?;
    if result != SUCCESS {
        return Err(RpcError::Failed {
            hash: hash.to_string(),
            result: result.to_string(),
        });
    }

    info!(hash, ledger_index = ?resp.ledger_index, "transaction validated");
    Ok(resp)
}
