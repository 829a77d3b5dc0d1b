//! The ledger operations the issuance flow depends on.
//!
//! [`LedgerFacade`] is the seam between the flow and the network, so the
//! flow can be driven by a stub in tests. [`RpcLedger`] is the real
//! implementation over a rippled JSON-RPC endpoint.

use tracing::debug;
use xrpl_primitives::ClassicAddress;
use xrpl_rpc::{JsonRpcClient, RpcError, TxResponse};
use xrpl_transaction::{Transaction, XrpDrops};
use xrpl_wallet::{NodeSigner, TransactionSigner, Wallet};

use crate::error::IssuanceError;

/// Queries and submissions against an XRP Ledger.
pub trait LedgerFacade {
    /// Index of the most recently closed ledger.
    fn current_ledger_index(
        &self,
    ) -> impl std::future::Future<Output = Result<u32, IssuanceError>> + Send;

    /// Next sequence number of `account`, read from the current open ledger.
    fn account_sequence(
        &self,
        account: &ClassicAddress,
    ) -> impl std::future::Future<Output = Result<u32, IssuanceError>> + Send;

    /// Current base transaction cost.
    fn base_fee(&self) -> impl std::future::Future<Output = Result<XrpDrops, IssuanceError>> + Send;

    /// Sign `tx` with `wallet`, submit it and wait for a final outcome.
    fn sign_and_submit(
        &self,
        tx: &Transaction,
        wallet: &Wallet,
    ) -> impl std::future::Future<Output = Result<TxResponse, IssuanceError>> + Send;
}

/// [`LedgerFacade`] over JSON-RPC.
#[derive(Debug, Clone)]
pub struct RpcLedger<S = NodeSigner> {
    client: JsonRpcClient,
    signer: S,
}

impl RpcLedger<NodeSigner> {
    /// Query and sign through the same node.
    pub fn new(client: JsonRpcClient) -> Self {
        let signer = NodeSigner::new(client.clone());
        Self { client, signer }
    }
}

impl<S: TransactionSigner> RpcLedger<S> {
    /// Query through `client` and sign with `signer`.
    pub fn with_signer(client: JsonRpcClient, signer: S) -> Self {
        Self { client, signer }
    }

    /// The underlying client.
    pub fn client(&self) -> &JsonRpcClient {
        &self.client
    }
}

impl<S: TransactionSigner + Sync> LedgerFacade for RpcLedger<S> {
    async fn current_ledger_index(&self) -> Result<u32, IssuanceError> {
        let ledger = self.client.ledger().await?;
        debug!(response = ?ledger, "ledger");
        Ok(ledger
            .closed_ledger_index()
            .ok_or(RpcError::MissingField("closed.ledger.ledger_index"))?)
    }

    async fn account_sequence(&self, account: &ClassicAddress) -> Result<u32, IssuanceError> {
        let info = self.client.account_info(account).await?;
        debug!(%account, sequence = info.account_data.sequence, "account_info");
        Ok(info.account_data.sequence)
    }

    async fn base_fee(&self) -> Result<XrpDrops, IssuanceError> {
        let fee = self.client.fee().await?;
        debug!(base_fee = %fee.drops.base_fee, "fee");
        Ok(fee.drops.base_fee.parse::<XrpDrops>()?)
    }

    async fn sign_and_submit(
        &self,
        tx: &Transaction,
        wallet: &Wallet,
    ) -> Result<TxResponse, IssuanceError> {
        let signed = self.signer.sign(tx, wallet).await?;
        Ok(self.client.submit_and_wait(&signed).await?)
    }
}
