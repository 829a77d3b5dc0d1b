//! Transaction signing.
//!
//! Keys never leave the signing node: [`NodeSigner`] sends the seed along
//! with the unsigned transaction to the node's `sign` method and gets back
//! the signed blob and its hash.

use tracing::debug;
use xrpl_primitives::{ClassicAddress, Seed};
use xrpl_rpc::{JsonRpcClient, SignedTransaction};
use xrpl_transaction::Transaction;

use crate::error::WalletError;
use crate::wallet::Wallet;

/// Signs transactions on behalf of a wallet.
pub trait TransactionSigner {
    /// Validate and sign `tx` with `wallet`'s credentials.
    fn sign(
        &self,
        tx: &Transaction,
        wallet: &Wallet,
    ) -> impl std::future::Future<Output = Result<SignedTransaction, WalletError>> + Send;
}

/// Signer backed by a rippled node.
#[derive(Debug, Clone)]
pub struct NodeSigner {
    client: JsonRpcClient,
}

impl NodeSigner {
    /// Create a signer using the given node client.
    pub fn new(client: JsonRpcClient) -> Self {
        Self { client }
    }

    /// Build a wallet for `seed`, asking the node which address it controls.
    pub async fn resolve_wallet(&self, seed: Seed) -> Result<Wallet, WalletError> {
        let proposed = self.client.wallet_propose(&seed).await?;
        let address: ClassicAddress = proposed.account_id.parse()?;
        let wallet = Wallet::new(seed, address);
        Ok(match proposed.public_key_hex {
            Some(key) => wallet.with_public_key(key),
            None => wallet,
        })
    }
}

impl TransactionSigner for NodeSigner {
    async fn sign(
        &self,
        tx: &Transaction,
        wallet: &Wallet,
    ) -> Result<SignedTransaction, WalletError> {
        if &tx.account != wallet.classic_address() {
            return Err(WalletError::AccountMismatch {
                account: tx.account.to_string(),
                wallet: wallet.classic_address().to_string(),
            });
        }
        tx.validate()?;

        let tx_json = tx.to_json()?;
        let signed = self.client.sign(&tx_json, wallet.seed()).await?.into_signed()?;
        debug!(
            tx_type = tx.transaction_type(),
            hash = %signed.hash,
            "transaction signed"
        );
        Ok(signed)
    }
}
