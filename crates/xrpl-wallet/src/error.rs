/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("primitives error: {0}")]
    Primitives(#[from] xrpl_primitives::PrimitivesError),
    #[error("transaction error: {0}")]
    Transaction(#[from] xrpl_transaction::TransactionError),
    #[error("rpc error: {0}")]
    Rpc(#[from] xrpl_rpc::RpcError),
    #[error("transaction account {account} does not belong to wallet {wallet}")]
    AccountMismatch { account: String, wallet: String },
}
