/// XRP Ledger account credentials and transaction signing.
///
/// Defines the `Wallet` credential (seed plus classic address), the
/// `TransactionSigner` trait, and `NodeSigner`, which delegates key
/// handling to the node's `sign` and `wallet_propose` methods.

mod error;
pub use error::WalletError;

pub mod wallet;
pub mod signer;

pub use signer::{NodeSigner, TransactionSigner};
pub use wallet::Wallet;
