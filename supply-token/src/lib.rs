#![deny(missing_docs)]

//! # supply-token
//!
//! Opens a trust line from a receiving account to an issuing account for a
//! custom currency, then issues units of that currency from the issuer to
//! the receiver, on the XRP Ledger testnet.
//!
//! The ledger is reached through the [`LedgerFacade`] trait; [`RpcLedger`]
//! implements it over JSON-RPC with node-side signing.
//!
//! # Example
//!
//! ```no_run
//! use supply_token::config::Config;
//! use supply_token::{issue_tokens, load_wallet, RpcLedger};
//! use xrpl_rpc::JsonRpcClient;
//! use xrpl_wallet::NodeSigner;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_file("supply-token.toml")?;
//! let client = JsonRpcClient::new(config.rpc_config());
//! let signer = NodeSigner::new(client.clone());
//!
//! let issuer = load_wallet(&signer, &config.issuer, "issuer").await?;
//! let receiver = load_wallet(&signer, &config.receiver, "receiver").await?;
//!
//! let ledger = RpcLedger::new(client);
//! let report = issue_tokens(&ledger, &issuer, &receiver, &config.token.plan()?).await?;
//! println!("issued in ledger {:?}", report.payment_result.ledger_index);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod ledger;

pub use error::{ConfigError, IssuanceError};
pub use flow::{
    build_payment, build_trust_set, issue_tokens, issue_tokens_with, load_wallet, IssuancePlan,
    IssuanceReport, IssuanceStep,
};
pub use ledger::{LedgerFacade, RpcLedger};
