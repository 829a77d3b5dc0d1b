#![deny(missing_docs)]

//! # xrpl-rpc
//!
//! JSON-RPC client for querying and submitting to an XRP Ledger node
//! (`rippled`).
//!
//! Requests are `POST`ed as `{"method": ..., "params": [{...}]}` and the
//! node answers with `{"result": {...}}`. A result whose `status` is
//! `"error"` is turned into [`RpcError::Node`].
//!
//! # Example
//!
//! ```no_run
//! use xrpl_rpc::{JsonRpcClient, RpcConfig};
//!
//! # async fn example() -> Result<(), xrpl_rpc::RpcError> {
//! let client = JsonRpcClient::new(RpcConfig::default());
//!
//! let fee = client.fee().await?;
//! println!("base fee: {} drops", fee.drops.base_fee);
//!
//! let ledger = client.ledger().await?;
//! println!("closed ledger: {:?}", ledger.closed_ledger_index());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod reliable;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::JsonRpcClient;
pub use error::RpcError;
pub use types::{
    AccountInfoResponse, FeeResponse, LedgerResponse, RpcConfig, SignResponse,
    SignedTransaction, SubmitResponse, TxResponse, WalletProposeResponse,
};
