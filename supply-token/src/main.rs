//! supply-token: open a trust line and issue a custom token on the XRP
//! Ledger testnet.
//!
//! Credentials are read from the config file or the environment
//! (`ISSUER_SEED`, `RECEIVER_SEED`); none are built in.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use supply_token::config::Config;
use supply_token::{issue_tokens_with, load_wallet, IssuanceStep, RpcLedger};
use tracing::info;
use xrpl_rpc::{JsonRpcClient, TxResponse};
use xrpl_wallet::NodeSigner;

const DEFAULT_CONFIG: &str = "supply-token.toml";

#[derive(Parser)]
#[command(name = "supply-token")]
#[command(version, about = "Open a trust line and issue a custom token on the XRP Ledger", long_about = None)]
struct Cli {
    /// Path to configuration file (defaults to supply-token.toml when present)
    #[arg(short, long, env = "SUPPLY_TOKEN_CONFIG")]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint of the node
    #[arg(long, env = "XRPL_RPC_URL")]
    rpc_url: Option<String>,

    /// Seed of the issuing account
    #[arg(long, env = "ISSUER_SEED", hide_env_values = true)]
    issuer_seed: Option<String>,

    /// Seed of the receiving account
    #[arg(long, env = "RECEIVER_SEED", hide_env_values = true)]
    receiver_seed: Option<String>,

    /// Address of the issuing account (resolved from the seed when omitted)
    #[arg(long, env = "ISSUER_ADDRESS")]
    issuer_address: Option<String>,

    /// Address of the receiving account (resolved from the seed when omitted)
    #[arg(long, env = "RECEIVER_ADDRESS")]
    receiver_address: Option<String>,

    /// Currency code to issue
    #[arg(long)]
    currency: Option<String>,

    /// Trust line limit
    #[arg(long)]
    trust_limit: Option<String>,

    /// Amount to issue
    #[arg(long)]
    issue_amount: Option<String>,

    /// Ledgers the transactions stay valid for
    #[arg(long)]
    ledger_offset: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug)?;

    let config = load_config(&cli)?;
    config.validate().context("Invalid configuration")?;
    info!("RPC URL: {}", config.network.rpc_url);

    let client = JsonRpcClient::new(config.rpc_config());
    let signer = NodeSigner::new(client.clone());

    let issuer = load_wallet(&signer, &config.issuer, "issuer")
        .await
        .context("Failed to load issuer wallet")?;
    let receiver = load_wallet(&signer, &config.receiver, "receiver")
        .await
        .context("Failed to load receiver wallet")?;
    println!("Issuer address: {}", issuer.classic_address());
    println!("Receiver address: {}", receiver.classic_address());

    let plan = config.token.plan()?;
    let ledger = RpcLedger::new(client);
    let report = issue_tokens_with(&ledger, &issuer, &receiver, &plan, print_step)
        .await
        .context("Token issuance failed")?;
    info!(
        trust_set = %report.trust_set_result.hash,
        payment = %report.payment_result.hash,
        "issuance complete"
    );

    Ok(())
}

/// Print each step as it completes, so results already on the ledger are
/// shown even if a later step fails.
fn print_step(step: IssuanceStep<'_>) {
    match step {
        IssuanceStep::LedgerIndex {
            ledger_index,
            last_ledger_sequence,
        } => {
            println!("Current ledger index: {ledger_index}");
            println!("LastLedgerSequence: {last_ledger_sequence}");
        }
        IssuanceStep::ReceiverSequence(sequence) => println!("Receiver sequence: {sequence}"),
        IssuanceStep::Fee(fee) => println!("Base fee: {fee} drops"),
        IssuanceStep::TrustSet(resp) => println!("TrustSet completed: {}", pretty(resp)),
        IssuanceStep::IssuerSequence(sequence) => println!("Issuer sequence: {sequence}"),
        IssuanceStep::Payment(resp) => println!("Payment completed: {}", pretty(resp)),
    }
}

fn pretty(resp: &TxResponse) -> String {
    serde_json::to_string_pretty(resp).unwrap_or_else(|e| format!("<unprintable response: {e}>"))
}

/// Initialize tracing subscriber for logging
fn init_logging(debug: bool) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = if debug {
        EnvFilter::new("supply_token=debug,xrpl_rpc=debug,xrpl_wallet=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("supply_token=info,xrpl_rpc=info"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();

    Ok(())
}

/// Read the config file, if any, then apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG).exists() => Config::from_file(DEFAULT_CONFIG)
            .with_context(|| format!("Failed to load configuration from {DEFAULT_CONFIG}"))?,
        None => Config::default(),
    };

    if let Some(url) = &cli.rpc_url {
        config.network.rpc_url = url.clone();
    }
    if let Some(seed) = &cli.issuer_seed {
        config.issuer.seed = Some(seed.clone());
    }
    if let Some(seed) = &cli.receiver_seed {
        config.receiver.seed = Some(seed.clone());
    }
    if let Some(address) = &cli.issuer_address {
        config.issuer.address = Some(address.clone());
    }
    if let Some(address) = &cli.receiver_address {
        config.receiver.address = Some(address.clone());
    }
    if let Some(currency) = &cli.currency {
        config.token.currency = currency.clone();
    }
    if let Some(limit) = &cli.trust_limit {
        config.token.trust_limit = limit.clone();
    }
    if let Some(amount) = &cli.issue_amount {
        config.token.issue_amount = amount.clone();
    }
    if let Some(offset) = cli.ledger_offset {
        config.token.ledger_offset = offset;
    }

    Ok(config)
}
