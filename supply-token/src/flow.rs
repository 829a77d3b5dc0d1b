//! The issuance flow: open a trust line, then issue tokens over it.
//!
//! Both transactions share one expiry bound (`LastLedgerSequence`) computed
//! once from the closed ledger index, and one fee read once from the node.
//! The issuer's sequence is read only after the trust line is final.

use tracing::info;
use xrpl_primitives::ClassicAddress;
use xrpl_rpc::TxResponse;
use xrpl_transaction::{CurrencyCode, IssuedCurrencyAmount, IssuedValue, Transaction, XrpDrops};
use xrpl_wallet::{NodeSigner, Wallet};

use crate::config::AccountConfig;
use crate::error::IssuanceError;
use crate::ledger::LedgerFacade;

/// What to issue, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuancePlan {
    /// Currency of the trust line and the payment.
    pub currency: CurrencyCode,
    /// Trust line limit.
    pub trust_limit: IssuedValue,
    /// Amount paid to the receiver.
    pub issue_amount: IssuedValue,
    /// Ledgers after the closed ledger both transactions stay valid for.
    pub ledger_offset: u32,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct IssuanceReport {
    /// Expiry bound shared by both transactions.
    pub last_ledger_sequence: u32,
    /// Fee paid by each transaction.
    pub fee: XrpDrops,
    /// The trust line transaction as built.
    pub trust_set: Transaction,
    /// Validated result of the trust line transaction.
    pub trust_set_result: TxResponse,
    /// The issuing payment as built.
    pub payment: Transaction,
    /// Validated result of the issuing payment.
    pub payment_result: TxResponse,
}

/// `TrustSet` from `receiver` extending `plan.trust_limit` of the currency to `issuer`.
pub fn build_trust_set(
    plan: &IssuancePlan,
    issuer: &ClassicAddress,
    receiver: &ClassicAddress,
    sequence: u32,
    fee: XrpDrops,
    last_ledger_sequence: u32,
) -> Transaction {
    let limit = IssuedCurrencyAmount::new(
        plan.currency.clone(),
        issuer.clone(),
        plan.trust_limit.clone(),
    );
    Transaction::trust_set(receiver.clone(), limit)
        .with_fee(fee)
        .with_sequence(sequence)
        .with_last_ledger_sequence(last_ledger_sequence)
}

/// `Payment` of `plan.issue_amount` from `issuer` to `receiver`.
pub fn build_payment(
    plan: &IssuancePlan,
    issuer: &ClassicAddress,
    receiver: &ClassicAddress,
    sequence: u32,
    fee: XrpDrops,
    last_ledger_sequence: u32,
) -> Transaction {
    let amount = IssuedCurrencyAmount::new(
        plan.currency.clone(),
        issuer.clone(),
        plan.issue_amount.clone(),
    );
    Transaction::payment(issuer.clone(), receiver.clone(), amount)
        .with_fee(fee)
        .with_sequence(sequence)
        .with_last_ledger_sequence(last_ledger_sequence)
}

/// A completed step of [`issue_tokens_with`], reported as soon as it finishes.
#[derive(Debug, Clone, Copy)]
pub enum IssuanceStep<'a> {
    /// Closed ledger index read, expiry bound derived from it.
    LedgerIndex {
        /// Closed ledger index.
        ledger_index: u32,
        /// `LastLedgerSequence` of both transactions.
        last_ledger_sequence: u32,
    },
    /// Receiver sequence read.
    ReceiverSequence(u32),
    /// Base fee read.
    Fee(XrpDrops),
    /// Trust line validated.
    TrustSet(&'a TxResponse),
    /// Issuer sequence read after the trust line.
    IssuerSequence(u32),
    /// Payment validated.
    Payment(&'a TxResponse),
}

/// Open the trust line from `receiver` to `issuer`, then pay the issued amount.
///
/// Steps run strictly in order and the first failure aborts the run; a
/// failed trust line means no payment is attempted.
pub async fn issue_tokens<L: LedgerFacade>(
    ledger: &L,
    issuer: &Wallet,
    receiver: &Wallet,
    plan: &IssuancePlan,
) -> Result<IssuanceReport, IssuanceError> {
    issue_tokens_with(ledger, issuer, receiver, plan, |_| {}).await
}

/// [`issue_tokens`], calling `on_step` after each completed step.
///
/// Steps that completed before a failure have already been reported when
/// the error is returned.
pub async fn issue_tokens_with<L, F>(
    ledger: &L,
    issuer: &Wallet,
    receiver: &Wallet,
    plan: &IssuancePlan,
    mut on_step: F,
) -> Result<IssuanceReport, IssuanceError>
where
    L: LedgerFacade,
    F: FnMut(IssuanceStep<'_>),
{
    let issuer_address = issuer.classic_address();
    let receiver_address = receiver.classic_address();

    let ledger_index = ledger.current_ledger_index().await?;
    let last_ledger_sequence = ledger_index.checked_add(plan.ledger_offset).ok_or(
        IssuanceError::LedgerIndexOverflow {
            ledger_index,
            offset: plan.ledger_offset,
        },
    )?;
    info!(ledger_index, last_ledger_sequence, "computed expiry bound");
    on_step(IssuanceStep::LedgerIndex {
        ledger_index,
        last_ledger_sequence,
    });

    let receiver_sequence = ledger.account_sequence(receiver_address).await?;
    on_step(IssuanceStep::ReceiverSequence(receiver_sequence));
    let fee = ledger.base_fee().await?;
    on_step(IssuanceStep::Fee(fee));
    info!(account = %receiver_address, sequence = receiver_sequence, %fee, "preparing trust line");

    let trust_set = build_trust_set(
        plan,
        issuer_address,
        receiver_address,
        receiver_sequence,
        fee,
        last_ledger_sequence,
    );
    let trust_set_result = ledger.sign_and_submit(&trust_set, receiver).await?;
    info!(
        hash = %trust_set_result.hash,
        ledger_index = ?trust_set_result.ledger_index,
        "trust line set"
    );
    on_step(IssuanceStep::TrustSet(&trust_set_result));

    let issuer_sequence = ledger.account_sequence(issuer_address).await?;
    on_step(IssuanceStep::IssuerSequence(issuer_sequence));
    info!(account = %issuer_address, sequence = issuer_sequence, "preparing payment");

    let payment = build_payment(
        plan,
        issuer_address,
        receiver_address,
        issuer_sequence,
        fee,
        last_ledger_sequence,
    );
    let payment_result = ledger.sign_and_submit(&payment, issuer).await?;
    info!(
        hash = %payment_result.hash,
        ledger_index = ?payment_result.ledger_index,
        amount = %plan.issue_amount,
        currency = %plan.currency,
        "tokens issued"
    );
    on_step(IssuanceStep::Payment(&payment_result));

    Ok(IssuanceReport {
        last_ledger_sequence,
        fee,
        trust_set,
        trust_set_result,
        payment,
        payment_result,
    })
}

/// Build the wallet for one account section.
///
/// Uses the configured address when present; otherwise the node derives it
/// from the seed through `wallet_propose`.
pub async fn load_wallet(
    signer: &NodeSigner,
    account: &AccountConfig,
    role: &'static str,
) -> Result<Wallet, IssuanceError> {
    let (seed, address) = account.credentials(role)?;
    let wallet = match address {
        Some(address) => Wallet::new(seed, address),
        None => signer.resolve_wallet(seed).await?,
    };
    info!(role, address = %wallet.classic_address(), key_type = wallet.key_type().as_str(), "wallet loaded");
    Ok(wallet)
}
