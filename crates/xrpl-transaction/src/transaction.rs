//! Unsigned XRP Ledger transactions in their JSON (`tx_json`) form.
//!
//! Only the fields this workspace submits are modelled. The common fields
//! (`Account`, `Fee`, `Sequence`, `LastLedgerSequence`) live on
//! [`Transaction`]; the type-specific fields and the `TransactionType` tag
//! come from [`TransactionKind`]:
//!
//! ```json
//! {"TransactionType": "TrustSet", "Account": "r...", "Fee": "10",
//!  "Sequence": 5, "LastLedgerSequence": 110,
//!  "LimitAmount": {"currency": "MED", "issuer": "r...", "value": "1000"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use xrpl_primitives::ClassicAddress;

use crate::amount::{Amount, IssuedCurrencyAmount, XrpDrops};
use crate::TransactionError;

/// Type-specific part of a transaction, tagged by `TransactionType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "TransactionType")]
pub enum TransactionKind {
    /// Create or modify a trust line.
    #[serde(rename_all = "PascalCase")]
    TrustSet {
        /// Currency, issuer and maximum balance the account accepts.
        limit_amount: IssuedCurrencyAmount,
    },
    /// Deliver XRP or an issued currency.
    #[serde(rename_all = "PascalCase")]
    Payment {
        /// Receiving account.
        destination: ClassicAddress,
        /// Amount to deliver.
        amount: Amount,
    },
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    /// Sending account.
    pub account: ClassicAddress,

    /// Transaction cost in drops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<XrpDrops>,

    /// Sequence number of the sending account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    /// Highest ledger index this transaction can appear in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_ledger_sequence: Option<u32>,

    /// Type-specific fields.
    #[serde(flatten)]
    pub kind: TransactionKind,
}

impl Transaction {
    /// A `TrustSet` from `account` for the currency and issuer in `limit_amount`.
    pub fn trust_set(account: ClassicAddress, limit_amount: IssuedCurrencyAmount) -> Self {
        Self::new(account, TransactionKind::TrustSet { limit_amount })
    }

    /// A `Payment` of `amount` from `account` to `destination`.
    pub fn payment(
        account: ClassicAddress,
        destination: ClassicAddress,
        amount: impl Into<Amount>,
    ) -> Self {
        Self::new(
            account,
            TransactionKind::Payment {
                destination,
                amount: amount.into(),
            },
        )
    }

    fn new(account: ClassicAddress, kind: TransactionKind) -> Self {
        Transaction {
            account,
            fee: None,
            sequence: None,
            last_ledger_sequence: None,
            kind,
        }
    }

    /// Set the transaction cost.
    pub fn with_fee(mut self, fee: XrpDrops) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Set the account sequence number.
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Set the expiry bound.
    pub fn with_last_ledger_sequence(mut self, last_ledger_sequence: u32) -> Self {
        self.last_ledger_sequence = Some(last_ledger_sequence);
        self
    }

    /// The `TransactionType` name.
    pub fn transaction_type(&self) -> &'static str {
        match self.kind {
            TransactionKind::TrustSet { .. } => "TrustSet",
            TransactionKind::Payment { .. } => "Payment",
        }
    }

    /// Check that the transaction is complete and internally consistent.
    ///
    /// The node signs in offline mode, so `Fee`, `Sequence` and
    /// `LastLedgerSequence` must all be present.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.fee.is_none() {
            return Err(TransactionError::MissingField("Fee"));
        }
        if self.sequence.is_none() {
            return Err(TransactionError::MissingField("Sequence"));
        }
        if self.last_ledger_sequence.is_none() {
            return Err(TransactionError::MissingField("LastLedgerSequence"));
        }

        match &self.kind {
            TransactionKind::TrustSet { limit_amount } => {
                if limit_amount.issuer == self.account {
                    return Err(TransactionError::InvalidTransaction(
                        "cannot extend a trust line to oneself".to_string(),
                    ));
                }
                if limit_amount.value.is_negative() {
                    return Err(TransactionError::InvalidAmount(format!(
                        "trust limit {} is negative",
                        limit_amount.value
                    )));
                }
            }
            TransactionKind::Payment {
                destination,
                amount,
            } => {
                if *destination == self.account {
                    return Err(TransactionError::InvalidTransaction(
                        "payment destination equals the sending account".to_string(),
                    ));
                }
                if !amount.is_positive() {
                    return Err(TransactionError::InvalidAmount(
                        "payment amount must be positive".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// The `tx_json` object the node signs.
    pub fn to_json(&self) -> Result<Value, TransactionError> {
        Ok(serde_json::to_value(self)?)
    }
}
