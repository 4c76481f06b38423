//! # Transaction Records
//!
//! One [`TransactionRecord`] is emitted per handled transaction. It belongs
//! to the savepoint that created it and is dropped if that savepoint rolls
//! back.

use crate::entities::{AccountId, Hash, TokenType};
use crate::response_code::ResponseCode;
use crate::transaction::TransactionId;
use serde::{Deserialize, Serialize};

/// A signed balance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAmount {
    pub account_id: AccountId,
    pub amount: i128,
}

/// Audit record of one handled transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: TransactionId,
    pub transaction_hash: Hash,
    pub status: ResponseCode,
    /// Fee charged to the payer, in tinybars.
    pub transaction_fee: u64,
    pub memo: String,
    /// Net hbar movements, including fee payment.
    pub transfers: Vec<AccountAmount>,
    /// Classification of the token the transaction touched, if any.
    pub token_type: Option<TokenType>,
}

impl TransactionRecord {
    pub fn net_amount(&self, account_id: AccountId) -> i128 {
        self.transfers
            .iter()
            .filter(|t| t.account_id == account_id)
            .map(|t| t.amount)
            .sum()
    }
}

/// Handler-facing builder for the non-status parts of a record.
///
/// The handle workflow discards the builder when the handler fails, so a
/// failed transaction's record carries only status, fee and fee transfers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBuilder {
    transfers: Vec<AccountAmount>,
    token_type: Option<TokenType>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token_type(&mut self, token_type: TokenType) -> &mut Self {
        self.token_type = Some(token_type);
        self
    }

    pub fn transfer(&mut self, account_id: AccountId, amount: i128) -> &mut Self {
        self.transfers.push(AccountAmount { account_id, amount });
        self
    }

    pub fn token_type_value(&self) -> Option<TokenType> {
        self.token_type
    }

    pub fn transfers(&self) -> &[AccountAmount] {
        &self.transfers
    }

    pub fn into_parts(self) -> (Vec<AccountAmount>, Option<TokenType>) {
        (self.transfers, self.token_type)
    }
}
