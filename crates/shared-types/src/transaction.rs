//! # Transactions
//!
//! A [`SignedTransaction`] is a [`TransactionBody`] plus the [`SignatureMap`]
//! of keys whose signatures the external verifier already accepted.
//! [`TransactionData`] is the closed set of operation bodies the node can
//! dispatch.

use crate::entities::{AccountId, CustomFee, Hash, Key, TokenId};
use crate::errors::EncodingError;
use crate::staked_id::StakedIdKind;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;

/// Maximum memo length in bytes, for transaction and account memos.
pub const MAX_MEMO_BYTES: usize = 100;

/// Identifies a transaction: the paying account plus a valid-start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    pub payer: AccountId,
    pub valid_start_nanos: i64,
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.payer, self.valid_start_nanos)
    }
}

/// Operation kind tag, used to select fee prices and throttles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Functionality {
    CryptoDelete,
    CryptoUpdate,
    TokenPause,
    TokenUnpause,
    TokenFeeScheduleUpdate,
    CryptoAddLiveHash,
    CryptoDeleteLiveHash,
    CryptoGetAccountBalance,
    CryptoGetInfo,
    TokenGetInfo,
    GetByKey,
    GetBySolidityId,
    CryptoGetStakers,
}

// =============================================================================
// OPERATION BODIES
// =============================================================================

/// Delete an account and sweep its balance into another account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CryptoDeleteBody {
    pub delete_account_id: Option<AccountId>,
    pub transfer_account_id: Option<AccountId>,
}

/// A declared staking election. Only the field matching `kind` is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingElection {
    pub kind: StakedIdKind,
    pub account_id: Option<AccountId>,
    pub node_id: Option<i64>,
}

impl StakingElection {
    pub fn to_account(account_id: AccountId) -> Self {
        Self {
            kind: StakedIdKind::Account,
            account_id: Some(account_id),
            node_id: None,
        }
    }

    pub fn to_node(node_id: i64) -> Self {
        Self {
            kind: StakedIdKind::Node,
            account_id: None,
            node_id: Some(node_id),
        }
    }
}

/// Update mutable account properties. `None` fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CryptoUpdateBody {
    pub account_id: Option<AccountId>,
    pub key: Option<Key>,
    pub receiver_sig_required: Option<bool>,
    pub memo: Option<String>,
    pub staking: Option<StakingElection>,
    pub decline_reward: Option<bool>,
}

/// Pause or unpause a token.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenPauseBody {
    pub token_id: Option<TokenId>,
}

/// Replace a token's custom fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenFeeScheduleUpdateBody {
    pub token_id: Option<TokenId>,
    pub custom_fees: Vec<CustomFee>,
}

/// Retired live-hash operations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LiveHashBody {
    pub account_id: Option<AccountId>,
    pub hash: Vec<u8>,
}

/// Closed set of dispatchable operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    CryptoDelete(CryptoDeleteBody),
    CryptoUpdate(CryptoUpdateBody),
    TokenPause(TokenPauseBody),
    TokenUnpause(TokenPauseBody),
    TokenFeeScheduleUpdate(TokenFeeScheduleUpdateBody),
    CryptoAddLiveHash(LiveHashBody),
    CryptoDeleteLiveHash(LiveHashBody),
}

impl TransactionData {
    pub fn functionality(&self) -> Functionality {
        match self {
            Self::CryptoDelete(_) => Functionality::CryptoDelete,
            Self::CryptoUpdate(_) => Functionality::CryptoUpdate,
            Self::TokenPause(_) => Functionality::TokenPause,
            Self::TokenUnpause(_) => Functionality::TokenUnpause,
            Self::TokenFeeScheduleUpdate(_) => Functionality::TokenFeeScheduleUpdate,
            Self::CryptoAddLiveHash(_) => Functionality::CryptoAddLiveHash,
            Self::CryptoDeleteLiveHash(_) => Functionality::CryptoDeleteLiveHash,
        }
    }
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// The signed portion of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBody {
    pub transaction_id: TransactionId,
    pub node_account_id: AccountId,
    /// Largest fee, in tinybars, the payer is willing to pay.
    pub max_fee: u64,
    pub memo: String,
    /// `None` when the body names no known operation.
    pub data: Option<TransactionData>,
}

impl TransactionBody {
    pub fn new(payer: AccountId, node_account_id: AccountId, data: TransactionData) -> Self {
        Self {
            transaction_id: TransactionId {
                payer,
                valid_start_nanos: 0,
            },
            node_account_id,
            max_fee: 100_000_000,
            memo: String::new(),
            data: Some(data),
        }
    }

    pub fn payer(&self) -> AccountId {
        self.transaction_id.payer
    }

    /// Deterministic binary encoding; its length feeds bytes-per-transaction
    /// pricing and its digest identifies the transaction in records.
    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        bincode::serialize(self).map_err(|e| EncodingError(e.to_string()))
    }
}

/// Public keys whose signatures on the body were cryptographically verified
/// by the external signature collaborator. Only primitive keys appear here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignatureMap {
    verified: HashSet<Key>,
}

impl SignatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signature(mut self, key: Key) -> Self {
        self.add(key);
        self
    }

    pub fn add(&mut self, key: Key) {
        if key.is_primitive() {
            self.verified.insert(key);
        }
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.verified.contains(key)
    }

    pub fn len(&self) -> usize {
        self.verified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verified.is_empty()
    }
}

/// A transaction as submitted to the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub body: TransactionBody,
    pub signatures: SignatureMap,
}

impl SignedTransaction {
    pub fn new(body: TransactionBody, signatures: SignatureMap) -> Self {
        Self { body, signatures }
    }
}

/// SHA-256 of an encoded body.
pub fn transaction_hash(encoded_body: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(encoded_body);
    hasher.finalize().into()
}
