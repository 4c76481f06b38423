//! # Core Ledger Entities
//!
//! ## Clusters
//!
//! - **Identity**: `AccountId`, `TokenId`, `Alias`, `Key`
//! - **Accounts**: `Account`
//! - **Tokens**: `Token`, `TokenType`, `CustomFee`

use crate::staked_id::StakedId;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use std::fmt;

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Identifier of an account (`0.0.<num>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    pub fn num(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0.0.{}", self.0)
    }
}

/// Identifier of a token (`0.0.<num>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl TokenId {
    pub fn num(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0.0.{}", self.0)
    }
}

/// Alternate account address (public-key or EVM-address alias).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alias(pub Vec<u8>);

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

/// Key material that can be required to sign a transaction.
///
/// Primitive keys (`Ed25519`, `EcdsaSecp256k1`) are satisfied by a verified
/// signature. `KeyList` needs every member, `Threshold` needs `threshold`
/// of its members.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Ed25519 public key.
    Ed25519([u8; 32]),
    /// Compressed secp256k1 public key.
    EcdsaSecp256k1(#[serde_as(as = "Bytes")] [u8; 33]),
    /// All keys must be satisfied.
    KeyList(Vec<Key>),
    /// At least `threshold` keys must be satisfied.
    Threshold { threshold: u32, keys: Vec<Key> },
}

impl Key {
    /// Returns true for `Ed25519` and `EcdsaSecp256k1` keys.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Ed25519(_) | Self::EcdsaSecp256k1(_))
    }

    /// Structural validity: lists are non-empty and thresholds reachable.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Ed25519(_) | Self::EcdsaSecp256k1(_) => true,
            Self::KeyList(keys) => !keys.is_empty() && keys.iter().all(Key::is_valid),
            Self::Threshold { threshold, keys } => {
                *threshold >= 1
                    && (*threshold as usize) <= keys.len()
                    && keys.iter().all(Key::is_valid)
            }
        }
    }

    /// Number of raw public-key bytes in the key, used by usage estimates.
    pub fn encoded_len(&self) -> u64 {
        match self {
            Self::Ed25519(_) => 32,
            Self::EcdsaSecp256k1(_) => 33,
            Self::KeyList(keys) | Self::Threshold { keys, .. } => {
                keys.iter().map(Key::encoded_len).sum()
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519(bytes) => write!(f, "ed25519:{}", &hex::encode(bytes)[..8]),
            Self::EcdsaSecp256k1(bytes) => write!(f, "secp256k1:{}", &hex::encode(bytes)[..8]),
            Self::KeyList(keys) => write!(f, "keylist[{}]", keys.len()),
            Self::Threshold { threshold, keys } => {
                write!(f, "threshold[{}/{}]", threshold, keys.len())
            }
        }
    }
}

// =============================================================================
// CLUSTER B: ACCOUNTS
// =============================================================================

/// An account as stored in ledger state.
///
/// Accounts are never removed. Deletion sets `deleted` and may release the
/// alias for reuse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: AccountId,
    pub key: Key,
    /// Balance in tinybars.
    pub balance: u64,
    pub deleted: bool,
    /// When set, the account must sign any transaction that credits it.
    pub receiver_sig_required: bool,
    pub memo: String,
    pub alias: Option<Alias>,
    /// Staking election; `None` means the account does not stake.
    pub staked_id: Option<StakedId>,
    pub decline_reward: bool,
    /// Number of tokens this account is treasury for.
    pub num_treasury_titles: u32,
    /// Number of token relationships with a non-zero balance.
    pub num_positive_token_balances: u32,
}

impl Account {
    pub fn new(account_id: AccountId, key: Key, balance: u64) -> Self {
        Self {
            account_id,
            key,
            balance,
            deleted: false,
            receiver_sig_required: false,
            memo: String::new(),
            alias: None,
            staked_id: None,
            decline_reward: false,
            num_treasury_titles: 0,
            num_positive_token_balances: 0,
        }
    }

    pub fn with_receiver_sig_required(mut self, required: bool) -> Self {
        self.receiver_sig_required = required;
        self
    }

    pub fn with_alias(mut self, alias: Alias) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_staked_id(mut self, staked_id: StakedId) -> Self {
        self.staked_id = Some(staked_id);
        self
    }
}

// =============================================================================
// CLUSTER C: TOKENS
// =============================================================================

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    FungibleCommon,
    NonFungibleUnique,
}

/// How a custom fee is assessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomFeeKind {
    /// A flat amount, in hbar or in `denominating_token` units.
    Fixed {
        amount: u64,
        denominating_token: Option<TokenId>,
    },
    /// A fraction of each transferred amount, clamped to `[minimum, maximum]`.
    /// A `maximum` of zero means unbounded.
    Fractional {
        numerator: u64,
        denominator: u64,
        minimum: u64,
        maximum: u64,
    },
}

/// A custom fee attached to a token's fee schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFee {
    pub collector: Option<AccountId>,
    pub kind: CustomFeeKind,
}

impl CustomFee {
    pub fn fixed(collector: AccountId, amount: u64) -> Self {
        Self {
            collector: Some(collector),
            kind: CustomFeeKind::Fixed {
                amount,
                denominating_token: None,
            },
        }
    }

    pub fn fractional(collector: AccountId, numerator: u64, denominator: u64) -> Self {
        Self {
            collector: Some(collector),
            kind: CustomFeeKind::Fractional {
                numerator,
                denominator,
                minimum: 0,
                maximum: 0,
            },
        }
    }
}

/// A token as stored in ledger state. Immutable once `deleted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub token_id: TokenId,
    pub token_type: TokenType,
    pub name: String,
    pub symbol: String,
    pub treasury_account_id: AccountId,
    pub deleted: bool,
    pub paused: bool,
    pub pause_key: Option<Key>,
    pub fee_schedule_key: Option<Key>,
    pub custom_fees: Vec<CustomFee>,
}

impl Token {
    pub fn new(token_id: TokenId, token_type: TokenType, treasury_account_id: AccountId) -> Self {
        Self {
            token_id,
            token_type,
            name: String::new(),
            symbol: String::new(),
            treasury_account_id,
            deleted: false,
            paused: false,
            pause_key: None,
            fee_schedule_key: None,
            custom_fees: Vec::new(),
        }
    }

    pub fn with_symbol(mut self, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        self.name = name.into();
        self.symbol = symbol.into();
        self
    }

    pub fn with_pause_key(mut self, key: Key) -> Self {
        self.pause_key = Some(key);
        self
    }

    pub fn with_fee_schedule_key(mut self, key: Key) -> Self {
        self.fee_schedule_key = Some(key);
        self
    }

    pub fn with_custom_fees(mut self, fees: Vec<CustomFee>) -> Self {
        self.custom_fees = fees;
        self
    }
}
