//! # Genesis State Builder
//!
//! Creates and validates the initial ledger state.

use std::collections::HashSet;

use ql_01_ledger_state::{LedgerState, ReadableAccountStore};
use ql_03_transaction_handlers::LedgerConfig;
use serde::{Deserialize, Serialize};
use shared_types::{Account, AccountId, Key, Token, TokenId, TokenType};
use thiserror::Error;
use tracing::info;

/// First node account number. Node `i` owns account `NODE_ACCOUNT_BASE + i`.
pub const NODE_ACCOUNT_BASE: u64 = 3;

/// Genesis state creation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenesisError {
    #[error("invalid key for {owner}: {reason}")]
    InvalidKey { owner: String, reason: String },

    #[error("account {0} is listed twice")]
    DuplicateAccount(AccountId),

    #[error("token {0} is listed twice")]
    DuplicateToken(TokenId),

    #[error("token {token} names missing treasury {treasury}")]
    MissingTreasury { token: TokenId, treasury: AccountId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub id: u64,
    /// Hex-encoded public key: 32 bytes Ed25519 or 33 bytes secp256k1.
    pub key: String,
    pub balance: u64,
    #[serde(default)]
    pub receiver_sig_required: bool,
    #[serde(default)]
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisToken {
    pub id: u64,
    pub token_type: TokenType,
    pub name: String,
    pub symbol: String,
    pub treasury: u64,
    #[serde(default)]
    pub pause_key: Option<String>,
    #[serde(default)]
    pub fee_schedule_key: Option<String>,
}

/// Genesis configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisConfig {
    /// Key of system accounts (node and funding accounts) not listed in
    /// `accounts`.
    pub system_key: String,
    pub accounts: Vec<GenesisAccount>,
    pub tokens: Vec<GenesisToken>,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            system_key: hex::encode([2u8; 32]),
            accounts: vec![GenesisAccount {
                id: 2,
                key: hex::encode([2u8; 32]),
                balance: 5_000_000_000_000_000_000,
                receiver_sig_required: false,
                memo: "treasury".into(),
            }],
            tokens: Vec::new(),
        }
    }
}

/// Decodes a hex public key.
pub fn parse_key(owner: impl std::fmt::Display, raw: &str) -> Result<Key, GenesisError> {
    let invalid = |reason: String| GenesisError::InvalidKey {
        owner: owner.to_string(),
        reason,
    };
    let bytes = hex::decode(raw).map_err(|e| invalid(e.to_string()))?;
    match bytes.len() {
        32 => {
            let mut key = [0u8; 32];
            key.copy_from_slice(&bytes);
            Ok(Key::Ed25519(key))
        }
        33 => {
            let mut key = [0u8; 33];
            key.copy_from_slice(&bytes);
            Ok(Key::EcdsaSecp256k1(key))
        }
        n => Err(invalid(format!("expected 32 or 33 bytes, got {n}"))),
    }
}

/// Builds genesis state from configuration.
pub struct GenesisBuilder<'a> {
    genesis: &'a GenesisConfig,
    ledger: &'a LedgerConfig,
}

impl<'a> GenesisBuilder<'a> {
    pub fn new(genesis: &'a GenesisConfig, ledger: &'a LedgerConfig) -> Self {
        Self { genesis, ledger }
    }

    pub fn build(&self) -> Result<LedgerState, GenesisError> {
        let mut state = LedgerState::new();
        let mut seen = HashSet::new();

        for entry in &self.genesis.accounts {
            let id = AccountId(entry.id);
            if !seen.insert(id) {
                return Err(GenesisError::DuplicateAccount(id));
            }
            let account = Account::new(id, parse_key(id, &entry.key)?, entry.balance)
                .with_receiver_sig_required(entry.receiver_sig_required)
                .with_memo(entry.memo.clone());
            state.insert_account(account);
        }

        let system_key = parse_key("system accounts", &self.genesis.system_key)?;
        let system_accounts = (0..self.ledger.nodes.count)
            .map(|i| AccountId(NODE_ACCOUNT_BASE + i))
            .chain(std::iter::once(self.ledger.accounts.funding_account));
        for id in system_accounts {
            if seen.insert(id) {
                state.insert_account(Account::new(id, system_key.clone(), 0));
            }
        }

        let mut tokens = HashSet::new();
        for entry in &self.genesis.tokens {
            let token_id = TokenId(entry.id);
            if !tokens.insert(token_id) {
                return Err(GenesisError::DuplicateToken(token_id));
            }
            let treasury_id = AccountId(entry.treasury);
            let mut treasury = state
                .get_account(treasury_id)
                .ok_or(GenesisError::MissingTreasury {
                    token: token_id,
                    treasury: treasury_id,
                })?;
            treasury.num_treasury_titles += 1;
            state.insert_account(treasury);

            let mut token = Token::new(token_id, entry.token_type, treasury_id)
                .with_symbol(entry.name.clone(), entry.symbol.clone());
            if let Some(raw) = &entry.pause_key {
                token = token.with_pause_key(parse_key(token_id, raw)?);
            }
            if let Some(raw) = &entry.fee_schedule_key {
                token = token.with_fee_schedule_key(parse_key(token_id, raw)?);
            }
            state.insert_token(token);
        }

        info!(
            accounts = state.account_count(),
            tokens = state.token_count(),
            state_hash = %hex::encode(state.state_hash()),
            "genesis state built"
        );
        Ok(state)
    }
}
