//! Committed ledger state.

use crate::ports::{ReadableAccountStore, ReadableTokenStore};
use sha2::{Digest, Sha256};
use shared_types::{Account, AccountId, Alias, Hash, Token, TokenId, TransactionRecord};
use std::collections::HashMap;

/// The last committed ledger snapshot and the record stream.
///
/// Only [`crate::SavepointStack`] commits and genesis loading write here.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    accounts: HashMap<AccountId, Account>,
    aliases: HashMap<Alias, AccountId>,
    tokens: HashMap<TokenId, Token>,
    records: Vec<TransactionRecord>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an account directly. Used for genesis and test fixtures.
    pub fn insert_account(&mut self, account: Account) {
        if let Some(alias) = &account.alias {
            self.aliases.insert(alias.clone(), account.account_id);
        }
        self.accounts.insert(account.account_id, account);
    }

    /// Inserts a token directly. Used for genesis and test fixtures.
    pub fn insert_token(&mut self, token: Token) {
        self.tokens.insert(token.token_id, token);
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.insert_account(account);
        self
    }

    pub fn with_token(mut self, token: Token) -> Self {
        self.insert_token(token);
        self
    }

    /// Committed records, in commit order.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn last_record(&self) -> Option<&TransactionRecord> {
        self.records.last()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Digest over all accounts, tokens and alias mappings.
    ///
    /// Entries are hashed in id order so that two nodes holding the same
    /// state always agree.
    pub fn state_hash(&self) -> Hash {
        let mut hasher = Sha256::new();

        let mut accounts: Vec<_> = self.accounts.values().collect();
        accounts.sort_by_key(|a| a.account_id);
        for account in accounts {
            hash_entry(&mut hasher, account);
        }

        let mut tokens: Vec<_> = self.tokens.values().collect();
        tokens.sort_by_key(|t| t.token_id);
        for token in tokens {
            hash_entry(&mut hasher, token);
        }

        let mut aliases: Vec<_> = self.aliases.iter().collect();
        aliases.sort_by(|a, b| a.0 .0.cmp(&b.0 .0));
        for (alias, id) in aliases {
            hasher.update(&alias.0);
            hasher.update(id.num().to_le_bytes());
        }

        hasher.finalize().into()
    }

    // Applied by the outermost savepoint commit.
    pub(crate) fn apply(
        &mut self,
        accounts: HashMap<AccountId, Account>,
        tokens: HashMap<TokenId, Token>,
        aliases: HashMap<Alias, Option<AccountId>>,
        records: Vec<TransactionRecord>,
    ) {
        self.accounts.extend(accounts);
        self.tokens.extend(tokens);
        for (alias, target) in aliases {
            match target {
                Some(id) => {
                    self.aliases.insert(alias, id);
                }
                None => {
                    self.aliases.remove(&alias);
                }
            }
        }
        self.records.extend(records);
    }
}

fn hash_entry<T: serde::Serialize>(hasher: &mut Sha256, entry: &T) {
    // Entities contain only plain data; bincode cannot fail on them.
    if let Ok(bytes) = bincode::serialize(entry) {
        hasher.update(&bytes);
    }
}

impl ReadableAccountStore for LedgerState {
    fn get_account(&self, id: AccountId) -> Option<Account> {
        self.accounts.get(&id).cloned()
    }

    fn account_id_by_alias(&self, alias: &Alias) -> Option<AccountId> {
        self.aliases.get(alias).copied()
    }
}

impl ReadableTokenStore for LedgerState {
    fn get_token(&self, id: TokenId) -> Option<Token> {
        self.tokens.get(&id).cloned()
    }
}
