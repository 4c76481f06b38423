//! Nested savepoints over the committed ledger state.
//!
//! ```text
//!   begin()            begin()            commit()           commit()
//! [base] -> [base|sp1] -> [base|sp1|sp2] -> [base|sp1'] -> [base']
//!                                    \
//!                                     rollback() -> [base|sp1]
//! ```
//!
//! A rollback drops the newest savepoint together with every record emitted
//! into it. Nothing reaches [`LedgerState`] until the outermost savepoint
//! commits.

use crate::domain::LedgerState;
use crate::ports::{
    ReadableAccountStore, ReadableTokenStore, RecordSink, WritableAccountStore,
    WritableTokenStore,
};
use shared_types::{
    Account, AccountId, Alias, InvariantViolation, Token, TokenId, TransactionRecord,
};
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Default)]
struct Savepoint {
    accounts: HashMap<AccountId, Account>,
    tokens: HashMap<TokenId, Token>,
    /// `None` marks an alias removed in this savepoint.
    aliases: HashMap<Alias, Option<AccountId>>,
    records: Vec<TransactionRecord>,
}

impl Savepoint {
    fn absorb(&mut self, child: Savepoint) {
        self.accounts.extend(child.accounts);
        self.tokens.extend(child.tokens);
        self.aliases.extend(child.aliases);
        self.records.extend(child.records);
    }
}

/// Stack of open savepoints on top of a mutably borrowed [`LedgerState`].
///
/// Dropping the stack with savepoints still open discards them.
#[derive(Debug)]
pub struct SavepointStack<'a> {
    base: &'a mut LedgerState,
    layers: Vec<Savepoint>,
}

impl<'a> SavepointStack<'a> {
    pub fn new(base: &'a mut LedgerState) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// Opens a child savepoint.
    pub fn begin(&mut self) {
        self.layers.push(Savepoint::default());
        trace!(depth = self.layers.len(), "savepoint opened");
    }

    /// Folds the newest savepoint into its parent, or into the committed
    /// state when it is the outermost one.
    pub fn commit(&mut self) -> Result<(), InvariantViolation> {
        let top = self.layers.pop().ok_or(InvariantViolation::NoOpenSavepoint)?;
        match self.layers.last_mut() {
            Some(parent) => parent.absorb(top),
            None => self
                .base
                .apply(top.accounts, top.tokens, top.aliases, top.records),
        }
        trace!(depth = self.layers.len(), "savepoint committed");
        Ok(())
    }

    /// Discards the newest savepoint.
    pub fn rollback(&mut self) -> Result<(), InvariantViolation> {
        let dropped = self.layers.pop().ok_or(InvariantViolation::NoOpenSavepoint)?;
        trace!(
            depth = self.layers.len(),
            discarded_records = dropped.records.len(),
            "savepoint rolled back"
        );
        Ok(())
    }

    /// Discards every open savepoint.
    pub fn rollback_all(&mut self) {
        self.layers.clear();
    }

    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Records emitted into open savepoints, oldest first.
    pub fn pending_records(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.layers.iter().flat_map(|layer| layer.records.iter())
    }

    /// Read-only view of the committed state underneath.
    pub fn committed(&self) -> &LedgerState {
        self.base
    }

    fn top_mut(&mut self) -> Result<&mut Savepoint, InvariantViolation> {
        self.layers
            .last_mut()
            .ok_or(InvariantViolation::NoOpenSavepoint)
    }
}

impl ReadableAccountStore for SavepointStack<'_> {
    fn get_account(&self, id: AccountId) -> Option<Account> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.accounts.get(&id).cloned())
            .or_else(|| self.base.get_account(id))
    }

    fn account_id_by_alias(&self, alias: &Alias) -> Option<AccountId> {
        match self
            .layers
            .iter()
            .rev()
            .find_map(|layer| layer.aliases.get(alias).copied())
        {
            Some(target) => target,
            None => self.base.account_id_by_alias(alias),
        }
    }
}

impl WritableAccountStore for SavepointStack<'_> {
    fn put_account(&mut self, account: Account) -> Result<(), InvariantViolation> {
        let top = self.top_mut()?;
        if let Some(alias) = &account.alias {
            top.aliases.insert(alias.clone(), Some(account.account_id));
        }
        top.accounts.insert(account.account_id, account);
        Ok(())
    }

    fn remove_alias(&mut self, alias: &Alias) -> Result<(), InvariantViolation> {
        self.top_mut()?.aliases.insert(alias.clone(), None);
        Ok(())
    }
}

impl ReadableTokenStore for SavepointStack<'_> {
    fn get_token(&self, id: TokenId) -> Option<Token> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.tokens.get(&id).cloned())
            .or_else(|| self.base.get_token(id))
    }
}

impl WritableTokenStore for SavepointStack<'_> {
    fn put_token(&mut self, token: Token) -> Result<(), InvariantViolation> {
        self.top_mut()?.tokens.insert(token.token_id, token);
        Ok(())
    }
}

impl RecordSink for SavepointStack<'_> {
    fn emit(&mut self, record: TransactionRecord) -> Result<(), InvariantViolation> {
        self.top_mut()?.records.push(record);
        Ok(())
    }
}
