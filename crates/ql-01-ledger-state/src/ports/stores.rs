//! Store ports.
//!
//! Readable stores hand out owned clones; writable stores accept whole
//! replacement values (copy-on-write). Writes fail only when no savepoint is
//! open, which is a workflow bug rather than a user error.

use shared_types::{
    Account, AccountId, Alias, InvariantViolation, Token, TokenId, TransactionRecord,
};

pub trait ReadableAccountStore {
    fn get_account(&self, id: AccountId) -> Option<Account>;

    /// Resolves an alias to the account currently holding it.
    fn account_id_by_alias(&self, alias: &Alias) -> Option<AccountId>;
}

pub trait WritableAccountStore: ReadableAccountStore {
    /// Replaces the stored account. Indexes its alias, if any.
    fn put_account(&mut self, account: Account) -> Result<(), InvariantViolation>;

    /// Frees an alias for reuse.
    fn remove_alias(&mut self, alias: &Alias) -> Result<(), InvariantViolation>;
}

pub trait ReadableTokenStore {
    fn get_token(&self, id: TokenId) -> Option<Token>;
}

pub trait WritableTokenStore: ReadableTokenStore {
    fn put_token(&mut self, token: Token) -> Result<(), InvariantViolation>;
}

/// Destination for transaction records.
pub trait RecordSink {
    fn emit(&mut self, record: TransactionRecord) -> Result<(), InvariantViolation>;
}

/// Everything a read-only phase may look at.
pub trait ReadableStores: ReadableAccountStore + ReadableTokenStore {}

impl<T: ReadableAccountStore + ReadableTokenStore + ?Sized> ReadableStores for T {}

/// Everything the handle phase may touch.
pub trait WritableStores: WritableAccountStore + WritableTokenStore + RecordSink {}

impl<T: WritableAccountStore + WritableTokenStore + RecordSink + ?Sized> WritableStores for T {}
