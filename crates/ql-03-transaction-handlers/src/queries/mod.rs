//! # Query Handlers
//!
//! | Query | Paid | Answer |
//! |-------|------|--------|
//! | `CryptoGetAccountBalance` | no | balance |
//! | `CryptoGetInfo` | yes | [`AccountInfo`](shared_types::AccountInfo) |
//! | `TokenGetInfo` | yes | [`TokenInfo`](shared_types::TokenInfo) |
//!
//! Responses re-read state, so an entity that disappears between
//! validation and response assembly yields a `FAIL_INVALID` header.

pub mod crypto_get_account_balance;
pub mod crypto_get_info;
pub mod token_get_info;

pub use crypto_get_account_balance::*;
pub use crypto_get_info::*;
pub use token_get_info::*;

use crate::context::QueryContext;
use ql_01_ledger_state::ReadableAccountStore;
use shared_types::{Account, AccountQueryBody, PreCheckError, ResponseCode};

/// Resolves the queried account, rejecting missing and deleted ones.
pub(crate) fn live_account(
    op: &AccountQueryBody,
    ctx: &QueryContext<'_>,
) -> Result<Account, PreCheckError> {
    let account = op
        .account_id
        .and_then(|id| ctx.stores().get_account(id))
        .ok_or(ResponseCode::InvalidAccountId)?;
    if account.deleted {
        return Err(ResponseCode::AccountDeleted.into());
    }
    Ok(account)
}
