//! Shared test fixtures.

use crate::config::LedgerConfig;
use crate::context::{FeeContext, HandleContext, PreHandleContext, PreHandleResult, QueryContext};
use crate::handler::{QueryHandler, TransactionHandler};
use ql_01_ledger_state::{LedgerState, SavepointStack};
use ql_02_fees::{FeeSchedule, Fees};
use shared_types::{
    Account, AccountId, HandleError, Key, PreCheckError, RecordBuilder, Token, TokenId,
    TokenPauseBody, TokenType, TransactionBody, TransactionData,
};

pub const PAYER: AccountId = AccountId(1001);
pub const NODE: AccountId = AccountId(3);
pub const ALICE: AccountId = AccountId(1002);
/// Requires a signature to receive.
pub const BOB: AccountId = AccountId(1003);
/// Treasury of [`FUNGIBLE`].
pub const TREASURY: AccountId = AccountId(1004);

/// Fungible token with pause and fee schedule keys.
pub const FUNGIBLE: TokenId = TokenId(2001);
/// Non-fungible token without any keys.
pub const NFT: TokenId = TokenId(2002);

pub const STARTING_BALANCE: u64 = 1_000_000;

pub fn key(n: u8) -> Key {
    Key::Ed25519([n; 32])
}

pub fn pause_key() -> Key {
    key(50)
}

pub fn fee_schedule_key() -> Key {
    key(51)
}

pub fn account(id: AccountId) -> Account {
    Account::new(id, key(id.num() as u8), STARTING_BALANCE)
}

pub fn ledger() -> LedgerState {
    let mut treasury = account(TREASURY);
    treasury.num_treasury_titles = 1;
    LedgerState::new()
        .with_account(account(PAYER))
        .with_account(account(NODE))
        .with_account(account(ALICE))
        .with_account(account(BOB).with_receiver_sig_required(true))
        .with_account(treasury)
        .with_token(
            Token::new(FUNGIBLE, TokenType::FungibleCommon, TREASURY)
                .with_symbol("Fungible", "FUN")
                .with_pause_key(pause_key())
                .with_fee_schedule_key(fee_schedule_key()),
        )
        .with_token(
            Token::new(NFT, TokenType::NonFungibleUnique, TREASURY).with_symbol("Art", "ART"),
        )
}

pub fn body(data: TransactionData) -> TransactionBody {
    TransactionBody::new(PAYER, NODE, data)
}

pub fn pre_handle<H: TransactionHandler>(
    handler: &H,
    op: &H::Op,
    state: &LedgerState,
) -> Result<PreHandleResult, PreCheckError> {
    let mut ctx = PreHandleContext::new(state, PAYER)?;
    handler.pre_handle(op, &mut ctx)?;
    Ok(ctx.into_result())
}

/// Runs `handle` in its own savepoint, committing on success.
pub fn handle<H: TransactionHandler>(
    handler: &H,
    op: &H::Op,
    state: &mut LedgerState,
    config: &LedgerConfig,
) -> (Result<(), HandleError>, RecordBuilder) {
    let body = body(TransactionData::TokenPause(TokenPauseBody::default()));
    let mut stack = SavepointStack::new(state);
    stack.begin();
    let (result, record) = {
        let mut ctx = HandleContext::new(&mut stack, config, &body);
        let result = handler.handle(op, &mut ctx);
        (result, ctx.into_record())
    };
    if result.is_ok() {
        stack.commit().unwrap();
    } else {
        stack.rollback().unwrap();
    }
    (result, record)
}

pub fn fees<H: TransactionHandler>(
    handler: &H,
    op: &H::Op,
    state: &LedgerState,
    schedule: &FeeSchedule,
) -> Result<Fees, PreCheckError> {
    let body = body(TransactionData::TokenPause(TokenPauseBody::default()));
    let ctx = FeeContext::new(state, schedule, &body, 100, 1);
    handler.calculate_fees(op, &ctx)
}

pub fn query_fees<H: QueryHandler>(
    handler: &H,
    op: &H::Op,
    state: &LedgerState,
    schedule: &FeeSchedule,
) -> Result<Fees, PreCheckError> {
    handler.compute_fees(op, &QueryContext::new(state, schedule))
}
