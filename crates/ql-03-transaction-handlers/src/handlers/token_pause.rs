//! Pause and unpause a token.
//!
//! Pre-handle only requires the pause key when one is configured; a token
//! without a pause key passes pre-handle and is rejected by handle with
//! `TOKEN_HAS_NO_PAUSE_KEY`.

use crate::context::{FeeContext, HandleContext, PreHandleContext};
use crate::handler::TransactionHandler;
use ql_01_ledger_state::{ReadableTokenStore, WritableTokenStore};
use ql_02_fees::{sizes::BASIC_ENTITY_ID_SIZE, Fees, SubType};
use shared_types::{
    validate_false, validate_true, Functionality, HandleError, PreCheckError, ResponseCode,
    TokenId, TokenPauseBody,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenPauseHandler;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUnpauseHandler;

fn token_id(op: &TokenPauseBody) -> Result<TokenId, ResponseCode> {
    op.token_id.ok_or(ResponseCode::InvalidTokenId)
}

fn pre_handle_pause_key(
    op: &TokenPauseBody,
    ctx: &mut PreHandleContext<'_>,
) -> Result<(), PreCheckError> {
    let token = ctx
        .stores()
        .get_token(token_id(op)?)
        .ok_or(ResponseCode::InvalidTokenId)?;
    if let Some(pause_key) = token.pause_key {
        ctx.require_key(pause_key);
    }
    Ok(())
}

fn set_paused(
    op: &TokenPauseBody,
    ctx: &mut HandleContext<'_>,
    paused: bool,
) -> Result<(), HandleError> {
    let token_id = token_id(op)?;
    let mut token = ctx
        .stores()
        .get_token(token_id)
        .ok_or(ResponseCode::InvalidTokenId)?;
    validate_false::<HandleError>(token.deleted, ResponseCode::TokenWasDeleted)?;
    validate_true::<HandleError>(token.pause_key.is_some(), ResponseCode::TokenHasNoPauseKey)?;

    token.paused = paused;
    let token_type = token.token_type;
    ctx.stores_mut().put_token(token)?;
    ctx.record_mut().token_type(token_type);

    debug!(token = %token_id, paused, "token pause status changed");
    Ok(())
}

fn pause_fees(ctx: &FeeContext<'_>, functionality: Functionality) -> Fees {
    let mut calculator = ctx
        .fee_calculator_factory(functionality)
        .fee_calculator(SubType::Default);
    calculator
        .add_bytes_per_transaction(BASIC_ENTITY_ID_SIZE)
        .add_verifications_per_transaction(ctx.signature_count());
    calculator.calculate()
}

impl TransactionHandler for TokenPauseHandler {
    type Op = TokenPauseBody;

    fn pure_checks(&self, op: &TokenPauseBody) -> Result<(), PreCheckError> {
        token_id(op)?;
        Ok(())
    }

    fn pre_handle(
        &self,
        op: &TokenPauseBody,
        ctx: &mut PreHandleContext<'_>,
    ) -> Result<(), PreCheckError> {
        pre_handle_pause_key(op, ctx)
    }

    fn handle(&self, op: &TokenPauseBody, ctx: &mut HandleContext<'_>) -> Result<(), HandleError> {
        set_paused(op, ctx, true)
    }

    fn calculate_fees(
        &self,
        _op: &TokenPauseBody,
        ctx: &FeeContext<'_>,
    ) -> Result<Fees, PreCheckError> {
        Ok(pause_fees(ctx, Functionality::TokenPause))
    }
}

impl TransactionHandler for TokenUnpauseHandler {
    type Op = TokenPauseBody;

    fn pure_checks(&self, op: &TokenPauseBody) -> Result<(), PreCheckError> {
        token_id(op)?;
        Ok(())
    }

    fn pre_handle(
        &self,
        op: &TokenPauseBody,
        ctx: &mut PreHandleContext<'_>,
    ) -> Result<(), PreCheckError> {
        pre_handle_pause_key(op, ctx)
    }

    fn handle(&self, op: &TokenPauseBody, ctx: &mut HandleContext<'_>) -> Result<(), HandleError> {
        set_paused(op, ctx, false)
    }

    fn calculate_fees(
        &self,
        _op: &TokenPauseBody,
        ctx: &FeeContext<'_>,
    ) -> Result<Fees, PreCheckError> {
        Ok(pause_fees(ctx, Functionality::TokenUnpause))
    }
}
