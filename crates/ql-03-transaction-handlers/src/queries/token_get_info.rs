//! Paid token info lookup. Deleted tokens still answer.

use crate::context::QueryContext;
use crate::handler::QueryHandler;
use crate::handlers::custom_fee_bytes;
use ql_01_ledger_state::ReadableTokenStore;
use ql_02_fees::{sizes, Fees, SubType, UsageEstimate};
use shared_types::{
    Functionality, Key, PauseStatus, PreCheckError, QueryAnswer, QueryResponse, ResponseCode,
    ResponseHeader, Token, TokenInfo, TokenQueryBody,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenGetInfoHandler;

impl TokenGetInfoHandler {
    fn token(op: &TokenQueryBody, ctx: &QueryContext<'_>) -> Result<Token, PreCheckError> {
        let token_id = op.token_id.ok_or(ResponseCode::InvalidTokenId)?;
        ctx.stores()
            .get_token(token_id)
            .ok_or_else(|| ResponseCode::InvalidTokenId.into())
    }

    fn info(token: Token) -> TokenInfo {
        let pause_status = match (&token.pause_key, token.paused) {
            (None, _) => PauseStatus::NotApplicable,
            (Some(_), true) => PauseStatus::Paused,
            (Some(_), false) => PauseStatus::Unpaused,
        };
        TokenInfo {
            token_id: token.token_id,
            token_type: token.token_type,
            name: token.name,
            symbol: token.symbol,
            treasury_account_id: token.treasury_account_id,
            deleted: token.deleted,
            pause_status,
            pause_key: token.pause_key,
            fee_schedule_key: token.fee_schedule_key,
            custom_fees: token.custom_fees,
        }
    }

    fn response_bytes(token: &Token) -> u64 {
        let key_bytes = |key: &Option<Key>| key.as_ref().map_or(0, |k| k.encoded_len());
        sizes::BASIC_TOKEN_SIZE
            + token.name.len() as u64
            + token.symbol.len() as u64
            + key_bytes(&token.pause_key)
            + key_bytes(&token.fee_schedule_key)
            + custom_fee_bytes(&token.custom_fees)
    }
}

impl QueryHandler for TokenGetInfoHandler {
    type Op = TokenQueryBody;

    fn requires_payment(&self) -> bool {
        true
    }

    fn validate(&self, op: &TokenQueryBody, ctx: &QueryContext<'_>) -> Result<(), PreCheckError> {
        Self::token(op, ctx).map(|_| ())
    }

    fn find_response(
        &self,
        op: &TokenQueryBody,
        ctx: &QueryContext<'_>,
        header: ResponseHeader,
    ) -> QueryResponse {
        match Self::token(op, ctx) {
            Ok(token) => QueryResponse {
                header,
                answer: Some(QueryAnswer::TokenInfo(Self::info(token))),
            },
            Err(_) => QueryResponse::status(
                ResponseCode::FailInvalid,
                header.response_type,
                header.cost,
            ),
        }
    }

    fn compute_fees(
        &self,
        op: &TokenQueryBody,
        ctx: &QueryContext<'_>,
    ) -> Result<Fees, PreCheckError> {
        let factory = ctx.fee_calculator_factory(Functionality::TokenGetInfo);
        let Ok(token) = Self::token(op, ctx) else {
            return Ok(factory.fee_calculator(SubType::Default).calculate());
        };
        let usage = UsageEstimate::new()
            .with_bytes(sizes::BASIC_ENTITY_ID_SIZE)
            .with_response_bytes(Self::response_bytes(&token));
        Ok(factory
            .fee_calculator(SubType::from(token.token_type))
            .legacy_calculate(&usage))
    }
}
