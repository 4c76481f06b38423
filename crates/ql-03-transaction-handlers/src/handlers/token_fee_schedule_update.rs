//! Replace a token's custom fee schedule.

use crate::context::{FeeContext, HandleContext, PreHandleContext};
use crate::handler::TransactionHandler;
use ql_01_ledger_state::{ReadableAccountStore, ReadableTokenStore, WritableTokenStore};
use ql_02_fees::{sizes, Fees, SubType, UsageEstimate};
use shared_types::{
    validate_false, validate_true, CustomFee, CustomFeeKind, Functionality, HandleError,
    PreCheckError, ResponseCode, Token, TokenFeeScheduleUpdateBody, TokenType,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenFeeScheduleUpdateHandler;

impl TokenFeeScheduleUpdateHandler {
    fn validate_fee(
        ctx: &HandleContext<'_>,
        token: &Token,
        fee: &CustomFee,
    ) -> Result<(), HandleError> {
        let collector = fee
            .collector
            .and_then(|id| ctx.stores().get_account(id))
            .ok_or(ResponseCode::InvalidCustomFeeCollector)?;
        validate_false::<HandleError>(collector.deleted, ResponseCode::InvalidCustomFeeCollector)?;

        match &fee.kind {
            CustomFeeKind::Fixed {
                amount,
                denominating_token,
            } => {
                validate_true::<HandleError>(*amount > 0, ResponseCode::CustomFeeMustBePositive)?;
                if let Some(denomination) = denominating_token {
                    validate_true::<HandleError>(
                        ctx.stores().get_token(*denomination).is_some(),
                        ResponseCode::InvalidTokenIdInCustomFees,
                    )?;
                }
            }
            CustomFeeKind::Fractional {
                numerator,
                denominator,
                minimum,
                maximum,
            } => {
                validate_true::<HandleError>(
                    token.token_type == TokenType::FungibleCommon,
                    ResponseCode::CustomFractionalFeeOnlyAllowedForFungibleCommon,
                )?;
                validate_false::<HandleError>(
                    *denominator == 0,
                    ResponseCode::FractionDividesByZero,
                )?;
                validate_false::<HandleError>(
                    *numerator == 0,
                    ResponseCode::CustomFeeMustBePositive,
                )?;
                validate_false::<HandleError>(
                    *maximum > 0 && minimum > maximum,
                    ResponseCode::FractionalFeeMaxAmountLessThanMinAmount,
                )?;
            }
        }
        Ok(())
    }
}

/// Bytes a fee schedule occupies in state.
pub fn custom_fee_bytes(fees: &[CustomFee]) -> u64 {
    fees.iter()
        .map(|fee| {
            let body = match fee.kind {
                CustomFeeKind::Fixed { .. } => sizes::FIXED_FEE_SIZE,
                CustomFeeKind::Fractional { .. } => sizes::FRACTIONAL_FEE_SIZE,
            };
            body + sizes::BASIC_ENTITY_ID_SIZE
        })
        .sum()
}

impl TransactionHandler for TokenFeeScheduleUpdateHandler {
    type Op = TokenFeeScheduleUpdateBody;

    fn pure_checks(&self, op: &TokenFeeScheduleUpdateBody) -> Result<(), PreCheckError> {
        validate_true(op.token_id.is_some(), ResponseCode::InvalidTokenId)
    }

    fn pre_handle(
        &self,
        op: &TokenFeeScheduleUpdateBody,
        ctx: &mut PreHandleContext<'_>,
    ) -> Result<(), PreCheckError> {
        let stores = ctx.stores();
        let token = op
            .token_id
            .and_then(|id| stores.get_token(id))
            .ok_or(ResponseCode::InvalidTokenId)?;
        if let Some(fee_schedule_key) = token.fee_schedule_key {
            ctx.require_key(fee_schedule_key);
        }
        for fee in &op.custom_fees {
            let collector = fee
                .collector
                .and_then(|id| stores.get_account(id))
                .ok_or(ResponseCode::InvalidCustomFeeCollector)?;
            if collector.receiver_sig_required {
                ctx.require_key(collector.key);
            }
        }
        Ok(())
    }

    fn handle(
        &self,
        op: &TokenFeeScheduleUpdateBody,
        ctx: &mut HandleContext<'_>,
    ) -> Result<(), HandleError> {
        let token_id = op.token_id.ok_or(ResponseCode::InvalidTokenId)?;
        let mut token = ctx
            .stores()
            .get_token(token_id)
            .ok_or(ResponseCode::InvalidTokenId)?;
        validate_false::<HandleError>(token.deleted, ResponseCode::TokenWasDeleted)?;
        validate_false::<HandleError>(token.paused, ResponseCode::TokenIsPaused)?;
        validate_true::<HandleError>(
            token.fee_schedule_key.is_some(),
            ResponseCode::TokenHasNoFeeScheduleKey,
        )?;
        validate_false::<HandleError>(
            op.custom_fees.len() > ctx.config().tokens.max_custom_fees_allowed,
            ResponseCode::CustomFeesListTooLong,
        )?;
        for fee in &op.custom_fees {
            Self::validate_fee(ctx, &token, fee)?;
        }

        token.custom_fees = op.custom_fees.clone();
        let token_type = token.token_type;
        ctx.stores_mut().put_token(token)?;
        ctx.record_mut().token_type(token_type);

        debug!(token = %token_id, fees = op.custom_fees.len(), "fee schedule replaced");
        Ok(())
    }

    fn calculate_fees(
        &self,
        op: &TokenFeeScheduleUpdateBody,
        ctx: &FeeContext<'_>,
    ) -> Result<Fees, PreCheckError> {
        let factory = ctx.fee_calculator_factory(Functionality::TokenFeeScheduleUpdate);
        let Some(token) = op.token_id.and_then(|id| ctx.stores().get_token(id)) else {
            return Ok(factory.fee_calculator(SubType::Default).calculate());
        };

        let existing = custom_fee_bytes(&token.custom_fees);
        let replacement = custom_fee_bytes(&op.custom_fees);
        let usage = UsageEstimate::new()
            .with_bytes(ctx.body_bytes())
            .with_verifications(ctx.signature_count())
            .with_ram_byte_seconds(
                replacement.saturating_sub(existing) * sizes::RECEIPT_STORAGE_TIME_SEC,
            );
        Ok(factory
            .fee_calculator(SubType::from(token.token_type))
            .legacy_calculate(&usage))
    }
}
