//! # Dispatch Tables
//!
//! Every transaction and query variant maps to exactly one handler. The
//! matches are exhaustive, so a new variant without a handler does not
//! compile.
//!
//! | Variant | Handler |
//! |---------|---------|
//! | `CryptoDelete` | [`CryptoDeleteHandler`] |
//! | `CryptoUpdate` | [`CryptoUpdateHandler`] |
//! | `TokenPause` / `TokenUnpause` | [`TokenPauseHandler`] / [`TokenUnpauseHandler`] |
//! | `TokenFeeScheduleUpdate` | [`TokenFeeScheduleUpdateHandler`] |
//! | `CryptoAddLiveHash` / `CryptoDeleteLiveHash` | [`NotSupportedHandler`] |
//! | `CryptoGetAccountBalance` | [`CryptoGetAccountBalanceHandler`] |
//! | `CryptoGetInfo` | [`CryptoGetInfoHandler`] |
//! | `TokenGetInfo` | [`TokenGetInfoHandler`] |
//! | `GetByKey` / `GetBySolidityId` / `CryptoGetStakers` | [`NotSupportedHandler`] |

use crate::context::{FeeContext, HandleContext, PreHandleContext, QueryContext};
use crate::handler::{QueryHandler, TransactionHandler};
use crate::handlers::{
    CryptoDeleteHandler, CryptoUpdateHandler, NotSupportedHandler, TokenFeeScheduleUpdateHandler,
    TokenPauseHandler, TokenUnpauseHandler,
};
use crate::queries::{CryptoGetAccountBalanceHandler, CryptoGetInfoHandler, TokenGetInfoHandler};
use ql_02_fees::Fees;
use shared_types::{
    AccountQueryBody, GetByKeyBody, GetBySolidityIdBody, HandleError, LiveHashBody,
    PreCheckError, QueryData, QueryResponse, ResponseHeader, TransactionData,
};
use tracing::trace;

const LIVE_HASH: NotSupportedHandler<LiveHashBody> = NotSupportedHandler::new();
const GET_BY_KEY: NotSupportedHandler<GetByKeyBody> = NotSupportedHandler::new();
const GET_BY_SOLIDITY_ID: NotSupportedHandler<GetBySolidityIdBody> = NotSupportedHandler::new();
const GET_STAKERS: NotSupportedHandler<AccountQueryBody> = NotSupportedHandler::new();

/// Expands `$body` once per variant with `$handler` bound to the variant's
/// handler and `$op` to its body.
macro_rules! with_transaction_handler {
    ($data:expr, |$handler:ident, $op:ident| $body:expr) => {
        match $data {
            TransactionData::CryptoDelete($op) => {
                let $handler = &CryptoDeleteHandler;
                $body
            }
            TransactionData::CryptoUpdate($op) => {
                let $handler = &CryptoUpdateHandler;
                $body
            }
            TransactionData::TokenPause($op) => {
                let $handler = &TokenPauseHandler;
                $body
            }
            TransactionData::TokenUnpause($op) => {
                let $handler = &TokenUnpauseHandler;
                $body
            }
            TransactionData::TokenFeeScheduleUpdate($op) => {
                let $handler = &TokenFeeScheduleUpdateHandler;
                $body
            }
            TransactionData::CryptoAddLiveHash($op)
            | TransactionData::CryptoDeleteLiveHash($op) => {
                let $handler = &LIVE_HASH;
                $body
            }
        }
    };
}

macro_rules! with_query_handler {
    ($data:expr, |$handler:ident, $op:ident| $body:expr) => {
        match $data {
            QueryData::CryptoGetAccountBalance($op) => {
                let $handler = &CryptoGetAccountBalanceHandler;
                $body
            }
            QueryData::CryptoGetInfo($op) => {
                let $handler = &CryptoGetInfoHandler;
                $body
            }
            QueryData::TokenGetInfo($op) => {
                let $handler = &TokenGetInfoHandler;
                $body
            }
            QueryData::GetByKey($op) => {
                let $handler = &GET_BY_KEY;
                $body
            }
            QueryData::GetBySolidityId($op) => {
                let $handler = &GET_BY_SOLIDITY_ID;
                $body
            }
            QueryData::CryptoGetStakers($op) => {
                let $handler = &GET_STAKERS;
                $body
            }
        }
    };
}

/// Routes each transaction phase to the handler for its variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionDispatcher;

impl TransactionDispatcher {
    pub fn pure_checks(&self, data: &TransactionData) -> Result<(), PreCheckError> {
        trace!(functionality = ?data.functionality(), "dispatching pure checks");
        with_transaction_handler!(data, |handler, op| handler.pure_checks(op))
    }

    pub fn pre_handle(
        &self,
        data: &TransactionData,
        ctx: &mut PreHandleContext<'_>,
    ) -> Result<(), PreCheckError> {
        trace!(functionality = ?data.functionality(), "dispatching pre-handle");
        with_transaction_handler!(data, |handler, op| handler.pre_handle(op, ctx))
    }

    pub fn handle(
        &self,
        data: &TransactionData,
        ctx: &mut HandleContext<'_>,
    ) -> Result<(), HandleError> {
        trace!(functionality = ?data.functionality(), "dispatching handle");
        with_transaction_handler!(data, |handler, op| handler.handle(op, ctx))
    }

    pub fn calculate_fees(
        &self,
        data: &TransactionData,
        ctx: &FeeContext<'_>,
    ) -> Result<Fees, PreCheckError> {
        with_transaction_handler!(data, |handler, op| handler.calculate_fees(op, ctx))
    }
}

/// Routes each query phase to the handler for its variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryDispatcher;

impl QueryDispatcher {
    pub fn requires_payment(&self, data: &QueryData) -> bool {
        with_query_handler!(data, |handler, _op| handler.requires_payment())
    }

    pub fn validate(&self, data: &QueryData, ctx: &QueryContext<'_>) -> Result<(), PreCheckError> {
        trace!(functionality = ?data.functionality(), "dispatching query validation");
        with_query_handler!(data, |handler, op| handler.validate(op, ctx))
    }

    pub fn find_response(
        &self,
        data: &QueryData,
        ctx: &QueryContext<'_>,
        header: ResponseHeader,
    ) -> QueryResponse {
        with_query_handler!(data, |handler, op| handler.find_response(op, ctx, header))
    }

    pub fn compute_fees(
        &self,
        data: &QueryData,
        ctx: &QueryContext<'_>,
    ) -> Result<Fees, PreCheckError> {
        with_query_handler!(data, |handler, op| handler.compute_fees(op, ctx))
    }
}
