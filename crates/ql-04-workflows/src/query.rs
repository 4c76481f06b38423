//! # Query Workflow
//!
//! | Response type | Outcome |
//! |---------------|---------|
//! | `ANSWER_STATE_PROOF`, `COST_ANSWER_STATE_PROOF` | `NOT_SUPPORTED` |
//! | `COST_ANSWER` | `OK` with the cost, no answer |
//! | `ANSWER_ONLY` | payment checked if the query is paid, then the answer |
//!
//! Queries only read the committed snapshot. Payments are checked for
//! sufficiency here; settling them is the job of the transfer that carries
//! them.

use ql_01_ledger_state::{ReadableAccountStore, ReadableStores};
use ql_03_transaction_handlers::{LedgerConfig, QueryContext, QueryDispatcher};
use shared_types::{
    validate_false, PreCheckError, Query, QueryPayment, QueryResponse, ResponseCode,
    ResponseHeader,
};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct QueryWorkflow {
    config: Arc<LedgerConfig>,
    dispatcher: QueryDispatcher,
}

impl QueryWorkflow {
    pub fn new(config: Arc<LedgerConfig>) -> Self {
        Self {
            config,
            dispatcher: QueryDispatcher,
        }
    }

    /// Answers `query`. Every failure is reported in the response header.
    pub fn answer(&self, stores: &dyn ReadableStores, query: &Query) -> QueryResponse {
        let response_type = query.header.response_type;
        let functionality = query.data.functionality();

        if response_type.wants_state_proof() {
            debug!(?functionality, "state proofs are not supported");
            return QueryResponse::status(ResponseCode::NotSupported, response_type, 0);
        }

        let ctx = QueryContext::new(stores, &self.config.fees);
        let cost = match self.validate_and_price(&ctx, query) {
            Ok(cost) => cost,
            Err(err) => {
                warn!(?functionality, code = %err.code(), "query rejected");
                return QueryResponse::status(err.code(), response_type, 0);
            }
        };

        if response_type.is_cost_only() {
            return QueryResponse::status(ResponseCode::Ok, response_type, cost);
        }

        if self.dispatcher.requires_payment(&query.data) {
            if let Err(err) = Self::check_payment(stores, query.header.payment, cost) {
                warn!(?functionality, code = %err.code(), cost, "query payment rejected");
                return QueryResponse::status(err.code(), response_type, cost);
            }
        }

        let header = ResponseHeader {
            status: ResponseCode::Ok,
            response_type,
            cost,
        };
        let response = self.dispatcher.find_response(&query.data, &ctx, header);
        debug!(?functionality, status = %response.header.status, cost, "query answered");
        response
    }

    fn validate_and_price(
        &self,
        ctx: &QueryContext<'_>,
        query: &Query,
    ) -> Result<u64, PreCheckError> {
        self.dispatcher.validate(&query.data, ctx)?;
        let fees = self.dispatcher.compute_fees(&query.data, ctx)?;
        fees
            .checked_total()
            .ok_or(PreCheckError(ResponseCode::InsufficientTxFee))
    }

    fn check_payment(
        stores: &dyn ReadableStores,
        payment: Option<QueryPayment>,
        cost: u64,
    ) -> Result<(), PreCheckError> {
        let amount = payment.map_or(0, |p| p.amount);
        validate_false::<PreCheckError>(amount < cost, ResponseCode::InsufficientTxFee)?;
        let Some(payment) = payment else {
            return Ok(());
        };
        let payer = stores
            .get_account(payment.payer)
            .ok_or(ResponseCode::InvalidPayerAccountId)?;
        validate_false::<PreCheckError>(payer.deleted, ResponseCode::PayerAccountDeleted)?;
        validate_false::<PreCheckError>(
            payer.balance < payment.amount,
            ResponseCode::InsufficientPayerBalance,
        )
    }
}
