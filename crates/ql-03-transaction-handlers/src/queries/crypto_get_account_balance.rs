//! Free balance lookup.

use super::live_account;
use crate::context::QueryContext;
use crate::handler::QueryHandler;
use ql_02_fees::Fees;
use shared_types::{
    AccountQueryBody, PreCheckError, QueryAnswer, QueryResponse, ResponseCode, ResponseHeader,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoGetAccountBalanceHandler;

impl QueryHandler for CryptoGetAccountBalanceHandler {
    type Op = AccountQueryBody;

    fn requires_payment(&self) -> bool {
        false
    }

    fn validate(&self, op: &AccountQueryBody, ctx: &QueryContext<'_>) -> Result<(), PreCheckError> {
        live_account(op, ctx).map(|_| ())
    }

    fn find_response(
        &self,
        op: &AccountQueryBody,
        ctx: &QueryContext<'_>,
        header: ResponseHeader,
    ) -> QueryResponse {
        match live_account(op, ctx) {
            Ok(account) => QueryResponse {
                header,
                answer: Some(QueryAnswer::AccountBalance {
                    account_id: account.account_id,
                    balance: account.balance,
                }),
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
        _op: &AccountQueryBody,
        _ctx: &QueryContext<'_>,
    ) -> Result<Fees, PreCheckError> {
        Ok(Fees::FREE)
    }
}
