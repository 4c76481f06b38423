//! Paid account info lookup.

use super::live_account;
use crate::context::QueryContext;
use crate::handler::QueryHandler;
use ql_01_ledger_state::ReadableAccountStore;
use ql_02_fees::{sizes, Fees, SubType, UsageEstimate};
use shared_types::{
    Account, AccountInfo, AccountQueryBody, Functionality, PreCheckError, QueryAnswer,
    QueryResponse, ResponseCode, ResponseHeader, StakedId, StakingInfo,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoGetInfoHandler;

impl CryptoGetInfoHandler {
    fn info(account: Account) -> AccountInfo {
        let (staked_account_id, staked_node_id) = match account.staked_id {
            Some(StakedId::Account(id)) => (Some(id), None),
            Some(StakedId::Node(node)) => (None, Some(node)),
            None => (None, None),
        };
        AccountInfo {
            account_id: account.account_id,
            key: account.key,
            balance: account.balance,
            deleted: account.deleted,
            receiver_sig_required: account.receiver_sig_required,
            memo: account.memo,
            alias: account.alias,
            staking: StakingInfo {
                staked_account_id,
                staked_node_id,
                decline_reward: account.decline_reward,
            },
        }
    }

    fn response_bytes(account: &Account) -> u64 {
        sizes::BASIC_ACCOUNT_SIZE
            + account.key.encoded_len()
            + account.memo.len() as u64
            + account.alias.as_ref().map_or(0, |alias| alias.0.len() as u64)
    }
}

impl QueryHandler for CryptoGetInfoHandler {
    type Op = AccountQueryBody;

    fn requires_payment(&self) -> bool {
        true
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
                answer: Some(QueryAnswer::AccountInfo(Self::info(account))),
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
        op: &AccountQueryBody,
        ctx: &QueryContext<'_>,
    ) -> Result<Fees, PreCheckError> {
        let calculator = ctx
            .fee_calculator_factory(Functionality::CryptoGetInfo)
            .fee_calculator(SubType::Default);
        let Some(account) = op.account_id.and_then(|id| ctx.stores().get_account(id)) else {
            return Ok(calculator.calculate());
        };
        let usage = UsageEstimate::new()
            .with_bytes(sizes::BASIC_ENTITY_ID_SIZE)
            .with_response_bytes(Self::response_bytes(&account));
        Ok(calculator.legacy_calculate(&usage))
    }
}
