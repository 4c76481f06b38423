//! Update an account's key, memo, receiver-signature flag and staking
//! election.

use crate::context::{FeeContext, HandleContext, PreHandleContext};
use crate::handler::TransactionHandler;
use ql_01_ledger_state::{ReadableAccountStore, WritableAccountStore};
use ql_02_fees::{sizes, Fees, SubType, UsageEstimate};
use shared_types::{
    validate_false, validate_true, Account, CryptoUpdateBody, Functionality, HandleError,
    PreCheckError, ResponseCode, StakedId, StakedIdKind, StakingElection, MAX_MEMO_BYTES,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoUpdateHandler;

impl CryptoUpdateHandler {
    /// Decodes the election through the StakedId codec. A node index that
    /// does not fit is treated like a missing one.
    fn resolve_election(election: &StakingElection) -> Result<StakedId, HandleError> {
        let node = election.node_id.and_then(|n| u64::try_from(n).ok());
        Ok(StakedId::resolve(election.kind, election.account_id, node)?)
    }

    fn validate_stake_target(
        ctx: &HandleContext<'_>,
        account: &Account,
        staked_id: StakedId,
    ) -> Result<(), HandleError> {
        match staked_id {
            StakedId::Node(node) => validate_true(
                node < ctx.config().nodes.count,
                ResponseCode::InvalidStakingId,
            ),
            StakedId::Account(target) => {
                validate_false::<HandleError>(
                    target == account.account_id,
                    ResponseCode::SelfStakingIsNotAllowed,
                )?;
                let staked = ctx
                    .stores()
                    .get_account(target)
                    .ok_or(ResponseCode::InvalidStakingId)?;
                validate_false(staked.deleted, ResponseCode::InvalidStakingId)
            }
        }
    }

    fn variable_bytes(account: &Account) -> u64 {
        account.memo.len() as u64 + account.key.encoded_len()
    }
}

impl TransactionHandler for CryptoUpdateHandler {
    type Op = CryptoUpdateBody;

    fn pure_checks(&self, op: &CryptoUpdateBody) -> Result<(), PreCheckError> {
        validate_true::<PreCheckError>(
            op.account_id.is_some(),
            ResponseCode::AccountIdDoesNotExist,
        )?;
        if let Some(election) = &op.staking {
            let resolvable = match election.kind {
                StakedIdKind::Account => election.account_id.is_some(),
                StakedIdKind::Node => election.node_id.is_some_and(|n| n >= 0),
            };
            validate_true::<PreCheckError>(resolvable, ResponseCode::InvalidStakingId)?;
        }
        if let Some(memo) = &op.memo {
            validate_false::<PreCheckError>(
                memo.len() > MAX_MEMO_BYTES,
                ResponseCode::MemoTooLong,
            )?;
        }
        Ok(())
    }

    fn pre_handle(
        &self,
        op: &CryptoUpdateBody,
        ctx: &mut PreHandleContext<'_>,
    ) -> Result<(), PreCheckError> {
        let target_id = op.account_id.ok_or(ResponseCode::AccountIdDoesNotExist)?;
        let target = ctx
            .stores()
            .get_account(target_id)
            .ok_or(ResponseCode::InvalidAccountId)?;
        ctx.require_key(target.key);
        if let Some(key) = &op.key {
            ctx.require_key(key.clone());
        }
        Ok(())
    }

    fn handle(
        &self,
        op: &CryptoUpdateBody,
        ctx: &mut HandleContext<'_>,
    ) -> Result<(), HandleError> {
        let target_id = op.account_id.ok_or(ResponseCode::AccountIdDoesNotExist)?;
        let current = ctx
            .stores()
            .get_account(target_id)
            .ok_or(ResponseCode::InvalidAccountId)?;
        validate_false::<HandleError>(current.deleted, ResponseCode::AccountDeleted)?;

        let mut updated = current.clone();

        if let Some(election) = &op.staking {
            validate_true::<HandleError>(
                ctx.config().staking.is_enabled,
                ResponseCode::StakingNotEnabled,
            )?;
            let staked_id = Self::resolve_election(election)?;
            Self::validate_stake_target(ctx, &current, staked_id)?;
            debug!(
                account = %target_id,
                staked_id = staked_id.to_raw(),
                "staking election updated"
            );
            updated.staked_id = Some(staked_id);
        }
        if let Some(decline) = op.decline_reward {
            updated.decline_reward = decline;
        }
        if let Some(key) = &op.key {
            updated.key = key.clone();
        }
        if let Some(memo) = &op.memo {
            updated.memo = memo.clone();
        }
        if let Some(required) = op.receiver_sig_required {
            updated.receiver_sig_required = required;
        }

        ctx.stores_mut().put_account(updated)?;
        debug!(account = %target_id, "account updated");
        Ok(())
    }

    fn calculate_fees(
        &self,
        op: &CryptoUpdateBody,
        ctx: &FeeContext<'_>,
    ) -> Result<Fees, PreCheckError> {
        let calculator = ctx
            .fee_calculator_factory(Functionality::CryptoUpdate)
            .fee_calculator(SubType::Default);

        let Some(current) = op.account_id.and_then(|id| ctx.stores().get_account(id)) else {
            return Ok(calculator.calculate());
        };

        let old_bytes = Self::variable_bytes(&current);
        let new_bytes = op.memo.as_ref().map_or(current.memo.len() as u64, |m| m.len() as u64)
            + op.key.as_ref().map_or(current.key.encoded_len(), |k| k.encoded_len());
        let usage = UsageEstimate::new()
            .with_bytes(ctx.body_bytes())
            .with_verifications(ctx.signature_count())
            .with_ram_byte_seconds(
                new_bytes.saturating_sub(old_bytes) * sizes::RECEIPT_STORAGE_TIME_SEC,
            );
        Ok(calculator.legacy_calculate(&usage))
    }
}
