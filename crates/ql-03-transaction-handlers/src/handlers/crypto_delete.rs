//! Delete an account, sweeping its whole balance into a transfer account.

use crate::context::{FeeContext, HandleContext, PreHandleContext};
use crate::handler::TransactionHandler;
use ql_01_ledger_state::{ReadableAccountStore, WritableAccountStore};
use ql_02_fees::{sizes::BASIC_ENTITY_ID_SIZE, Fees, SubType};
use shared_types::{
    validate_false, AccountId, CryptoDeleteBody, Functionality, HandleError, InvariantViolation,
    PreCheckError, ResponseCode,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoDeleteHandler;

impl CryptoDeleteHandler {
    fn ids(op: &CryptoDeleteBody) -> Result<(AccountId, AccountId), ResponseCode> {
        match (op.delete_account_id, op.transfer_account_id) {
            (Some(target), Some(transfer)) => Ok((target, transfer)),
            _ => Err(ResponseCode::AccountIdDoesNotExist),
        }
    }
}

impl TransactionHandler for CryptoDeleteHandler {
    type Op = CryptoDeleteBody;

    fn pure_checks(&self, op: &CryptoDeleteBody) -> Result<(), PreCheckError> {
        let (target, transfer) = Self::ids(op)?;
        validate_false(
            target == transfer,
            ResponseCode::TransferAccountSameAsDeleteAccount,
        )
    }

    fn pre_handle(
        &self,
        op: &CryptoDeleteBody,
        ctx: &mut PreHandleContext<'_>,
    ) -> Result<(), PreCheckError> {
        let (target_id, transfer_id) = Self::ids(op)?;
        let stores = ctx.stores();

        let target = stores
            .get_account(target_id)
            .ok_or(ResponseCode::InvalidAccountId)?;
        ctx.require_key(target.key);

        let transfer = stores
            .get_account(transfer_id)
            .ok_or(ResponseCode::InvalidTransferAccountId)?;
        if transfer.receiver_sig_required {
            ctx.require_key(transfer.key);
        }
        Ok(())
    }

    fn handle(
        &self,
        op: &CryptoDeleteBody,
        ctx: &mut HandleContext<'_>,
    ) -> Result<(), HandleError> {
        let (target_id, transfer_id) = Self::ids(op)?;
        let release_alias = ctx.config().accounts.release_alias_on_deletion;

        let mut target = ctx
            .stores()
            .get_account(target_id)
            .ok_or(ResponseCode::InvalidAccountId)?;
        validate_false::<HandleError>(target.deleted, ResponseCode::AccountDeleted)?;

        let mut transfer = ctx
            .stores()
            .get_account(transfer_id)
            .ok_or(ResponseCode::InvalidTransferAccountId)?;
        validate_false::<HandleError>(transfer.deleted, ResponseCode::AccountDeleted)?;

        validate_false::<HandleError>(
            target.num_treasury_titles > 0,
            ResponseCode::AccountIsTreasury,
        )?;
        validate_false::<HandleError>(
            target.num_positive_token_balances > 0,
            ResponseCode::TransactionRequiresZeroTokenBalances,
        )?;

        let amount = target.balance;
        transfer.balance = transfer
            .balance
            .checked_add(amount)
            .ok_or(InvariantViolation::BalanceOverflow {
                account: transfer_id,
            })?;
        target.balance = 0;
        target.deleted = true;

        let stores = ctx.stores_mut();
        if release_alias {
            if let Some(alias) = target.alias.take() {
                stores.remove_alias(&alias)?;
            }
        }
        stores.put_account(target)?;
        stores.put_account(transfer)?;

        ctx.record_mut()
            .transfer(target_id, -i128::from(amount))
            .transfer(transfer_id, i128::from(amount));

        debug!(
            account = %target_id,
            beneficiary = %transfer_id,
            amount,
            "account deleted"
        );
        Ok(())
    }

    fn calculate_fees(
        &self,
        _op: &CryptoDeleteBody,
        ctx: &FeeContext<'_>,
    ) -> Result<Fees, PreCheckError> {
        let mut calculator = ctx
            .fee_calculator_factory(Functionality::CryptoDelete)
            .fee_calculator(SubType::Default);
        calculator
            .add_bytes_per_transaction(BASIC_ENTITY_ID_SIZE * 2)
            .add_verifications_per_transaction(ctx.signature_count());
        Ok(calculator.calculate())
    }
}
