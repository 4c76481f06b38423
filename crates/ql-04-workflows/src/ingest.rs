//! # Ingest Workflow
//!
//! Admission checks run against the committed snapshot before a transaction
//! is submitted for ordering. Nothing here writes state, so ingest may run
//! concurrently for any number of transactions.
//!
//! ## Check Order
//!
//! 1. Body names a known operation (`INVALID_TRANSACTION_BODY`)
//! 2. Memo fits (`MEMO_TOO_LONG`)
//! 3. `max_fee > 0` (`INSUFFICIENT_TX_FEE`)
//! 4. Node account exists (`INVALID_NODE_ACCOUNT`)
//! 5. Operation pure checks
//! 6. Payer exists and is live
//! 7. Estimated fee within `max_fee` (`INSUFFICIENT_TX_FEE`)
//! 8. Payer can cover the estimate (`INSUFFICIENT_PAYER_BALANCE`)
//! 9. Operation pre-handle

use ql_01_ledger_state::{ReadableAccountStore, ReadableStores};
use ql_02_fees::{FeeSchedule, Fees};
use ql_03_transaction_handlers::{
    FeeContext, LedgerConfig, PreHandleContext, PreHandleResult, TransactionDispatcher,
};
use shared_types::{
    validate_false, validate_true, PreCheckError, ResponseCode, SignedTransaction,
    MAX_MEMO_BYTES,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// A transaction that passed ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    pub pre_handle: PreHandleResult,
    pub estimated_fees: Fees,
}

#[derive(Debug, Clone)]
pub struct IngestWorkflow {
    config: Arc<LedgerConfig>,
    dispatcher: TransactionDispatcher,
}

impl IngestWorkflow {
    pub fn new(config: Arc<LedgerConfig>) -> Self {
        Self {
            config,
            dispatcher: TransactionDispatcher,
        }
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.config.fees
    }

    /// Runs every admission check in order, stopping at the first failure.
    pub fn ingest(
        &self,
        stores: &dyn ReadableStores,
        transaction: &SignedTransaction,
    ) -> Result<IngestOutcome, PreCheckError> {
        let result = self.run(stores, transaction);
        if let Err(err) = &result {
            warn!(
                transaction = %transaction.body.transaction_id,
                code = %err.code(),
                "transaction rejected at ingest"
            );
        }
        result
    }

    fn run(
        &self,
        stores: &dyn ReadableStores,
        transaction: &SignedTransaction,
    ) -> Result<IngestOutcome, PreCheckError> {
        let body = &transaction.body;
        let data = body
            .data
            .as_ref()
            .ok_or(ResponseCode::InvalidTransactionBody)?;
        validate_false::<PreCheckError>(
            body.memo.len() > MAX_MEMO_BYTES,
            ResponseCode::MemoTooLong,
        )?;
        validate_true::<PreCheckError>(body.max_fee > 0, ResponseCode::InsufficientTxFee)?;
        validate_true::<PreCheckError>(
            stores.get_account(body.node_account_id).is_some(),
            ResponseCode::InvalidNodeAccount,
        )?;

        self.dispatcher.pure_checks(data)?;

        let mut ctx = PreHandleContext::new(stores, body.payer())?;

        let body_bytes = body
            .encode()
            .map_err(|_| ResponseCode::InvalidTransactionBody)?
            .len() as u64;
        let fee_ctx = FeeContext::new(
            stores,
            &self.config.fees,
            body,
            body_bytes,
            transaction.signatures.len() as u64,
        );
        let estimated_fees = self.dispatcher.calculate_fees(data, &fee_ctx)?;
        let total = estimated_fees
            .checked_total()
            .ok_or(PreCheckError(ResponseCode::InsufficientTxFee))?;
        validate_false::<PreCheckError>(total > body.max_fee, ResponseCode::InsufficientTxFee)?;

        let balance = stores
            .get_account(body.payer())
            .map_or(0, |payer| payer.balance);
        validate_false::<PreCheckError>(
            total > balance,
            ResponseCode::InsufficientPayerBalance,
        )?;

        self.dispatcher.pre_handle(data, &mut ctx)?;

        debug!(
            transaction = %body.transaction_id,
            functionality = ?data.functionality(),
            estimated_fee = total,
            required_keys = ctx.required_keys().len(),
            "transaction ingested"
        );
        Ok(IngestOutcome {
            pre_handle: ctx.into_result(),
            estimated_fees,
        })
    }
}
