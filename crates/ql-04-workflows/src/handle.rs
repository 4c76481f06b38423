//! # Handle Workflow
//!
//! Applies one ordered transaction to ledger state and emits its record.
//!
//! ## Steps
//!
//! 1. Open the transaction savepoint.
//! 2. Price the transaction and check the payer's signature. An unsigned
//!    payer is recorded as `INVALID_PAYER_SIGNATURE` and charged nothing.
//! 3. Charge the payer. The node share goes to the submitting node, network
//!    and service shares to the funding account. If the fee cannot be
//!    charged the handler is skipped.
//! 4. Re-collect the remaining required keys against current state and
//!    check each one with the [`SignatureVerifier`] (`INVALID_SIGNATURE`).
//!    The fee stays charged.
//! 5. Run the handler in a child savepoint: committed on success, rolled
//!    back on failure. The fee stays charged either way.
//! 6. Emit the record into the transaction savepoint and commit it.

use crate::errors::WorkflowError;
use crate::signatures::SignatureVerifier;
use ql_01_ledger_state::{
    LedgerState, ReadableAccountStore, ReadableStores, RecordSink, SavepointStack,
    WritableAccountStore,
};
use ql_02_fees::Fees;
use ql_03_transaction_handlers::{
    FeeContext, HandleContext, LedgerConfig, PreHandleContext, TransactionDispatcher,
};
use shared_types::{
    transaction_hash, validate_false, AccountAmount, AccountId, HandleError, InvariantViolation,
    PreCheckError, ResponseCode, SignedTransaction, TokenType, TransactionBody, TransactionData,
    TransactionRecord,
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Status, fee and balance changes accumulated while handling.
#[derive(Debug)]
struct Outcome {
    status: ResponseCode,
    fee: u64,
    transfers: Vec<AccountAmount>,
    token_type: Option<TokenType>,
}

impl Outcome {
    /// Nothing was charged and the handler did not run.
    fn rejected(status: ResponseCode) -> Self {
        Self {
            status,
            fee: 0,
            transfers: Vec::new(),
            token_type: None,
        }
    }
}

pub struct HandleWorkflow<V: SignatureVerifier> {
    config: Arc<LedgerConfig>,
    verifier: V,
    dispatcher: TransactionDispatcher,
}

impl<V: SignatureVerifier> HandleWorkflow<V> {
    pub fn new(config: Arc<LedgerConfig>, verifier: V) -> Self {
        Self {
            config,
            verifier,
            dispatcher: TransactionDispatcher,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Handles `transaction` against `state`, returning the committed record.
    ///
    /// On a fatal invariant violation every write is discarded, no record is
    /// emitted and the violation is returned.
    pub fn handle(
        &self,
        state: &mut LedgerState,
        transaction: &SignedTransaction,
    ) -> Result<TransactionRecord, WorkflowError> {
        let body = &transaction.body;
        let transaction_id = body.transaction_id;
        let encoded = body
            .encode()
            .map_err(|source| WorkflowError::Encoding {
                transaction_id,
                source,
            })?;

        let mut stack = SavepointStack::new(state);
        stack.begin();

        let finished = self
            .run(&mut stack, transaction, encoded.len() as u64)
            .and_then(|outcome| {
                let record = TransactionRecord {
                    transaction_id,
                    transaction_hash: transaction_hash(&encoded),
                    status: outcome.status,
                    transaction_fee: outcome.fee,
                    memo: body.memo.clone(),
                    transfers: outcome.transfers,
                    token_type: outcome.token_type,
                };
                stack.emit(record.clone())?;
                stack.commit()?;
                Ok(record)
            });

        match finished {
            Ok(record) => {
                info!(
                    transaction = %transaction_id,
                    status = %record.status,
                    fee = record.transaction_fee,
                    "transaction handled"
                );
                Ok(record)
            }
            Err(source) => {
                stack.rollback_all();
                error!(
                    transaction = %transaction_id,
                    error = %source,
                    "invariant violated, transaction aborted"
                );
                Err(WorkflowError::Fatal {
                    transaction_id,
                    source,
                })
            }
        }
    }

    fn run(
        &self,
        stack: &mut SavepointStack<'_>,
        transaction: &SignedTransaction,
        body_bytes: u64,
    ) -> Result<Outcome, InvariantViolation> {
        let body = &transaction.body;
        let Some(data) = body.data.as_ref() else {
            return Ok(Outcome::rejected(ResponseCode::InvalidTransactionBody));
        };

        let fees = {
            let ctx = FeeContext::new(
                &*stack,
                &self.config.fees,
                body,
                body_bytes,
                transaction.signatures.len() as u64,
            );
            self.dispatcher.calculate_fees(data, &ctx)
        };
        let fees = match fees {
            Ok(fees) => fees,
            Err(err) => {
                let code = err.code();
                warn!(transaction = %body.transaction_id, %code, "fee calculation failed");
                return Ok(Outcome::rejected(code));
            }
        };

        if !self.payer_signed(&*stack, transaction) {
            warn!(transaction = %body.transaction_id, "payer has not signed");
            return Ok(Outcome::rejected(ResponseCode::InvalidPayerSignature));
        }

        let mut outcome = match self.charge(stack, body, fees) {
            Ok((fee, transfers)) => Outcome {
                status: ResponseCode::Success,
                fee,
                transfers,
                token_type: None,
            },
            Err(HandleError::Status(code)) => {
                warn!(transaction = %body.transaction_id, %code, "fee could not be charged");
                return Ok(Outcome::rejected(code));
            }
            Err(HandleError::Fatal(violation)) => return Err(violation),
        };
        debug!(transaction = %body.transaction_id, fee = outcome.fee, "fee charged");

        if let Err(code) = self.authorize(&*stack, transaction, data) {
            warn!(transaction = %body.transaction_id, %code, "authorization failed");
            outcome.status = code;
            return Ok(outcome);
        }

        stack.begin();
        let (result, record) = {
            let mut ctx = HandleContext::new(&mut *stack, &self.config, body);
            let result = self.dispatcher.handle(data, &mut ctx);
            (result, ctx.into_record())
        };
        match result {
            Ok(()) => {
                stack.commit()?;
                let (transfers, token_type) = record.into_parts();
                outcome.transfers.extend(transfers);
                outcome.token_type = token_type;
            }
            Err(HandleError::Status(code)) => {
                stack.rollback()?;
                debug!(transaction = %body.transaction_id, %code, "handler rejected transaction");
                outcome.status = code;
            }
            Err(HandleError::Fatal(violation)) => return Err(violation),
        }
        Ok(outcome)
    }

    /// Whether the payer's current key is satisfied. A missing payer is left
    /// for [`Self::charge`] to reject.
    fn payer_signed(&self, stack: &SavepointStack<'_>, transaction: &SignedTransaction) -> bool {
        stack
            .get_account(transaction.body.payer())
            .map_or(true, |payer| self.verifier.verify(&payer.key, &transaction.signatures))
    }

    /// Debits the payer and credits the node and funding accounts. Returns
    /// the amount charged with its transfers.
    fn charge(
        &self,
        stack: &mut SavepointStack<'_>,
        body: &TransactionBody,
        fees: Fees,
    ) -> Result<(u64, Vec<AccountAmount>), HandleError> {
        let total = fees
            .checked_total()
            .ok_or(HandleError::Status(ResponseCode::InsufficientTxFee))?;
        let funding_share = fees
            .network
            .checked_add(fees.service)
            .ok_or(HandleError::Status(ResponseCode::InsufficientTxFee))?;
        let mut payer = stack
            .get_account(body.payer())
            .ok_or(ResponseCode::InvalidPayerAccountId)?;
        validate_false::<HandleError>(payer.deleted, ResponseCode::PayerAccountDeleted)?;
        validate_false::<HandleError>(total > body.max_fee, ResponseCode::InsufficientTxFee)?;
        validate_false::<HandleError>(
            total > payer.balance,
            ResponseCode::InsufficientPayerBalance,
        )?;

        let mut transfers = Vec::new();
        if total == 0 {
            return Ok((0, transfers));
        }
        payer.balance -= total;
        stack.put_account(payer)?;
        transfers.push(AccountAmount {
            account_id: body.payer(),
            amount: -i128::from(total),
        });

        Self::credit(stack, body.node_account_id, fees.node, &mut transfers)?;
        let funding = self.config.accounts.funding_account;
        Self::credit(stack, funding, funding_share, &mut transfers)?;
        Ok((total, transfers))
    }

    fn credit(
        stack: &mut SavepointStack<'_>,
        account_id: AccountId,
        amount: u64,
        transfers: &mut Vec<AccountAmount>,
    ) -> Result<(), InvariantViolation> {
        if amount == 0 {
            return Ok(());
        }
        let mut account = stack
            .get_account(account_id)
            .ok_or(InvariantViolation::MissingSystemAccount {
                account: account_id,
            })?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(InvariantViolation::BalanceOverflow {
                account: account_id,
            })?;
        stack.put_account(account)?;
        transfers.push(AccountAmount {
            account_id,
            amount: i128::from(amount),
        });
        Ok(())
    }

    /// Collects the required keys and checks that every one has signed.
    fn authorize(
        &self,
        stores: &dyn ReadableStores,
        transaction: &SignedTransaction,
        data: &TransactionData,
    ) -> Result<(), ResponseCode> {
        let collect = || -> Result<_, PreCheckError> {
            let mut ctx = PreHandleContext::new(stores, transaction.body.payer())?;
            self.dispatcher.pre_handle(data, &mut ctx)?;
            Ok(ctx.into_result())
        };
        let required = collect().map_err(|err| err.code())?;
        let unsigned = required
            .all_keys()
            .find(|key| !self.verifier.verify(key, &transaction.signatures));
        match unsigned {
            Some(key) => {
                debug!(%key, "required key has not signed");
                Err(ResponseCode::InvalidSignature)
            }
            None => Ok(()),
        }
    }
}
