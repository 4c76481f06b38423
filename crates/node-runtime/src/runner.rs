//! # Node Runtime
//!
//! ## Batch Execution
//!
//! ```text
//! batch ──┬─ ingest(tx0) ─┐   blocking pool, shared read lock
//!         ├─ ingest(tx1) ─┤
//!         └─ ingest(tx2) ─┘
//!                         │   all joined, in submission order
//!                         ↓
//!                  handle(tx0), handle(tx1), ...   one blocking task,
//!                                                  exclusive write lock
//! ```
//!
//! Every ingest sees the state committed before the batch: handling does
//! not start until the last ingest has been joined. Handling then runs on
//! the blocking pool in submission order, taking the write lock once per
//! transaction.

use std::sync::Arc;

use parking_lot::RwLock;
use ql_01_ledger_state::LedgerState;
use ql_03_transaction_handlers::LedgerConfig;
use ql_04_workflows::{
    HandleWorkflow, IngestOutcome, IngestWorkflow, KeySatisfactionVerifier, QueryWorkflow,
    WorkflowError,
};
use shared_types::{
    Hash, PreCheckError, Query, QueryResponse, ResponseCode, SignedTransaction, TransactionId,
    TransactionRecord,
};
use thiserror::Error;
use tracing::{debug, error, info};

/// What happened to one submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Rejected at ingest. Nothing was charged and no record exists.
    Rejected {
        transaction_id: TransactionId,
        code: ResponseCode,
    },
    /// Handled; the record is committed to the ledger.
    Handled(TransactionRecord),
    /// Aborted by a fatal invariant violation. No state changed.
    Aborted(WorkflowError),
}

impl TransactionOutcome {
    /// The response code the submitter sees, if any.
    pub fn status(&self) -> Option<ResponseCode> {
        match self {
            Self::Rejected { code, .. } => Some(*code),
            Self::Handled(record) => Some(record.status),
            Self::Aborted(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("batch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// The main node runtime: shared ledger state plus the three workflows.
pub struct NodeRuntime {
    state: Arc<RwLock<LedgerState>>,
    ingest: IngestWorkflow,
    handle: Arc<HandleWorkflow<KeySatisfactionVerifier>>,
    query: QueryWorkflow,
}

type Ingested = (SignedTransaction, Result<IngestOutcome, PreCheckError>);

impl NodeRuntime {
    pub fn new(config: LedgerConfig, genesis: LedgerState) -> Self {
        let config = Arc::new(config);
        Self {
            state: Arc::new(RwLock::new(genesis)),
            ingest: IngestWorkflow::new(Arc::clone(&config)),
            handle: Arc::new(HandleWorkflow::new(
                Arc::clone(&config),
                KeySatisfactionVerifier::new(),
            )),
            query: QueryWorkflow::new(config),
        }
    }

    /// Shared handle to the ledger state.
    pub fn state(&self) -> Arc<RwLock<LedgerState>> {
        Arc::clone(&self.state)
    }

    pub fn state_hash(&self) -> Hash {
        self.state.read().state_hash()
    }

    /// Ingests the whole batch concurrently against the state committed
    /// before the batch, then handles the admitted transactions one at a
    /// time in batch order.
    pub async fn submit_batch(
        &self,
        batch: Vec<SignedTransaction>,
    ) -> Result<Vec<TransactionOutcome>, RuntimeError> {
        info!(transactions = batch.len(), "submitting batch");

        let tasks: Vec<_> = batch
            .into_iter()
            .map(|transaction| {
                let state = Arc::clone(&self.state);
                let ingest = self.ingest.clone();
                tokio::task::spawn_blocking(move || {
                    let result = {
                        let snapshot = state.read();
                        ingest.ingest(&*snapshot, &transaction)
                    };
                    (transaction, result)
                })
            })
            .collect();

        let mut ingested = Vec::with_capacity(tasks.len());
        for task in tasks {
            ingested.push(task.await?);
        }

        let state = Arc::clone(&self.state);
        let handle = Arc::clone(&self.handle);
        let outcomes =
            tokio::task::spawn_blocking(move || handle_all(&state, &handle, ingested)).await?;

        info!(
            handled = outcomes
                .iter()
                .filter(|o| matches!(o, TransactionOutcome::Handled(_)))
                .count(),
            state_hash = %hex::encode(self.state_hash()),
            "batch complete"
        );
        Ok(outcomes)
    }

    /// Answers a query against the committed state.
    pub fn query(&self, query: &Query) -> QueryResponse {
        let state = self.state.read();
        self.query.answer(&*state, query)
    }
}

fn handle_all(
    state: &RwLock<LedgerState>,
    handle: &HandleWorkflow<KeySatisfactionVerifier>,
    ingested: Vec<Ingested>,
) -> Vec<TransactionOutcome> {
    ingested
        .into_iter()
        .map(|(transaction, result)| match result {
            Err(err) => TransactionOutcome::Rejected {
                transaction_id: transaction.body.transaction_id,
                code: err.code(),
            },
            Ok(admitted) => {
                debug!(
                    transaction = %transaction.body.transaction_id,
                    estimated_fee = admitted.estimated_fees.total(),
                    "admitted for handling"
                );
                let mut state = state.write();
                match handle.handle(&mut state, &transaction) {
                    Ok(record) => TransactionOutcome::Handled(record),
                    Err(err) => {
                        error!(error = %err, "transaction aborted");
                        TransactionOutcome::Aborted(err)
                    }
                }
            }
        })
        .collect()
}
