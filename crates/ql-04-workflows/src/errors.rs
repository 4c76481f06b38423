//! Workflow errors.

use shared_types::{EncodingError, InvariantViolation, TransactionId};
use thiserror::Error;

/// Failure that aborts a transaction without producing a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// An upstream invariant was broken while handling the transaction.
    #[error("transaction {transaction_id} aborted: {source}")]
    Fatal {
        transaction_id: TransactionId,
        #[source]
        source: InvariantViolation,
    },

    /// The transaction body could not be encoded for hashing.
    #[error("transaction {transaction_id} could not be encoded: {source}")]
    Encoding {
        transaction_id: TransactionId,
        #[source]
        source: EncodingError,
    },
}

impl WorkflowError {
    pub fn transaction_id(&self) -> TransactionId {
        match self {
            Self::Fatal { transaction_id, .. } | Self::Encoding { transaction_id, .. } => {
                *transaction_id
            }
        }
    }
}
