//! # ql-04 Workflows
//!
//! ## Transaction Lifecycle
//!
//! | Stage | Workflow | State access | Outcome |
//! |-------|----------|--------------|---------|
//! | Ingest | [`IngestWorkflow`] | committed snapshot, read-only | [`IngestOutcome`] or rejection |
//! | Handle | [`HandleWorkflow`] | exclusive, through savepoints | one `TransactionRecord` |
//! | Query | [`QueryWorkflow`] | committed snapshot, read-only | `QueryResponse` |
//!
//! Ingest may run concurrently for many transactions. Handle runs one
//! transaction at a time in consensus order and is the only stage that
//! writes.
//!
//! ## Handle Savepoints
//!
//! ```text
//! LedgerState
//!   └── transaction savepoint   fee charge, record
//!         └── handler savepoint entity writes (rolled back on failure)
//! ```
//!
//! A fatal invariant violation rolls back both savepoints and surfaces as
//! a [`WorkflowError`]. It never produces a record.

pub mod errors;
pub mod handle;
pub mod ingest;
pub mod query;
pub mod signatures;

#[cfg(test)]
pub(crate) mod fixtures;

pub use errors::*;
pub use handle::*;
pub use ingest::*;
pub use query::*;
pub use signatures::*;
