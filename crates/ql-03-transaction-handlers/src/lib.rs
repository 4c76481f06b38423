//! # ql-03 Transaction Handlers
//!
//! ## Phase Contract
//!
//! | Phase | Method | Reads | Writes | Fails with |
//! |-------|--------|-------|--------|------------|
//! | Pure checks | [`TransactionHandler::pure_checks`] | request only | nothing | `PreCheckError` |
//! | Pre-handle | [`TransactionHandler::pre_handle`] | snapshot | required keys | `PreCheckError` |
//! | Handle | [`TransactionHandler::handle`] | savepoint | savepoint | `HandleError` |
//! | Fees | [`TransactionHandler::calculate_fees`] | snapshot | nothing | `PreCheckError` |
//!
//! "Snapshot" is the committed state; "savepoint" is the newest open one.
//!
//! Handlers are stateless unit structs. [`TransactionDispatcher`] and
//! [`QueryDispatcher`] match the closed operation enums exhaustively, so
//! adding an operation without a handler does not compile.

pub mod config;
pub mod context;
pub mod dispatcher;
pub mod handler;
pub mod handlers;
pub mod queries;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::*;
pub use context::*;
pub use dispatcher::*;
pub use handler::*;
pub use handlers::*;
pub use queries::*;
