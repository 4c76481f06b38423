//! # Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Modules
//!
//! - `container/` - Node configuration and its loading from file and environment
//! - `genesis/` - Initial ledger state
//! - `runner` - Batch execution: concurrent ingest, ordered handle, queries

pub mod container;
pub mod genesis;
pub mod runner;

pub use container::{load_config, NodeConfig};
pub use genesis::{GenesisBuilder, GenesisConfig, GenesisError};
pub use runner::{NodeRuntime, RuntimeError, TransactionOutcome};
