//! # Genesis Module
//!
//! Builds the initial ledger state.
//!
//! ## Initialization Sequence
//!
//! 1. Create system accounts (funding account, one account per node)
//! 2. Create the configured user accounts
//! 3. Create tokens and count treasury titles on their treasuries

pub mod builder;

pub use builder::*;
