//! # Container Module
//!
//! Node configuration: ledger rules, genesis contents and runtime knobs.

pub mod config;

pub use config::*;
