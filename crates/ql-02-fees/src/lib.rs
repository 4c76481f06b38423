//! # ql-02 Fees
//!
//! Every fee is a pure function of the request and a read-only view of
//! state. This crate prices resource usage; handlers decide what usage to
//! report.
//!
//! ## Calculation Models
//!
//! | Model | Entry point | Used by |
//! |-------|-------------|---------|
//! | Usage estimate | [`FeeCalculator::legacy_calculate`] | updates, paid queries |
//! | Linear | `add_*` then [`FeeCalculator::calculate`] | deletes, pause/unpause |
//!
//! A calculator with nothing added prices to the functionality's constant
//! fee, which is what handlers return when the entity they would measure is
//! missing.

pub mod domain;

pub use domain::*;
