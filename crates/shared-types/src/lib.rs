//! # Shared Types Crate
//!
//! Domain entities, operation bodies, queries and records shared by every
//! Quantum-Ledger crate.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **One Failure Channel**: [`ResponseCode`] is the only value that tells a
//!   caller why a request was rejected. Programmer-contract violations are a
//!   separate type ([`InvariantViolation`]) and never become a response code.
//! - **Copy-on-Write Entities**: [`Account`] and [`Token`] are plain values.
//!   Stores hand out clones and accept whole replacement values.

pub mod entities;
pub mod errors;
pub mod query;
pub mod record;
pub mod response_code;
pub mod staked_id;
pub mod transaction;

pub use entities::*;
pub use errors::*;
pub use query::*;
pub use record::*;
pub use response_code::ResponseCode;
pub use staked_id::{StakedId, StakedIdKind};
pub use transaction::*;
