//! # ql-01 Ledger State
//!
//! Authoritative in-memory ledger state plus the savepoint machinery that
//! makes every mutation all-or-nothing.
//!
//! ## Layers
//!
//! | Layer | Type | Purpose |
//! |-------|------|---------|
//! | Committed | [`LedgerState`] | Last committed snapshot, read by pre-handle and queries |
//! | Speculative | [`SavepointStack`] | Nested copy-on-write overlays used by handle |
//! | Ports | [`ReadableAccountStore`] etc. | What handlers are allowed to see |
//!
//! Reads on a [`SavepointStack`] fall through the open savepoints, newest
//! first, and finally hit the committed state. Writes only ever land in the
//! newest savepoint. Committing the outermost savepoint is the only path by
//! which a write or a record reaches [`LedgerState`].

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;
