//! # StakedId Codec
//!
//! A staking election is stored in one signed 64-bit slot:
//!
//! | Election | Raw value |
//! |----------|-----------|
//! | stake to account `a` (`a >= 0`) | `a` |
//! | stake to node `n` (`n >= 0`) | `-n - 1` |
//!
//! The node encoding is offset by one so that node `0` is `-1` and never
//! collides with account `0`. Decoding `-1` always yields node `0`.

use crate::entities::AccountId;
use crate::errors::InvariantViolation;
use serde::{Deserialize, Serialize};

/// Which half of the slot an election declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StakedIdKind {
    Account,
    Node,
}

/// A decoded staking election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i64", from = "i64")]
pub enum StakedId {
    Account(AccountId),
    Node(u64),
}

impl StakedId {
    /// Resolves a declared election into a `StakedId`.
    ///
    /// The input for the declared kind must be present and must fit the
    /// non-negative half of an `i64`. Anything else means validation was
    /// skipped upstream, so it is reported as an [`InvariantViolation`].
    pub fn resolve(
        kind: StakedIdKind,
        account: Option<AccountId>,
        node: Option<u64>,
    ) -> Result<Self, InvariantViolation> {
        let resolved = match (kind, account, node) {
            (StakedIdKind::Account, Some(account), _) => Self::Account(account),
            (StakedIdKind::Node, _, Some(node)) => Self::Node(node),
            (kind, _, _) => return Err(InvariantViolation::UnresolvableStakedId { kind }),
        };
        let value = match resolved {
            Self::Account(account) => account.num(),
            Self::Node(node) => node,
        };
        if value > i64::MAX as u64 {
            return Err(InvariantViolation::StakedIdOutOfRange { value });
        }
        Ok(resolved)
    }

    /// `encode(kind, accountNumber | nodeIndex) -> i64`.
    pub fn encode(
        kind: StakedIdKind,
        account: Option<AccountId>,
        node: Option<u64>,
    ) -> Result<i64, InvariantViolation> {
        Self::resolve(kind, account, node).map(Self::to_raw)
    }

    /// Encodes into the signed slot. Values are range-checked by
    /// [`StakedId::resolve`]; out-of-range values saturate.
    pub fn to_raw(self) -> i64 {
        match self {
            Self::Account(account) => i64::try_from(account.num()).unwrap_or(i64::MAX),
            Self::Node(node) => -i64::try_from(node).unwrap_or(i64::MAX) - 1,
        }
    }

    /// Decodes a signed slot. Total: every `i64` maps to exactly one election.
    pub fn from_raw(raw: i64) -> Self {
        if raw >= 0 {
            Self::Account(AccountId(raw as u64))
        } else {
            // -(raw + 1) cannot overflow, even for i64::MIN
            Self::Node((-(raw + 1)) as u64)
        }
    }

    pub fn kind(self) -> StakedIdKind {
        match self {
            Self::Account(_) => StakedIdKind::Account,
            Self::Node(_) => StakedIdKind::Node,
        }
    }
}

impl From<StakedId> for i64 {
    fn from(id: StakedId) -> Self {
        id.to_raw()
    }
}

impl From<i64> for StakedId {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}
