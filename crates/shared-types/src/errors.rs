//! # Error Types
//!
//! Three failure kinds, ordered by phase:
//!
//! | Kind | Type | Carries |
//! |------|------|---------|
//! | Pre-check / pre-handle / query validation | [`PreCheckError`] | `ResponseCode` |
//! | Mutation | [`HandleError::Status`] | `ResponseCode` |
//! | Broken upstream contract | [`InvariantViolation`] | diagnostic only |
//!
//! Invariant violations signal a bug, not user error, so they are never
//! converted into a response code.

use crate::entities::AccountId;
use crate::response_code::ResponseCode;
use crate::staked_id::StakedIdKind;
use thiserror::Error;

/// Rejection raised before any state is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pre-check failed: {0}")]
pub struct PreCheckError(pub ResponseCode);

impl PreCheckError {
    pub fn code(&self) -> ResponseCode {
        self.0
    }
}

impl From<ResponseCode> for PreCheckError {
    fn from(code: ResponseCode) -> Self {
        Self(code)
    }
}

/// A programmer-contract violation detected at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A staking election reached the codec without a value for its kind.
    #[error("staked id election declared {kind:?} but carries no value for it")]
    UnresolvableStakedId { kind: StakedIdKind },

    /// A staking value does not fit the signed slot.
    #[error("staked id value {value} does not fit the signed slot")]
    StakedIdOutOfRange { value: u64 },

    /// Crediting an account would overflow its balance.
    #[error("balance overflow crediting account {account}")]
    BalanceOverflow { account: AccountId },

    /// A node or funding account that fees are paid into does not exist.
    #[error("system account {account} does not exist")]
    MissingSystemAccount { account: AccountId },

    /// A savepoint operation was attempted with no savepoint open.
    #[error("no savepoint is open")]
    NoOpenSavepoint,
}

/// Failure raised while mutating state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleError {
    /// The authoritative state contradicts the request.
    #[error("handle failed: {0}")]
    Status(ResponseCode),

    /// An upstream invariant was broken; the transaction must be aborted.
    #[error("invariant violated: {0}")]
    Fatal(#[from] InvariantViolation),
}

impl HandleError {
    /// The user-facing code, if this is not a fatal violation.
    pub fn status(&self) -> Option<ResponseCode> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Fatal(_) => None,
        }
    }
}

impl From<ResponseCode> for HandleError {
    fn from(code: ResponseCode) -> Self {
        Self::Status(code)
    }
}

impl From<PreCheckError> for HandleError {
    fn from(err: PreCheckError) -> Self {
        Self::Status(err.0)
    }
}

/// Serialization of a transaction body failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("encoding failed: {0}")]
pub struct EncodingError(pub String);

/// Fails with `code` unless `condition` holds.
pub fn validate_true<E: From<ResponseCode>>(condition: bool, code: ResponseCode) -> Result<(), E> {
    if condition {
        Ok(())
    } else {
        Err(E::from(code))
    }
}

/// Fails with `code` if `condition` holds.
pub fn validate_false<E: From<ResponseCode>>(condition: bool, code: ResponseCode) -> Result<(), E> {
    validate_true(!condition, code)
}
