//! # Response-Code Taxonomy
//!
//! Closed enumeration of every outcome a request can produce. Exactly one
//! code is produced per transaction or query; it is the sole cross-phase
//! channel for rejection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a transaction or query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    // =========================================================================
    // GENERAL
    // =========================================================================
    /// Pre-check passed; the request was accepted for further processing.
    Ok,
    /// The transaction was handled and its effects committed.
    Success,
    /// An unexpected internal failure.
    FailInvalid,
    /// The fee could not be computed or charged.
    FailFee,
    /// The operation is retired or not yet enabled on this network.
    NotSupported,
    /// The transaction carried no recognizable operation body.
    InvalidTransactionBody,
    /// The memo exceeds the maximum allowed length.
    MemoTooLong,
    /// The submitting node is not the node named in the transaction.
    InvalidNodeAccount,

    // =========================================================================
    // FEES & PAYER
    // =========================================================================
    /// The offered fee (max fee or query payment) does not cover the cost.
    InsufficientTxFee,
    /// The payer cannot afford the fee.
    InsufficientPayerBalance,
    /// The payer account does not exist.
    InvalidPayerAccountId,
    /// The payer account was deleted.
    PayerAccountDeleted,
    /// A required key did not sign.
    InvalidSignature,
    /// The payer's key did not sign.
    InvalidPayerSignature,

    // =========================================================================
    // ACCOUNTS
    // =========================================================================
    /// A required account id was not supplied.
    AccountIdDoesNotExist,
    /// The referenced account does not exist.
    InvalidAccountId,
    /// The referenced account was deleted.
    AccountDeleted,
    /// The transfer destination of a delete does not exist.
    InvalidTransferAccountId,
    /// The transfer destination of a delete is the account being deleted.
    TransferAccountSameAsDeleteAccount,
    /// The account is the treasury of at least one token.
    AccountIsTreasury,
    /// The account still holds token balances.
    TransactionRequiresZeroTokenBalances,

    // =========================================================================
    // STAKING
    // =========================================================================
    /// The staking target is malformed or does not exist.
    InvalidStakingId,
    /// Staking elections are disabled on this network.
    StakingNotEnabled,
    /// An account tried to stake to itself.
    SelfStakingIsNotAllowed,

    // =========================================================================
    // TOKENS
    // =========================================================================
    /// The token id is missing or refers to no token.
    InvalidTokenId,
    /// The token was deleted.
    TokenWasDeleted,
    /// The token is paused.
    TokenIsPaused,
    /// The token has no pause key, so it can be neither paused nor unpaused.
    TokenHasNoPauseKey,
    /// The token has no fee schedule key, so its custom fees are immutable.
    TokenHasNoFeeScheduleKey,

    // =========================================================================
    // CUSTOM FEES
    // =========================================================================
    /// A custom fee collector is missing, unknown or deleted.
    InvalidCustomFeeCollector,
    /// More custom fees than the network allows.
    CustomFeesListTooLong,
    /// A custom fee amount or fraction numerator is zero.
    CustomFeeMustBePositive,
    /// A fixed fee is denominated in an unknown token.
    InvalidTokenIdInCustomFees,
    /// A fractional fee has a zero denominator.
    FractionDividesByZero,
    /// A fractional fee's maximum is below its minimum.
    FractionalFeeMaxAmountLessThanMinAmount,
    /// Fractional fees only apply to fungible tokens.
    CustomFractionalFeeOnlyAllowedForFungibleCommon,
}

impl ResponseCode {
    /// Returns true for the two non-failure codes.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Ok | Self::Success)
    }

    /// Protocol name of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Success => "SUCCESS",
            Self::FailInvalid => "FAIL_INVALID",
            Self::FailFee => "FAIL_FEE",
            Self::NotSupported => "NOT_SUPPORTED",
            Self::InvalidTransactionBody => "INVALID_TRANSACTION_BODY",
            Self::MemoTooLong => "MEMO_TOO_LONG",
            Self::InvalidNodeAccount => "INVALID_NODE_ACCOUNT",
            Self::InsufficientTxFee => "INSUFFICIENT_TX_FEE",
            Self::InsufficientPayerBalance => "INSUFFICIENT_PAYER_BALANCE",
            Self::InvalidPayerAccountId => "INVALID_PAYER_ACCOUNT_ID",
            Self::PayerAccountDeleted => "PAYER_ACCOUNT_DELETED",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::InvalidPayerSignature => "INVALID_PAYER_SIGNATURE",
            Self::AccountIdDoesNotExist => "ACCOUNT_ID_DOES_NOT_EXIST",
            Self::InvalidAccountId => "INVALID_ACCOUNT_ID",
            Self::AccountDeleted => "ACCOUNT_DELETED",
            Self::InvalidTransferAccountId => "INVALID_TRANSFER_ACCOUNT_ID",
            Self::TransferAccountSameAsDeleteAccount => "TRANSFER_ACCOUNT_SAME_AS_DELETE_ACCOUNT",
            Self::AccountIsTreasury => "ACCOUNT_IS_TREASURY",
            Self::TransactionRequiresZeroTokenBalances => {
                "TRANSACTION_REQUIRES_ZERO_TOKEN_BALANCES"
            }
            Self::InvalidStakingId => "INVALID_STAKING_ID",
            Self::StakingNotEnabled => "STAKING_NOT_ENABLED",
            Self::SelfStakingIsNotAllowed => "SELF_STAKING_IS_NOT_ALLOWED",
            Self::InvalidTokenId => "INVALID_TOKEN_ID",
            Self::TokenWasDeleted => "TOKEN_WAS_DELETED",
            Self::TokenIsPaused => "TOKEN_IS_PAUSED",
            Self::TokenHasNoPauseKey => "TOKEN_HAS_NO_PAUSE_KEY",
            Self::TokenHasNoFeeScheduleKey => "TOKEN_HAS_NO_FEE_SCHEDULE_KEY",
            Self::InvalidCustomFeeCollector => "INVALID_CUSTOM_FEE_COLLECTOR",
            Self::CustomFeesListTooLong => "CUSTOM_FEES_LIST_TOO_LONG",
            Self::CustomFeeMustBePositive => "CUSTOM_FEE_MUST_BE_POSITIVE",
            Self::InvalidTokenIdInCustomFees => "INVALID_TOKEN_ID_IN_CUSTOM_FEES",
            Self::FractionDividesByZero => "FRACTION_DIVIDES_BY_ZERO",
            Self::FractionalFeeMaxAmountLessThanMinAmount => {
                "FRACTIONAL_FEE_MAX_AMOUNT_LESS_THAN_MIN_AMOUNT"
            }
            Self::CustomFractionalFeeOnlyAllowedForFungibleCommon => {
                "CUSTOM_FRACTIONAL_FEE_ONLY_ALLOWED_FOR_FUNGIBLE_COMMON"
            }
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
