//! # Queries
//!
//! Queries follow a two-phase lifecycle (validate, then assemble the
//! response) with fee computation as an independent pure step.

use crate::entities::{AccountId, Alias, CustomFee, Key, TokenId, TokenType};
use crate::response_code::ResponseCode;
use crate::transaction::Functionality;
use serde::{Deserialize, Serialize};

/// What the caller wants back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    AnswerOnly,
    AnswerStateProof,
    CostAnswer,
    CostAnswerStateProof,
}

impl ResponseType {
    pub fn is_cost_only(self) -> bool {
        matches!(self, Self::CostAnswer | Self::CostAnswerStateProof)
    }

    pub fn wants_state_proof(self) -> bool {
        matches!(self, Self::AnswerStateProof | Self::CostAnswerStateProof)
    }
}

/// Payment attached to a paid query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayment {
    pub payer: AccountId,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHeader {
    pub response_type: ResponseType,
    pub payment: Option<QueryPayment>,
}

impl QueryHeader {
    pub fn answer_only(payment: Option<QueryPayment>) -> Self {
        Self {
            response_type: ResponseType::AnswerOnly,
            payment,
        }
    }

    pub fn cost_answer() -> Self {
        Self {
            response_type: ResponseType::CostAnswer,
            payment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountQueryBody {
    pub account_id: Option<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenQueryBody {
    pub token_id: Option<TokenId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetByKeyBody {
    pub key: Option<Key>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBySolidityIdBody {
    pub solidity_id: String,
}

/// Closed set of dispatchable queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryData {
    CryptoGetAccountBalance(AccountQueryBody),
    CryptoGetInfo(AccountQueryBody),
    TokenGetInfo(TokenQueryBody),
    GetByKey(GetByKeyBody),
    GetBySolidityId(GetBySolidityIdBody),
    CryptoGetStakers(AccountQueryBody),
}

impl QueryData {
    pub fn functionality(&self) -> Functionality {
        match self {
            Self::CryptoGetAccountBalance(_) => Functionality::CryptoGetAccountBalance,
            Self::CryptoGetInfo(_) => Functionality::CryptoGetInfo,
            Self::TokenGetInfo(_) => Functionality::TokenGetInfo,
            Self::GetByKey(_) => Functionality::GetByKey,
            Self::GetBySolidityId(_) => Functionality::GetBySolidityId,
            Self::CryptoGetStakers(_) => Functionality::CryptoGetStakers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub header: QueryHeader,
    pub data: QueryData,
}

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    pub status: ResponseCode,
    pub response_type: ResponseType,
    /// Fee for answering, in tinybars.
    pub cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingInfo {
    pub staked_account_id: Option<AccountId>,
    pub staked_node_id: Option<u64>,
    pub decline_reward: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_id: AccountId,
    pub key: Key,
    pub balance: u64,
    pub deleted: bool,
    pub receiver_sig_required: bool,
    pub memo: String,
    pub alias: Option<Alias>,
    pub staking: StakingInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseStatus {
    /// The token has no pause key.
    NotApplicable,
    Paused,
    Unpaused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub token_id: TokenId,
    pub token_type: TokenType,
    pub name: String,
    pub symbol: String,
    pub treasury_account_id: AccountId,
    pub deleted: bool,
    pub pause_status: PauseStatus,
    pub pause_key: Option<Key>,
    pub fee_schedule_key: Option<Key>,
    pub custom_fees: Vec<CustomFee>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryAnswer {
    AccountBalance { account_id: AccountId, balance: u64 },
    AccountInfo(AccountInfo),
    TokenInfo(TokenInfo),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub header: ResponseHeader,
    pub answer: Option<QueryAnswer>,
}

impl QueryResponse {
    /// A header-only response.
    pub fn status(status: ResponseCode, response_type: ResponseType, cost: u64) -> Self {
        Self {
            header: ResponseHeader {
                status,
                response_type,
                cost,
            },
            answer: None,
        }
    }
}
