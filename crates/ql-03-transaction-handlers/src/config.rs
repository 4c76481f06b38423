//! Ledger configuration consumed by handlers and workflows.

use ql_02_fees::FeeSchedule;
use serde::{Deserialize, Serialize};
use shared_types::AccountId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsConfig {
    /// Free a deleted account's alias so another account can claim it.
    pub release_alias_on_deletion: bool,
    /// Receives the network and service shares of every fee.
    pub funding_account: AccountId,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            release_alias_on_deletion: true,
            funding_account: AccountId(98),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingConfig {
    pub is_enabled: bool,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self { is_enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokensConfig {
    pub max_custom_fees_allowed: usize,
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            max_custom_fees_allowed: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodesConfig {
    /// Number of consensus nodes; valid node indexes are `0..count`.
    pub count: u64,
}

impl Default for NodesConfig {
    fn default() -> Self {
        Self { count: 4 }
    }
}

/// Everything a handler may consult besides state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub accounts: AccountsConfig,
    pub staking: StakingConfig,
    pub tokens: TokensConfig,
    pub nodes: NodesConfig,
    pub fees: FeeSchedule,
}
