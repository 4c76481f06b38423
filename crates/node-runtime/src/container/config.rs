//! # Node Configuration
//!
//! Unified configuration for the ledger rules and runtime parameters.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. JSON file named by `QL_CONFIG` (missing sections keep their defaults)
//! 3. `QL_*` environment overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `QL_STAKING_ENABLED` | `ledger.staking.is_enabled` |
//! | `QL_NODE_COUNT` | `ledger.nodes.count` |
//! | `QL_MAX_CUSTOM_FEES` | `ledger.tokens.max_custom_fees_allowed` |
//! | `QL_RELEASE_ALIAS_ON_DELETION` | `ledger.accounts.release_alias_on_deletion` |
//! | `QL_FUNDING_ACCOUNT` | `ledger.accounts.funding_account` |
//! | `QL_BATCH` | `runtime.batch_path` |

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ql_02_fees::FeeScheduleError;
use ql_03_transaction_handlers::LedgerConfig;
use serde::{Deserialize, Serialize};
use shared_types::AccountId;
use thiserror::Error;
use tracing::{info, warn};

use crate::genesis::GenesisConfig;

/// Complete node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Rules handlers and workflows consult.
    pub ledger: LedgerConfig,
    /// Initial accounts and tokens.
    pub genesis: GenesisConfig,
    /// Runtime parameters.
    pub runtime: RuntimeConfig,
}

impl NodeConfig {
    /// Reads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects configurations the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ledger.fees.validate()?;
        if self.ledger.nodes.count == 0 {
            return Err(ConfigError::NoNodes);
        }
        Ok(())
    }

    /// Applies `QL_*` overrides read through `lookup`. Unparseable values
    /// are logged and ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(enabled) = parse_var::<bool>(&lookup, "QL_STAKING_ENABLED") {
            self.ledger.staking.is_enabled = enabled;
        }
        if let Some(count) = parse_var::<u64>(&lookup, "QL_NODE_COUNT") {
            self.ledger.nodes.count = count;
        }
        if let Some(max) = parse_var::<usize>(&lookup, "QL_MAX_CUSTOM_FEES") {
            self.ledger.tokens.max_custom_fees_allowed = max;
        }
        if let Some(release) = parse_var::<bool>(&lookup, "QL_RELEASE_ALIAS_ON_DELETION") {
            self.ledger.accounts.release_alias_on_deletion = release;
        }
        if let Some(num) = parse_var::<u64>(&lookup, "QL_FUNDING_ACCOUNT") {
            self.ledger.accounts.funding_account = AccountId(num);
        }
        if let Some(path) = lookup("QL_BATCH") {
            self.runtime.batch_path = Some(PathBuf::from(path));
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "ignoring unparseable override");
            None
        }
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// JSON file holding a batch of signed transactions to run at startup.
    pub batch_path: Option<PathBuf>,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid fee schedule: {0}")]
    FeeSchedule(#[from] FeeScheduleError),

    #[error("node count must be at least 1")]
    NoNodes,
}

/// Load configuration from file and environment.
pub fn load_config() -> Result<NodeConfig, ConfigError> {
    let mut config = match std::env::var("QL_CONFIG") {
        Ok(path) => {
            info!(path = %path, "loading configuration file");
            NodeConfig::from_file(path)?
        }
        Err(_) => NodeConfig::default(),
    };
    config.apply_env_overrides(|name| std::env::var(name).ok());
    config.validate()?;
    Ok(config)
}
