//! # Fee Schedule
//!
//! Prices per functionality and sub-type. Lookups fall back from the exact
//! `(functionality, sub_type)` entry to the functionality's default sub-type
//! and finally to [`FeeSchedule::default_prices`].

use crate::domain::errors::FeeScheduleError;
use serde::{Deserialize, Serialize};
use shared_types::Functionality;
use std::collections::HashSet;

/// Basis points in one whole.
pub const BPS_WHOLE: u32 = 10_000;

/// Variant of a functionality that may be priced differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubType {
    #[default]
    Default,
    TokenFungibleCommon,
    TokenNonFungibleUnique,
}

impl From<shared_types::TokenType> for SubType {
    fn from(token_type: shared_types::TokenType) -> Self {
        match token_type {
            shared_types::TokenType::FungibleCommon => Self::TokenFungibleCommon,
            shared_types::TokenType::NonFungibleUnique => Self::TokenNonFungibleUnique,
        }
    }
}

/// Resource prices, in tinybars per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeePrices {
    /// Charged regardless of usage.
    pub constant: u64,
    pub per_transaction_byte: u64,
    pub per_verification: u64,
    pub per_ram_byte_second: u64,
    pub per_response_byte: u64,
}

impl FeePrices {
    pub const ZERO: FeePrices = FeePrices {
        constant: 0,
        per_transaction_byte: 0,
        per_verification: 0,
        per_ram_byte_second: 0,
        per_response_byte: 0,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeScheduleEntry {
    pub functionality: Functionality,
    #[serde(default)]
    pub sub_type: SubType,
    pub prices: FeePrices,
}

/// How a computed fee is split. The service receives the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    pub node_bps: u32,
    pub network_bps: u32,
}

impl Default for FeeSplit {
    fn default() -> Self {
        Self {
            node_bps: 1_000,
            network_bps: 2_000,
        }
    }
}

/// Complete price table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub default_prices: FeePrices,
    pub split: FeeSplit,
    pub entries: Vec<FeeScheduleEntry>,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        let entry = |functionality, prices| FeeScheduleEntry {
            functionality,
            sub_type: SubType::Default,
            prices,
        };
        let query = |constant| FeePrices {
            constant,
            per_response_byte: 40,
            ..FeePrices::ZERO
        };
        Self {
            default_prices: FeePrices {
                constant: 100_000,
                per_transaction_byte: 100,
                per_verification: 10_000,
                per_ram_byte_second: 1,
                per_response_byte: 0,
            },
            split: FeeSplit::default(),
            entries: vec![
                entry(Functionality::CryptoGetAccountBalance, FeePrices::ZERO),
                entry(Functionality::CryptoGetInfo, query(50_000)),
                entry(Functionality::TokenGetInfo, query(50_000)),
                entry(
                    Functionality::CryptoDelete,
                    FeePrices {
                        constant: 500_000,
                        per_transaction_byte: 100,
                        per_verification: 10_000,
                        per_ram_byte_second: 0,
                        per_response_byte: 0,
                    },
                ),
                FeeScheduleEntry {
                    functionality: Functionality::TokenFeeScheduleUpdate,
                    sub_type: SubType::TokenNonFungibleUnique,
                    prices: FeePrices {
                        constant: 200_000,
                        per_transaction_byte: 100,
                        per_verification: 10_000,
                        per_ram_byte_second: 1,
                        per_response_byte: 0,
                    },
                },
            ],
        }
    }
}

impl FeeSchedule {
    /// A schedule in which every functionality is free.
    pub fn free() -> Self {
        Self {
            default_prices: FeePrices::ZERO,
            split: FeeSplit::default(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry(
        mut self,
        functionality: Functionality,
        sub_type: SubType,
        prices: FeePrices,
    ) -> Self {
        self.entries
            .retain(|e| !(e.functionality == functionality && e.sub_type == sub_type));
        self.entries.push(FeeScheduleEntry {
            functionality,
            sub_type,
            prices,
        });
        self
    }

    pub fn prices(&self, functionality: Functionality, sub_type: SubType) -> FeePrices {
        let find = |sub_type| {
            self.entries
                .iter()
                .find(|e| e.functionality == functionality && e.sub_type == sub_type)
                .map(|e| e.prices)
        };
        find(sub_type)
            .or_else(|| find(SubType::Default))
            .unwrap_or(self.default_prices)
    }

    pub fn validate(&self) -> Result<(), FeeScheduleError> {
        let total_bps = self.split.node_bps.saturating_add(self.split.network_bps);
        if total_bps > BPS_WHOLE {
            return Err(FeeScheduleError::SplitExceedsWhole { total_bps });
        }
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert((entry.functionality, entry.sub_type)) {
                return Err(FeeScheduleError::DuplicateEntry {
                    functionality: entry.functionality,
                    sub_type: entry.sub_type,
                });
            }
        }
        Ok(())
    }
}
