//! # Fee Calculator
//!
//! [`FeeCalculatorFactory`] is bound to one functionality and hands out a
//! fresh [`FeeCalculator`] per sub-type. Calculators never read state and
//! never fail: the same inputs always price to the same [`Fees`].

use crate::domain::schedule::{FeePrices, FeeSchedule, FeeSplit, SubType, BPS_WHOLE};
use crate::domain::usage::{Fees, UsageEstimate};
use shared_types::Functionality;

/// Produces calculators for one functionality.
#[derive(Debug, Clone, Copy)]
pub struct FeeCalculatorFactory<'a> {
    schedule: &'a FeeSchedule,
    functionality: Functionality,
}

impl<'a> FeeCalculatorFactory<'a> {
    pub fn new(schedule: &'a FeeSchedule, functionality: Functionality) -> Self {
        Self {
            schedule,
            functionality,
        }
    }

    pub fn functionality(&self) -> Functionality {
        self.functionality
    }

    pub fn fee_calculator(&self, sub_type: SubType) -> FeeCalculator {
        FeeCalculator {
            prices: self.schedule.prices(self.functionality, sub_type),
            split: self.schedule.split,
            usage: UsageEstimate::default(),
        }
    }
}

/// Accumulates usage and prices it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeCalculator {
    prices: FeePrices,
    split: FeeSplit,
    usage: UsageEstimate,
}

impl FeeCalculator {
    /// Prices a precomputed usage estimate. Ignores anything accumulated
    /// through the linear methods.
    pub fn legacy_calculate(&self, usage: &UsageEstimate) -> Fees {
        price(&self.prices, self.split, usage)
    }

    pub fn add_bytes_per_transaction(&mut self, bytes: u64) -> &mut Self {
        self.usage = self.usage.with_bytes(bytes);
        self
    }

    pub fn add_verifications_per_transaction(&mut self, verifications: u64) -> &mut Self {
        self.usage = self.usage.with_verifications(verifications);
        self
    }

    pub fn add_ram_byte_seconds(&mut self, rbs: u64) -> &mut Self {
        self.usage = self.usage.with_ram_byte_seconds(rbs);
        self
    }

    /// Prices the linearly accumulated usage.
    pub fn calculate(&self) -> Fees {
        price(&self.prices, self.split, &self.usage)
    }

    pub fn usage(&self) -> UsageEstimate {
        self.usage
    }
}

fn price(prices: &FeePrices, split: FeeSplit, usage: &UsageEstimate) -> Fees {
    let term = |unit: u64, count: u64| u128::from(unit) * u128::from(count);
    let raw = u128::from(prices.constant)
        .saturating_add(term(prices.per_transaction_byte, usage.bytes_per_transaction))
        .saturating_add(term(prices.per_verification, usage.verifications_per_transaction))
        .saturating_add(term(prices.per_ram_byte_second, usage.ram_byte_seconds))
        .saturating_add(term(prices.per_response_byte, usage.bytes_per_response))
        .min(u128::from(u64::MAX));

    let node = share(raw, split.node_bps);
    let network = share(raw, split.network_bps).min(raw - node);
    let service = raw - node - network;

    Fees {
        node: saturate(node),
        network: saturate(network),
        service: saturate(service),
    }
}

// raw * bps / BPS_WHOLE without overflowing the intermediate product
fn share(raw: u128, bps: u32) -> u128 {
    let whole = u128::from(BPS_WHOLE);
    let bps = u128::from(bps.min(BPS_WHOLE));
    raw / whole * bps + raw % whole * bps / whole
}

fn saturate(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
