//! Resource usage and the resulting fee triple.

use serde::{Deserialize, Serialize};

/// Byte sizes used when estimating usage.
pub mod sizes {
    /// Shard, realm and number of an entity id.
    pub const BASIC_ENTITY_ID_SIZE: u64 = 24;
    pub const LONG_SIZE: u64 = 8;
    pub const INT_SIZE: u64 = 4;
    pub const BOOL_SIZE: u64 = 4;
    /// Fixed part of an account, without key, memo and alias.
    pub const BASIC_ACCOUNT_SIZE: u64 = 8 * LONG_SIZE + BOOL_SIZE;
    /// Fixed part of a token, without keys, names and fees.
    pub const BASIC_TOKEN_SIZE: u64 = BASIC_ENTITY_ID_SIZE * 2 + 3 * BOOL_SIZE;
    pub const FIXED_FEE_SIZE: u64 = LONG_SIZE + BASIC_ENTITY_ID_SIZE;
    pub const FRACTIONAL_FEE_SIZE: u64 = 4 * LONG_SIZE;
    /// Seconds a receipt is kept in state.
    pub const RECEIPT_STORAGE_TIME_SEC: u64 = 180;
}

/// Resource usage of one transaction or query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageEstimate {
    /// Bytes of the serialized transaction.
    pub bytes_per_transaction: u64,
    /// Signature verifications required.
    pub verifications_per_transaction: u64,
    /// State bytes retained, multiplied by retention seconds.
    pub ram_byte_seconds: u64,
    /// Bytes in a query response.
    pub bytes_per_response: u64,
}

impl UsageEstimate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(mut self, bytes: u64) -> Self {
        self.bytes_per_transaction = self.bytes_per_transaction.saturating_add(bytes);
        self
    }

    pub fn with_verifications(mut self, verifications: u64) -> Self {
        self.verifications_per_transaction =
            self.verifications_per_transaction.saturating_add(verifications);
        self
    }

    pub fn with_ram_byte_seconds(mut self, rbs: u64) -> Self {
        self.ram_byte_seconds = self.ram_byte_seconds.saturating_add(rbs);
        self
    }

    pub fn with_response_bytes(mut self, bytes: u64) -> Self {
        self.bytes_per_response = self.bytes_per_response.saturating_add(bytes);
        self
    }
}

/// A computed fee, in tinybars, split by recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fees {
    /// Paid to the submitting node.
    pub node: u64,
    /// Paid to the network for consensus.
    pub network: u64,
    /// Paid for the service itself.
    pub service: u64,
}

impl Fees {
    pub const FREE: Fees = Fees {
        node: 0,
        network: 0,
        service: 0,
    };

    /// Sum of the three shares, saturating at `u64::MAX`. Use
    /// [`Self::checked_total`] when the sum is about to be charged.
    pub fn total(&self) -> u64 {
        self.node
            .saturating_add(self.network)
            .saturating_add(self.service)
    }

    /// Sum of the three shares, or `None` if it does not fit in a `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        self.node.checked_add(self.network)?.checked_add(self.service)
    }

    pub fn is_free(&self) -> bool {
        self.total() == 0
    }
}
