//! # Phase Contexts
//!
//! Each phase gets a context that exposes exactly what that phase may touch:
//!
//! - [`PreHandleContext`]: read-only stores plus the growing set of required keys.
//! - [`HandleContext`]: writable stores, configuration and the record under construction.
//! - [`FeeContext`]: read-only stores, the fee schedule and request size metrics.
//! - [`QueryContext`]: read-only stores and the fee schedule.

use crate::config::LedgerConfig;
use ql_01_ledger_state::{ReadableStores, WritableStores};
use ql_02_fees::{FeeCalculatorFactory, FeeSchedule};
use shared_types::{
    AccountId, Functionality, Key, PreCheckError, RecordBuilder, ResponseCode, TransactionBody,
};

// =============================================================================
// PRE-HANDLE
// =============================================================================

/// Outcome of pre-handle: who pays and whose signatures are needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreHandleResult {
    pub payer: AccountId,
    pub payer_key: Key,
    /// Non-payer keys, deduplicated, in the order they were required.
    pub required_keys: Vec<Key>,
}

impl PreHandleResult {
    /// Payer key first, then every other required key.
    pub fn all_keys(&self) -> impl Iterator<Item = &Key> {
        std::iter::once(&self.payer_key).chain(self.required_keys.iter())
    }
}

pub struct PreHandleContext<'a> {
    stores: &'a dyn ReadableStores,
    payer: AccountId,
    payer_key: Key,
    required_keys: Vec<Key>,
}

impl<'a> PreHandleContext<'a> {
    /// Resolves the payer. The payer's key is always required.
    pub fn new(stores: &'a dyn ReadableStores, payer: AccountId) -> Result<Self, PreCheckError> {
        let account = stores
            .get_account(payer)
            .ok_or(ResponseCode::InvalidPayerAccountId)?;
        if account.deleted {
            return Err(ResponseCode::PayerAccountDeleted.into());
        }
        Ok(Self {
            stores,
            payer,
            payer_key: account.key,
            required_keys: Vec::new(),
        })
    }

    pub fn stores(&self) -> &'a dyn ReadableStores {
        self.stores
    }

    pub fn payer(&self) -> AccountId {
        self.payer
    }

    pub fn payer_key(&self) -> &Key {
        &self.payer_key
    }

    /// Requires a signature from `key`. The payer key and keys already
    /// required are skipped.
    pub fn require_key(&mut self, key: Key) -> &mut Self {
        if key != self.payer_key && !self.required_keys.contains(&key) {
            self.required_keys.push(key);
        }
        self
    }

    /// Requires `key`, failing with `code` when it is absent.
    pub fn require_key_or_throw(
        &mut self,
        key: Option<Key>,
        code: ResponseCode,
    ) -> Result<&mut Self, PreCheckError> {
        let key = key.ok_or(code)?;
        Ok(self.require_key(key))
    }

    pub fn required_keys(&self) -> &[Key] {
        &self.required_keys
    }

    pub fn into_result(self) -> PreHandleResult {
        PreHandleResult {
            payer: self.payer,
            payer_key: self.payer_key,
            required_keys: self.required_keys,
        }
    }
}

// =============================================================================
// HANDLE
// =============================================================================

pub struct HandleContext<'s> {
    stores: &'s mut dyn WritableStores,
    config: &'s LedgerConfig,
    body: &'s TransactionBody,
    record: RecordBuilder,
}

impl<'s> HandleContext<'s> {
    pub fn new(
        stores: &'s mut dyn WritableStores,
        config: &'s LedgerConfig,
        body: &'s TransactionBody,
    ) -> Self {
        Self {
            stores,
            config,
            body,
            record: RecordBuilder::new(),
        }
    }

    pub fn stores(&self) -> &(dyn WritableStores + 's) {
        &*self.stores
    }

    pub fn stores_mut(&mut self) -> &mut (dyn WritableStores + 's) {
        &mut *self.stores
    }

    pub fn config(&self) -> &LedgerConfig {
        self.config
    }

    pub fn body(&self) -> &TransactionBody {
        self.body
    }

    pub fn payer(&self) -> AccountId {
        self.body.payer()
    }

    pub fn record_mut(&mut self) -> &mut RecordBuilder {
        &mut self.record
    }

    pub fn into_record(self) -> RecordBuilder {
        self.record
    }
}

// =============================================================================
// FEES
// =============================================================================

pub struct FeeContext<'a> {
    stores: &'a dyn ReadableStores,
    schedule: &'a FeeSchedule,
    body: &'a TransactionBody,
    body_bytes: u64,
    signature_count: u64,
}

impl<'a> FeeContext<'a> {
    pub fn new(
        stores: &'a dyn ReadableStores,
        schedule: &'a FeeSchedule,
        body: &'a TransactionBody,
        body_bytes: u64,
        signature_count: u64,
    ) -> Self {
        Self {
            stores,
            schedule,
            body,
            body_bytes,
            signature_count,
        }
    }

    pub fn stores(&self) -> &'a dyn ReadableStores {
        self.stores
    }

    pub fn body(&self) -> &TransactionBody {
        self.body
    }

    /// Serialized size of the transaction body.
    pub fn body_bytes(&self) -> u64 {
        self.body_bytes
    }

    /// Number of signatures attached to the transaction.
    pub fn signature_count(&self) -> u64 {
        self.signature_count
    }

    /// Factory bound to the given functionality.
    pub fn fee_calculator_factory(&self, functionality: Functionality) -> FeeCalculatorFactory<'a> {
        FeeCalculatorFactory::new(self.schedule, functionality)
    }
}

// =============================================================================
// QUERIES
// =============================================================================

pub struct QueryContext<'a> {
    stores: &'a dyn ReadableStores,
    schedule: &'a FeeSchedule,
}

impl<'a> QueryContext<'a> {
    pub fn new(stores: &'a dyn ReadableStores, schedule: &'a FeeSchedule) -> Self {
        Self { stores, schedule }
    }

    pub fn stores(&self) -> &'a dyn ReadableStores {
        self.stores
    }

    pub fn fee_calculator_factory(&self, functionality: Functionality) -> FeeCalculatorFactory<'a> {
        FeeCalculatorFactory::new(self.schedule, functionality)
    }
}
