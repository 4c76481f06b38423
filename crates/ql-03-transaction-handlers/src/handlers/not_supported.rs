//! Handler for retired operations and queries.
//!
//! Every phase answers `NOT_SUPPORTED`, including fee calculation, so a
//! retired operation can never be charged, authorized or applied.

use crate::context::{FeeContext, HandleContext, PreHandleContext, QueryContext};
use crate::handler::{QueryHandler, TransactionHandler};
use ql_02_fees::Fees;
use shared_types::{
    HandleError, PreCheckError, QueryResponse, ResponseCode, ResponseHeader,
};
use std::fmt;
use std::marker::PhantomData;

/// Rejects operations of body type `T` in every phase.
pub struct NotSupportedHandler<T>(PhantomData<fn(&T)>);

impl<T> NotSupportedHandler<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for NotSupportedHandler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for NotSupportedHandler<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NotSupportedHandler<T> {}

impl<T> fmt::Debug for NotSupportedHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NotSupportedHandler<{}>", std::any::type_name::<T>())
    }
}

impl<T> TransactionHandler for NotSupportedHandler<T> {
    type Op = T;

    fn pure_checks(&self, _op: &T) -> Result<(), PreCheckError> {
        Err(ResponseCode::NotSupported.into())
    }

    fn pre_handle(&self, _op: &T, _ctx: &mut PreHandleContext<'_>) -> Result<(), PreCheckError> {
        Err(ResponseCode::NotSupported.into())
    }

    fn handle(&self, _op: &T, _ctx: &mut HandleContext<'_>) -> Result<(), HandleError> {
        Err(ResponseCode::NotSupported.into())
    }

    fn calculate_fees(&self, _op: &T, _ctx: &FeeContext<'_>) -> Result<Fees, PreCheckError> {
        Err(ResponseCode::NotSupported.into())
    }
}

impl<T> QueryHandler for NotSupportedHandler<T> {
    type Op = T;

    fn requires_payment(&self) -> bool {
        false
    }

    fn validate(&self, _op: &T, _ctx: &QueryContext<'_>) -> Result<(), PreCheckError> {
        Err(ResponseCode::NotSupported.into())
    }

    fn find_response(
        &self,
        _op: &T,
        _ctx: &QueryContext<'_>,
        header: ResponseHeader,
    ) -> QueryResponse {
        QueryResponse::status(ResponseCode::NotSupported, header.response_type, 0)
    }

    fn compute_fees(&self, _op: &T, _ctx: &QueryContext<'_>) -> Result<Fees, PreCheckError> {
        Err(ResponseCode::NotSupported.into())
    }
}
