//! Handler traits.

use crate::context::{FeeContext, HandleContext, PreHandleContext, QueryContext};
use ql_02_fees::Fees;
use shared_types::{HandleError, PreCheckError, QueryResponse, ResponseHeader};

/// The four-phase contract every transaction type satisfies.
pub trait TransactionHandler {
    /// Operation body this handler accepts.
    type Op;

    /// Structural validation. Never reads state.
    fn pure_checks(&self, op: &Self::Op) -> Result<(), PreCheckError>;

    /// Collects the keys that must sign, reading the committed snapshot.
    /// Never writes state.
    fn pre_handle(&self, op: &Self::Op, ctx: &mut PreHandleContext<'_>)
        -> Result<(), PreCheckError>;

    /// Re-fetches, re-validates and writes replacement entity values into
    /// the newest savepoint.
    fn handle(&self, op: &Self::Op, ctx: &mut HandleContext<'_>) -> Result<(), HandleError>;

    /// Pure and deterministic. A missing entity prices to the constant fee.
    fn calculate_fees(&self, op: &Self::Op, ctx: &FeeContext<'_>) -> Result<Fees, PreCheckError>;
}

/// Two-phase contract for queries, with fees as an independent third step.
pub trait QueryHandler {
    type Op;

    /// Whether answering requires a payment.
    fn requires_payment(&self) -> bool;

    fn validate(&self, op: &Self::Op, ctx: &QueryContext<'_>) -> Result<(), PreCheckError>;

    /// Builds the answer under `header`. Must re-check anything that could
    /// have changed since [`QueryHandler::validate`].
    fn find_response(
        &self,
        op: &Self::Op,
        ctx: &QueryContext<'_>,
        header: ResponseHeader,
    ) -> QueryResponse;

    fn compute_fees(&self, op: &Self::Op, ctx: &QueryContext<'_>) -> Result<Fees, PreCheckError>;
}
