use async_trait::async_trait;
use portage_types::AssetId;

use crate::{Balance, QueryError, TransferCall};

/// Interface for estimating the origin-chain execution fee of an assembled
/// transfer. Estimates are denominated in the origin chain's fee currency
/// at the precision the chain itself reports.
#[async_trait]
pub trait FeeEstimator: Send + Sync + std::fmt::Debug {
    /// Return an identifier (not necessarily unique) for the chain this
    /// estimator is bound to.
    fn name(&self) -> &str;

    /// Estimate the fee for dispatching `call` on its origin chain
    async fn estimate_fee(&self, call: &TransferCall) -> Result<Balance, QueryError>;
}

/// Interface for reading a chain's per-asset execution pricing table. Fees
/// quoted through a schedule are denominated in the priced asset itself.
#[async_trait]
pub trait FeeSchedule: Send + Sync + std::fmt::Debug {
    /// Return an identifier (not necessarily unique) for the chain this
    /// schedule is read from.
    fn name(&self) -> &str;

    /// Units of `asset` charged per second of execution weight, `None`
    /// when the asset is not priced on this chain.
    async fn units_per_second(&self, asset: &AssetId) -> Result<Option<Balance>, QueryError>;
}
