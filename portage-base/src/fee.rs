use async_trait::async_trait;
use portage_core::{Balance, FeeEstimator, FeeSchedule, QueryError, TransferCall};
use portage_test::mocks::{MockFeeEstimator, MockFeeSchedule};
use portage_types::AssetId;

/// Fee estimator type
#[derive(Debug)]
pub enum FeeEstimators {
    /// Gas-based estimator on an EVM execution environment
    Evm(Box<dyn FeeEstimator>),
    /// Payment-info estimator over a substrate RPC surface
    Substrate(Box<dyn FeeEstimator>),
    /// Mock fee estimator
    Mock(Box<MockFeeEstimator>),
}

impl FeeEstimators {
    /// Calls checkpoint on mock variant. Should
    /// only be used during tests.
    #[doc(hidden)]
    pub fn checkpoint(&mut self) {
        if let FeeEstimators::Mock(estimator) = self {
            estimator.checkpoint();
        } else {
            panic!("Estimator should be mock variant!");
        }
    }
}

impl From<MockFeeEstimator> for FeeEstimators {
    fn from(mock: MockFeeEstimator) -> Self {
        FeeEstimators::Mock(Box::new(mock))
    }
}

#[async_trait]
impl FeeEstimator for FeeEstimators {
    fn name(&self) -> &str {
        match self {
            FeeEstimators::Evm(estimator) => estimator.name(),
            FeeEstimators::Substrate(estimator) => estimator.name(),
            FeeEstimators::Mock(estimator) => estimator.name(),
        }
    }

    #[tracing::instrument(level = "trace", err)]
    async fn estimate_fee(&self, call: &TransferCall) -> Result<Balance, QueryError> {
        match self {
            FeeEstimators::Evm(estimator) => estimator.estimate_fee(call).await,
            FeeEstimators::Substrate(estimator) => estimator.estimate_fee(call).await,
            FeeEstimators::Mock(estimator) => estimator.estimate_fee(call).await,
        }
    }
}

/// Fee schedule type
#[derive(Debug)]
pub enum FeeSchedules {
    /// Storage-backed schedule over a substrate RPC surface
    Substrate(Box<dyn FeeSchedule>),
    /// Mock fee schedule
    Mock(Box<MockFeeSchedule>),
}

impl FeeSchedules {
    /// Calls checkpoint on mock variant. Should
    /// only be used during tests.
    #[doc(hidden)]
    pub fn checkpoint(&mut self) {
        if let FeeSchedules::Mock(schedule) = self {
            schedule.checkpoint();
        } else {
            panic!("Schedule should be mock variant!");
        }
    }
}

impl From<MockFeeSchedule> for FeeSchedules {
    fn from(mock: MockFeeSchedule) -> Self {
        FeeSchedules::Mock(Box::new(mock))
    }
}

#[async_trait]
impl FeeSchedule for FeeSchedules {
    fn name(&self) -> &str {
        match self {
            FeeSchedules::Substrate(schedule) => schedule.name(),
            FeeSchedules::Mock(schedule) => schedule.name(),
        }
    }

    async fn units_per_second(&self, asset: &AssetId) -> Result<Option<Balance>, QueryError> {
        match self {
            FeeSchedules::Substrate(schedule) => schedule.units_per_second(asset).await,
            FeeSchedules::Mock(schedule) => schedule.units_per_second(asset).await,
        }
    }
}
