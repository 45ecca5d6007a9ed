#![allow(non_snake_case)]

use async_trait::async_trait;
use mockall::*;

use portage_core::*;

mock! {
    pub FeeEstimator {
        // FeeEstimator
        pub fn _name(&self) -> &str {}

        pub fn _estimate_fee(&self, call: &TransferCall) -> Result<Balance, QueryError> {}
    }
}

impl std::fmt::Debug for MockFeeEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockFeeEstimator")
    }
}

impl std::fmt::Display for MockFeeEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockFeeEstimator")
    }
}

#[async_trait]
impl FeeEstimator for MockFeeEstimator {
    fn name(&self) -> &str {
        self._name()
    }

    async fn estimate_fee(&self, call: &TransferCall) -> Result<Balance, QueryError> {
        self._estimate_fee(call)
    }
}

mock! {
    pub FeeSchedule {
        // FeeSchedule
        pub fn _name(&self) -> &str {}

        pub fn _units_per_second(&self, asset: &AssetId) -> Result<Option<Balance>, QueryError> {}
    }
}

impl std::fmt::Debug for MockFeeSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockFeeSchedule")
    }
}

impl std::fmt::Display for MockFeeSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockFeeSchedule")
    }
}

#[async_trait]
impl FeeSchedule for MockFeeSchedule {
    fn name(&self) -> &str {
        self._name()
    }

    async fn units_per_second(&self, asset: &AssetId) -> Result<Option<Balance>, QueryError> {
        self._units_per_second(asset)
    }
}
