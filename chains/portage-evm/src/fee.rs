use async_trait::async_trait;
use ethers::types::Address;
use portage_core::{Balance, ContractLocator, FeeEstimator, QueryError, TransferCall};
use portage_types::WalletAddress;
use std::sync::Arc;

use crate::transfer::transfer_request;
use crate::EvmError;

/// Estimates source-side transfer cost as gas times gas price, priced in
/// the chain's native asset at wei precision
#[derive(Debug)]
pub struct EvmFeeEstimator<M>
where
    M: ethers::providers::Middleware + 'static,
{
    provider: Arc<M>,
    name: String,
    holder: Address,
}

impl<M> EvmFeeEstimator<M>
where
    M: ethers::providers::Middleware + 'static,
{
    /// Create a fee estimator reading gas schedules over the given provider
    pub fn new(
        provider: Arc<M>,
        ContractLocator { name, .. }: &ContractLocator,
        holder: WalletAddress,
    ) -> Self {
        Self {
            provider,
            name: name.to_owned(),
            holder: holder.as_evm_address().expect("!evm address"),
        }
    }
}

#[async_trait]
impl<M> FeeEstimator for EvmFeeEstimator<M>
where
    M: ethers::providers::Middleware + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(err, skip(self))]
    async fn estimate_fee(&self, call: &TransferCall) -> Result<Balance, QueryError> {
        let transfer = match call {
            TransferCall::Contract(transfer) => transfer,
            _ => return Err(QueryError::UnsupportedCall(call.mechanism())),
        };

        // The dispatch is assembled first so the estimate prices the real
        // calldata, sent from the holder account
        let mut tx = transfer_request(transfer);
        tx.set_from(self.holder);

        let gas = self
            .provider
            .estimate_gas(&tx, None)
            .await
            .map_err(|e| EvmError::MiddlewareError(Box::new(e)))?;
        let gas_price = self
            .provider
            .get_gas_price()
            .await
            .map_err(|e| EvmError::MiddlewareError(Box::new(e)))?;

        Ok(Balance(gas.saturating_mul(gas_price)))
    }
}
