use async_trait::async_trait;
use ethers::types::Address;
use futures::{future, stream, StreamExt};
use portage_core::{Balance, BalanceReader, BalanceStream, ContractLocator, QueryError};
use portage_types::WalletAddress;
use std::sync::Arc;
use std::time::Duration;

use crate::bindings::erc20::Erc20 as Erc20Internal;

/// A reference to an Erc20 token on some EVM chain, read for a single
/// holder account
#[derive(Debug)]
pub struct EvmBalanceReader<M>
where
    M: ethers::providers::Middleware + 'static,
{
    contract: Arc<Erc20Internal<M>>,
    name: String,
    holder: Address,
    interval: Duration,
}

impl<M> EvmBalanceReader<M>
where
    M: ethers::providers::Middleware + 'static,
{
    /// Create a reference to an Erc20 token at a specific EVM address on
    /// some chain
    pub fn new(
        provider: Arc<M>,
        ContractLocator { name, address, .. }: &ContractLocator,
        holder: WalletAddress,
        interval: Duration,
    ) -> Self {
        Self {
            contract: Arc::new(Erc20Internal::new(
                address.as_evm_address().expect("!evm address"),
                provider,
            )),
            name: name.to_owned(),
            holder: holder.as_evm_address().expect("!evm address"),
            interval,
        }
    }
}

#[async_trait]
impl<M> BalanceReader for EvmBalanceReader<M>
where
    M: ethers::providers::Middleware + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(err, skip(self))]
    async fn current_balance(&self) -> Result<Balance, QueryError> {
        Ok(self.contract.balance_of(self.holder).call().await?.into())
    }

    #[tracing::instrument(err, skip(self))]
    async fn subscribe(&self) -> Result<BalanceStream, QueryError> {
        let first = self.current_balance().await?;
        let contract = self.contract.clone();
        let holder = self.holder;
        let interval = self.interval;

        // Re-read on a fixed cadence, yielding only on change. Errors are
        // passed through without ending the stream.
        let rest = stream::unfold((contract, first), move |(contract, last)| async move {
            loop {
                tokio::time::sleep(interval).await;
                match contract.balance_of(holder).call().await {
                    Ok(next) if Balance(next) == last => continue,
                    Ok(next) => return Some((Ok(Balance(next)), (contract, Balance(next)))),
                    Err(e) => return Some((Err(QueryError::from(e)), (contract, last))),
                }
            }
        });

        Ok(stream::once(future::ready(Ok(first))).chain(rest).boxed())
    }
}
