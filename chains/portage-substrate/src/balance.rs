use async_trait::async_trait;
use futures::{future, stream, StreamExt};
use portage_configuration::asset::{BalanceQuery, BalanceSpec, ChainAsset, MinimumQuery};
use portage_core::{Balance, BalanceReader, BalanceStream, QueryError};
use portage_types::{AssetId, WalletAddress};
use subxt::ext::sp_runtime::traits::Header;
use subxt::Config;

use crate::queries::{asset_read, balance_read, decode_balance, decode_minimum};
use crate::{PortageOnlineClient, SubstrateError};

/// Chain storage balance reader, bound to one asset held by one account
#[derive(Clone)]
pub struct SubstrateBalanceReader<T: Config> {
    api: PortageOnlineClient<T>,
    name: String,
    holder: WalletAddress,
    query: BalanceQuery,
    asset: ChainAsset,
}

impl<T> SubstrateBalanceReader<T>
where
    T: Config,
{
    /// Instantiate a new SubstrateBalanceReader object
    pub fn new(
        api: PortageOnlineClient<T>,
        name: &str,
        holder: WalletAddress,
        asset: &ChainAsset,
    ) -> Result<Self, SubstrateError> {
        let query = match &asset.balance {
            BalanceSpec::Storage { query } => query.clone(),
            BalanceSpec::Erc20 { .. } => {
                return Err(SubstrateError::NotStorageBacked(
                    asset.balance_asset_id().to_string(),
                ))
            }
        };
        Ok(Self {
            api,
            name: name.to_owned(),
            holder,
            query,
            asset: asset.clone(),
        })
    }

    async fn balance_at(&self, at: Option<T::Hash>) -> Result<Balance, SubstrateError> {
        let read = balance_read(&self.query, self.asset.balance_asset_id(), &self.holder);
        let raw = match self.api.fetch_storage(&read, at).await? {
            Some(value) => decode_balance(&self.query, value)?,
            // Unset entry means the account holds nothing
            None => 0,
        };
        Ok(Balance(raw.into()))
    }

    async fn minimum(&self, query: &MinimumQuery, asset: &AssetId) -> Result<u128, SubstrateError> {
        let read = match query {
            MinimumQuery::Constant { pallet, name } => {
                let value = self.api.fetch_constant(pallet, name).await?;
                return decode_minimum(query, value);
            }
            MinimumQuery::AssetsAsset => asset_read("Assets", "Asset", asset),
            MinimumQuery::Raw { pallet, entry } => asset_read(pallet, entry, asset),
        };
        match self.api.fetch_storage(&read, None).await? {
            Some(value) => decode_minimum(query, value),
            None => Ok(0),
        }
    }
}

impl<T> std::fmt::Debug for SubstrateBalanceReader<T>
where
    T: Config,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SubstrateBalanceReader {{ chain: {}, asset: {}, holder: {} }}",
            self.name,
            self.asset.balance_asset_id(),
            self.holder,
        )
    }
}

impl<T> std::fmt::Display for SubstrateBalanceReader<T>
where
    T: Config,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SubstrateBalanceReader {{ chain: {}, asset: {}, holder: {} }}",
            self.name,
            self.asset.balance_asset_id(),
            self.holder,
        )
    }
}

#[async_trait]
impl<T> BalanceReader for SubstrateBalanceReader<T>
where
    T: Config + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    #[tracing::instrument(err, skip(self))]
    async fn current_balance(&self) -> Result<Balance, QueryError> {
        Ok(self.balance_at(None).await?)
    }

    #[tracing::instrument(err, skip(self))]
    async fn subscribe(&self) -> Result<BalanceStream, QueryError> {
        let first = self.balance_at(None).await?;
        let sub = self
            .api
            .rpc()
            .subscribe_finalized_block_headers()
            .await
            .map_err(SubstrateError::from)?;

        // Re-read at each finalized block, yielding only on change.
        // Errors are passed through without ending the stream.
        let this = self.clone();
        let rest = stream::unfold((this, sub, first), |(this, mut sub, last)| async move {
            loop {
                let header = match sub.next().await {
                    None => return None,
                    Some(Ok(header)) => header,
                    Some(Err(e)) => {
                        let err = SubstrateError::from(e);
                        return Some((Err(err.into()), (this, sub, last)));
                    }
                };
                match this.balance_at(Some(header.hash())).await {
                    Ok(next) if next == last => continue,
                    Ok(next) => return Some((Ok(next), (this, sub, next))),
                    Err(e) => return Some((Err(e.into()), (this, sub, last))),
                }
            }
        });

        Ok(stream::once(future::ready(Ok(first))).chain(rest).boxed())
    }

    #[tracing::instrument(err, skip(self))]
    async fn minimum_balance(&self) -> Result<Option<Balance>, QueryError> {
        let query = match &self.asset.minimum {
            Some(query) => query.clone(),
            None => return Ok(None),
        };
        let raw = self.minimum(&query, self.asset.min_asset_id()).await?;
        Ok(Some(Balance(raw.into())))
    }
}
