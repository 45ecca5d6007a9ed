use subxt::dynamic::DecodedValue;
use subxt::{Config, OnlineClient};

use crate::queries::StorageRead;
use crate::SubstrateError;

/// Portage wrapper around `subxt::OnlineClient`
pub struct PortageOnlineClient<T: Config>(OnlineClient<T>);

// Manual impl: a derived Clone would demand `T: Clone`, which config
// types like `PolkadotConfig` never implement
impl<T: Config> Clone for PortageOnlineClient<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Config> std::ops::Deref for PortageOnlineClient<T> {
    type Target = OnlineClient<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Config> PortageOnlineClient<T> {
    /// Connect to a chain node at `url`
    pub async fn from_url(url: &str) -> Result<Self, SubstrateError> {
        Ok(Self(OnlineClient::from_url(url).await?))
    }

    /// Fetch one storage entry as a decoded value, at the given block hash
    /// or at the latest block. `Ok(None)` means the entry is unset.
    pub async fn fetch_storage(
        &self,
        read: &StorageRead,
        at: Option<T::Hash>,
    ) -> Result<Option<DecodedValue>, SubstrateError> {
        let address =
            subxt::dynamic::storage(read.pallet.as_str(), read.entry.as_str(), read.keys.clone());
        let thunk = self.storage().fetch(&address, at).await?;
        thunk
            .map(|v| v.to_value().map_err(SubstrateError::from))
            .transpose()
    }

    /// Read a runtime constant
    pub async fn fetch_constant(
        &self,
        pallet: &str,
        name: &str,
    ) -> Result<DecodedValue, SubstrateError> {
        let address = subxt::dynamic::constant(pallet, name);
        Ok(self.constants().at(&address)?.to_value()?)
    }
}
