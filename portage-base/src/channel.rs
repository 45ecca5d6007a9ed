use futures_util::{stream, StreamExt};
use portage_core::{BalanceReader, BalanceStream, TransferCall};
use portage_types::WalletAddress;
use std::collections::HashMap;

use crate::{BalanceReaders, FeeEstimators, FeeSchedules, WalletError};

/// Live query channels for one configured chain.
///
/// Everything here is built once, when the wallet is instantiated, and
/// shared read-only by every operation touching the chain. Operations
/// never construct clients of their own.
#[derive(Debug)]
pub struct ChainChannel {
    /// Chain name
    pub name: String,
    /// Chain domain identifier
    pub domain: u32,
    /// The wallet's account on this chain
    pub account: WalletAddress,
    /// Balance readers keyed by asset name
    pub readers: HashMap<String, BalanceReaders>,
    /// Estimator for contract-dispatched lanes originating here
    pub contract_fees: Option<FeeEstimators>,
    /// Estimator for extrinsic-dispatched lanes originating here
    pub extrinsic_fees: Option<FeeEstimators>,
    /// Destination fee schedules keyed by (pallet, entry)
    pub schedules: HashMap<(String, String), FeeSchedules>,
}

impl std::fmt::Display for ChainChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChainChannel {{ {}[@{}] }}", self.name, self.domain)
    }
}

impl ChainChannel {
    /// An empty channel for `account` on the named chain
    pub fn new(name: &str, domain: u32, account: WalletAddress) -> Self {
        Self {
            name: name.to_owned(),
            domain,
            account,
            readers: Default::default(),
            contract_fees: None,
            extrinsic_fees: None,
            schedules: Default::default(),
        }
    }

    /// Balance reader for an asset, checked against the account the
    /// channel is bound to
    pub fn reader(
        &self,
        address: WalletAddress,
        asset: &str,
    ) -> Result<&BalanceReaders, WalletError> {
        self.known_account(address)?;
        self.asset_reader(asset)
    }

    /// Balance reader for an asset registered on this chain
    pub fn asset_reader(&self, asset: &str) -> Result<&BalanceReaders, WalletError> {
        self.readers
            .get(asset)
            .ok_or_else(|| WalletError::AssetNotFound {
                asset: asset.to_owned(),
                chain: self.name.clone(),
            })
    }

    /// Fee estimator matching a call's transfer mechanism
    pub fn estimator(&self, call: &TransferCall) -> Result<&FeeEstimators, WalletError> {
        let estimator = match call {
            TransferCall::Contract(_) => self.contract_fees.as_ref(),
            TransferCall::Extrinsic(_) => self.extrinsic_fees.as_ref(),
        };
        estimator.ok_or_else(|| WalletError::MissingEstimator {
            chain: self.name.clone(),
            mechanism: call.mechanism(),
        })
    }

    /// Fee schedule reading `pallet.entry` on this chain
    pub fn schedule(&self, pallet: &str, entry: &str) -> Result<&FeeSchedules, WalletError> {
        self.schedules
            .get(&(pallet.to_owned(), entry.to_owned()))
            .ok_or_else(|| WalletError::MissingSchedule {
                chain: self.name.clone(),
                entry: format!("{}.{}", pallet, entry),
            })
    }

    /// Error unless `address` is the account this channel is bound to
    pub fn known_account(&self, address: WalletAddress) -> Result<(), WalletError> {
        if address != self.account {
            return Err(WalletError::UnknownAccount {
                address,
                chain: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Open one stream per registered asset and merge them. Dropping the
    /// merged stream ends every underlying subscription
    pub async fn subscribe(&self) -> Result<BalanceStream, WalletError> {
        let mut streams = Vec::with_capacity(self.readers.len());
        for reader in self.readers.values() {
            streams.push(reader.subscribe().await?);
        }
        Ok(stream::select_all(streams).boxed())
    }
}
