use color_eyre::{eyre::bail, Report};
use portage_configuration::app::SignerConf;
use portage_configuration::asset::{BalanceSpec, ChainAsset};
use portage_configuration::route::{DestinationFeeConf, RouteConf, TransferSpec};
use portage_configuration::{ChainConf, Connection, WalletConfig};
use portage_core::ContractLocator;
use portage_types::WalletAddress;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::{BalanceReaders, ChainChannel, FeeEstimators, FeeSchedules};

/// Seconds between balance re-reads when the network config provides no
/// cadence of its own
const DEFAULT_POLL_SECONDS: u64 = 12;

/// A chain setup is a name, a domain ID, the wallet's account on that
/// chain, and details for connecting to the chain API.
#[derive(Clone, Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChainSetup {
    /// Chain name
    pub name: String,
    /// Chain domain identifier
    pub domain: u32,
    /// The wallet's account on this chain
    pub account: WalletAddress,
    /// Seconds between re-reads on cadence-driven balance subscriptions
    #[serde(default)]
    pub poll_seconds: Option<u64>,
    /// The chain connection details
    #[serde(flatten)]
    pub chain: ChainConf,
    /// Set this key to disable the chain
    #[serde(default)]
    pub disabled: Option<String>,
}

impl ChainSetup {
    /// Instantiate ChainSetup from a wallet directory entry
    pub fn from_wallet_config(
        network: &str,
        config: &WalletConfig,
        account: WalletAddress,
    ) -> Self {
        let domain = config
            .protocol()
            .get_network(network.to_owned().into())
            .expect("!domain");

        let url = config
            .rpcs
            .get(network)
            .and_then(|urls| urls.iter().next())
            .expect("!rpc");
        let connection: Connection = url.parse().expect("!connection");
        let chain = if domain.is_evm() {
            ChainConf::Evm(connection)
        } else {
            ChainConf::Substrate(connection)
        };

        let poll_seconds = match domain.specs.log_poll_seconds {
            0 => domain.specs.block_time,
            n => n,
        };

        Self {
            name: network.to_owned(),
            domain: domain.domain,
            account,
            poll_seconds: Some(poll_seconds),
            chain,
            disabled: None,
        }
    }

    fn connection(&self) -> &Connection {
        match &self.chain {
            ChainConf::Evm(conn) => conn,
            ChainConf::Substrate(conn) => conn,
        }
    }

    fn locator(&self, address: WalletAddress) -> ContractLocator {
        ContractLocator {
            name: self.name.clone(),
            domain: self.domain,
            address,
        }
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_seconds.unwrap_or(DEFAULT_POLL_SECONDS))
    }

    /// Try to convert the chain setting into a balance reader for one
    /// asset registration
    pub async fn try_into_balance_reader(
        &self,
        asset: &ChainAsset,
    ) -> Result<BalanceReaders, Report> {
        match &asset.balance {
            BalanceSpec::Erc20 { contract } => match &self.chain {
                ChainConf::Evm(conn) => Ok(BalanceReaders::Evm(
                    portage_evm::make_balance_reader(
                        conn.clone(),
                        &self.locator(*contract),
                        self.account,
                        self.poll_interval(),
                    )
                    .await?,
                )),
                ChainConf::Substrate(_) => bail!(
                    "Chain {} carries no EVM environment for an erc20 registration",
                    self.name
                ),
            },
            BalanceSpec::Storage { .. } => Ok(BalanceReaders::Substrate(
                portage_substrate::make_balance_reader(
                    self.connection().clone(),
                    &self.name,
                    self.account,
                    asset,
                )
                .await?,
            )),
        }
    }

    /// Try to convert the chain setting into a fee estimator serving one
    /// transfer mechanism originating on this chain
    pub async fn try_into_fee_estimator(
        &self,
        spec: &TransferSpec,
        signer: Option<&SignerConf>,
    ) -> Result<FeeEstimators, Report> {
        match spec {
            TransferSpec::Contract(_) => match &self.chain {
                ChainConf::Evm(conn) => Ok(FeeEstimators::Evm(
                    portage_evm::make_fee_estimator(
                        conn.clone(),
                        &self.locator(self.account),
                        self.account,
                    )
                    .await?,
                )),
                ChainConf::Substrate(_) => bail!(
                    "Chain {} carries no EVM environment for contract dispatch",
                    self.name
                ),
            },
            TransferSpec::Extrinsic(_) => Ok(FeeEstimators::Substrate(
                portage_substrate::make_fee_estimator(self.connection().clone(), &self.name, signer)
                    .await?,
            )),
        }
    }

    /// Try to convert the chain setting into a fee schedule reading
    /// `pallet.entry` on this chain
    pub async fn try_into_fee_schedule(
        &self,
        pallet: &str,
        entry: &str,
    ) -> Result<FeeSchedules, Report> {
        Ok(FeeSchedules::Substrate(
            portage_substrate::make_fee_schedule(
                self.connection().clone(),
                &self.name,
                pallet,
                entry,
            )
            .await?,
        ))
    }

    /// Try to convert the chain setting into a full channel: a balance
    /// reader for every asset registered on the chain, fee estimators for
    /// the mechanisms of lanes originating here, and fee schedules for
    /// dynamic-fee lanes landing here
    pub async fn try_into_channel(
        &self,
        assets: &HashMap<String, ChainAsset>,
        routes: &[RouteConf],
        signer: Option<&SignerConf>,
    ) -> Result<ChainChannel, Report> {
        let mut channel = ChainChannel::new(&self.name, self.domain, self.account);

        for (name, asset) in assets.iter() {
            let reader = self.try_into_balance_reader(asset).await?;
            channel.readers.insert(name.clone(), reader);
        }

        for route in routes.iter().filter(|route| route.from == self.name) {
            let spec = route.transfer_spec()?;
            match &spec {
                TransferSpec::Contract(_) => {
                    if channel.contract_fees.is_none() {
                        channel.contract_fees =
                            Some(self.try_into_fee_estimator(&spec, signer).await?);
                    }
                }
                TransferSpec::Extrinsic(_) => {
                    if channel.extrinsic_fees.is_none() {
                        channel.extrinsic_fees =
                            Some(self.try_into_fee_estimator(&spec, signer).await?);
                    }
                }
            }
        }

        for route in routes.iter().filter(|route| route.to == self.name) {
            if let DestinationFeeConf::Dynamic { pallet, entry, .. } = &route.destination_fee {
                let key = (pallet.clone(), entry.clone());
                if !channel.schedules.contains_key(&key) {
                    let schedule = self.try_into_fee_schedule(pallet, entry).await?;
                    channel.schedules.insert(key, schedule);
                }
            }
        }

        Ok(channel)
    }
}
