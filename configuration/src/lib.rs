//! Portage configuration

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

use portage_types::NameOrDomain;
use std::collections::{HashMap, HashSet};
use std::{fs::File, path::Path};

pub mod app;
pub mod asset;
pub mod network;
pub mod route;

mod error;
pub use error::*;

pub mod builtin;
pub use builtin::*;

pub mod chains;
pub use chains::*;

use app::AppConfig;
use asset::{ChainAsset, LogicalAsset};
use network::NetworkInfo;
use route::{FeeAssetConfig, RouteConf, TransferConfig, TransferSpec};

/// A Portage configuration json format
#[derive(Default, Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletConfig {
    /// Config version
    pub version: u64,
    /// A name for the environment (dev/staging/prod/local)
    pub environment: String,
    /// The set of networks used in this config
    pub networks: HashSet<String>,
    /// Pre-configured RPCs for any known networks
    pub rpcs: HashMap<String, HashSet<String>>,
    /// Protocol information (e.g. deploy-time)
    protocol: NetworkInfo,
    /// Chain-independent asset descriptions
    assets: HashMap<String, LogicalAsset>,
    /// Per-chain asset registrations, keyed by network then asset name
    registrations: HashMap<String, HashMap<String, ChainAsset>>,
    /// Configured transfer lanes
    routes: Vec<RouteConf>,
    /// Application configuration
    #[serde(default)]
    pub app: AppConfig,
}

impl WalletConfig {
    /// Instantiate WalletConfig from file
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }

    /// Resolve a name or domain
    pub fn resolve_domain(&self, domain: NameOrDomain) -> Option<String> {
        self.protocol.resolve_domain(domain)
    }

    /// Syntactically validate the config
    pub fn validate(&self) -> eyre::Result<()> {
        for network in self.networks.iter() {
            eyre::ensure!(
                self.protocol.networks.contains_key(network),
                "Protocol details for network named '{}' not present.",
                network
            );

            let domain = self.protocol.networks.get(network).unwrap();

            // Check that each network has the expected name
            eyre::ensure!(
                domain.name == *network,
                "Network at key {} has non-matching name: {}",
                network,
                domain.name
            );

            // Check there is rpc for network
            eyre::ensure!(
                self.rpcs.contains_key(network),
                "RPC for network named '{}' not present.",
                network
            );

            for url in self.rpcs.get(network).unwrap() {
                eyre::ensure!(
                    url.parse::<Connection>().is_ok(),
                    "RPC '{}' for network named '{}' is not an http or websocket URI",
                    url,
                    network
                );
            }

            for connection in domain.connections.iter() {
                eyre::ensure!(
                    self.networks.contains(connection),
                    "Connection named '{}' on network named '{}' not present in configured networks",
                    connection,
                    network,
                );
            }
        }

        // Check registrations reference known networks and assets
        for (network, assets) in self.registrations.iter() {
            eyre::ensure!(
                self.networks.contains(network),
                "Registrations for network named '{}' not present in configured networks",
                network,
            );

            let domain = self.protocol.networks.get(network).unwrap();

            for (name, asset) in assets.iter() {
                eyre::ensure!(
                    self.assets.contains_key(name),
                    "Registration for asset named '{}' on network named '{}' has no asset description",
                    name,
                    network,
                );
                eyre::ensure!(
                    !asset.is_erc20() || domain.is_evm(),
                    "Asset named '{}' is registered as erc20 on network named '{}', which has no EVM environment",
                    name,
                    network,
                );
            }
        }

        // Check each route names known networks, a known asset, and
        // registrations on both ends, and carries exactly one builder
        for route in self.routes.iter() {
            eyre::ensure!(
                route.from != route.to,
                "Route for asset named '{}' connects network named '{}' to itself",
                route.asset,
                route.from,
            );

            for network in [&route.from, &route.to] {
                eyre::ensure!(
                    self.networks.contains(network),
                    "Route network named '{}' not present in configured networks",
                    network,
                );
            }

            eyre::ensure!(
                self.assets.contains_key(&route.asset),
                "Route asset named '{}' has no asset description",
                route.asset,
            );

            for network in [&route.from, &route.to] {
                eyre::ensure!(
                    self.registration(network, &route.asset).is_ok(),
                    "Route asset named '{}' not registered on network named '{}'",
                    route.asset,
                    network,
                );
            }

            let spec = route.transfer_spec().map_err(|e| eyre::eyre!(e))?;
            if let TransferSpec::Contract(_) = spec {
                eyre::ensure!(
                    self.protocol.networks.get(&route.from).unwrap().is_evm(),
                    "Route for asset named '{}' dispatches through a contract on network named '{}', which has no EVM environment",
                    route.asset,
                    route.from,
                );
            }

            if let Some(fee_asset) = &route.fee_asset {
                eyre::ensure!(
                    self.assets.contains_key(fee_asset),
                    "Fee asset named '{}' has no asset description",
                    fee_asset,
                );
                for network in [&route.from, &route.to] {
                    let registered = self.registration(network, fee_asset);
                    eyre::ensure!(
                        registered.is_ok(),
                        "Fee asset named '{}' not registered on network named '{}'",
                        fee_asset,
                        network,
                    );
                    // Fee reads always go through chain storage
                    eyre::ensure!(
                        !registered.unwrap().is_erc20(),
                        "Fee asset named '{}' is registered as erc20 on network named '{}'",
                        fee_asset,
                        network,
                    );
                }
            }
        }

        Ok(())
    }

    /// Syntactically validate the config, consuming and returning self
    pub fn chained_validate(self) -> eyre::Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Resolve a transfer lane to its full configuration.
    ///
    /// Everything a transfer needs is copied out of the config here; no
    /// further config lookups happen after this returns.
    pub fn resolve_route(
        &self,
        source: NameOrDomain,
        destination: NameOrDomain,
        asset: &str,
    ) -> Result<TransferConfig, ConfigError> {
        let source = self
            .resolve_domain(source.clone())
            .ok_or_else(|| ConfigError::UnknownChain(source.to_string()))?;
        let destination = self
            .resolve_domain(destination.clone())
            .ok_or_else(|| ConfigError::UnknownChain(destination.to_string()))?;

        if !self.assets.contains_key(asset) {
            return Err(ConfigError::UnknownAsset(asset.to_owned()));
        }

        let route = self
            .routes
            .iter()
            .find(|route| route.from == source && route.to == destination && route.asset == asset)
            .ok_or_else(|| ConfigError::RouteNotFound {
                source: source.clone(),
                destination: destination.clone(),
                asset: asset.to_owned(),
            })?;

        let source_asset = self.registration(&source, asset)?.clone();
        let destination_asset = self.registration(&destination, asset)?.clone();

        let fee_asset = route
            .fee_asset
            .as_ref()
            .map(|name| {
                Ok::<_, ConfigError>(FeeAssetConfig {
                    name: name.clone(),
                    source: self.registration(&source, name)?.clone(),
                    destination: self.registration(&destination, name)?.clone(),
                })
            })
            .transpose()?;

        let spec = route.transfer_spec()?;

        Ok(TransferConfig {
            source: self.protocol.networks.get(&source).unwrap().clone(),
            destination: self.protocol.networks.get(&destination).unwrap().clone(),
            asset: asset.to_owned(),
            source_asset,
            destination_asset,
            fee_asset,
            spec,
            destination_fee: route.destination_fee.clone(),
        })
    }

    /// Get an asset's registration on a network, if present
    pub fn registration(&self, network: &str, asset: &str) -> Result<&ChainAsset, ConfigError> {
        self.registrations
            .get(network)
            .and_then(|assets| assets.get(asset))
            .ok_or_else(|| ConfigError::MissingRegistration {
                asset: asset.to_owned(),
                chain: network.to_owned(),
            })
    }

    /// Get the assets registered on a network, if any
    pub fn chain_assets(&self, network: &str) -> Option<&HashMap<String, ChainAsset>> {
        self.registrations.get(network)
    }

    /// Get a reference to the config's protocol configuration.
    pub fn protocol(&self) -> &NetworkInfo {
        &self.protocol
    }

    /// Get a reference to the config's asset descriptions.
    pub fn assets(&self) -> &HashMap<String, LogicalAsset> {
        &self.assets
    }

    /// Get a reference to the config's routes.
    pub fn routes(&self) -> &[RouteConf] {
        &self.routes
    }

    /// Convert to yaml
    pub fn to_yaml(&self) -> eyre::Result<String> {
        Ok(serde_yaml::to_string(&self)?)
    }
}
