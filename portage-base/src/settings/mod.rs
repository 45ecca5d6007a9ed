//! Settings and configuration for the Portage wallet
//!
//! This module draws heavily on `portage-configuration`. All public
//! values (networks, assets, routes, rpcs) come from the shared wallet
//! directory. The wallet's accounts are supplied alongside, and signer
//! secrets are injected from the environment so that keys never land in
//! shareable config files.

use crate::{metrics::WalletMetrics, Wallet};
use color_eyre::{eyre::bail, Report};
use portage_configuration::app::{LogConfig, SignerConf};
use portage_configuration::{ChainConf, WalletConfig};
use portage_types::WalletAddress;
use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};

/// Chain configuration
pub mod chains;
pub use chains::ChainSetup;

/// Tracing subscriber management
pub mod trace;

/// Settings. Usually this should be treated as a base config and used as
/// follows:
///
/// ```
/// use portage_base::*;
/// use serde::Deserialize;
///
/// pub struct OtherSettings { /* anything */ };
///
/// #[derive(Debug, Deserialize)]
/// pub struct MySettings {
///     #[serde(flatten)]
///     base_settings: Settings,
///     #[serde(flatten)]
///     other_settings: (),
/// }
/// ```
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Port to listen for prometheus scrape requests
    pub metrics: Option<u16>,
    /// The tracing configuration
    pub logging: LogConfig,
    /// The chain configurations
    pub chains: HashMap<String, ChainSetup>,
    /// Transaction signers
    #[serde(default)]
    pub signers: HashMap<String, SignerConf>,
}

impl Settings {
    /// Try to get a signer conf by chain name
    pub fn get_signer(&self, name: &str) -> Option<&SignerConf> {
        self.signers.get(name)
    }

    /// Instantiate Settings from a wallet directory and the wallet's
    /// account on each configured network
    pub fn from_config(
        config: &WalletConfig,
        accounts: &HashMap<String, WalletAddress>,
    ) -> Self {
        let chains = config
            .networks
            .iter()
            .map(|network| {
                let account = accounts.get(network).expect("!account");
                (
                    network.clone(),
                    ChainSetup::from_wallet_config(network, config, *account),
                )
            })
            .collect();

        Self {
            metrics: config.app.metrics,
            logging: config.app.logging,
            chains,
            signers: Default::default(),
        }
    }

    /// Validate base settings against the directory they were drawn from
    pub fn validate_against_config(&self, config: &WalletConfig) -> color_eyre::Result<()> {
        assert_eq!(self.metrics, config.app.metrics);
        assert_eq!(self.logging, config.app.logging);

        for network in config.networks.iter() {
            let setup = self.chains.get(network).unwrap();
            let domain = config
                .protocol()
                .get_network(network.to_owned().into())
                .unwrap();

            assert_eq!(setup.name, domain.name);
            assert_eq!(setup.domain, domain.domain);
            assert_eq!(matches!(setup.chain, ChainConf::Evm(_)), domain.is_evm());

            let urls = config.rpcs.get(network).unwrap();
            match &setup.chain {
                ChainConf::Evm(conn) => assert!(urls.iter().any(|u| u == conn.url())),
                ChainConf::Substrate(conn) => assert!(urls.iter().any(|u| u == conn.url())),
            }
        }

        Ok(())
    }

    /// Try to build a wallet from this settings object. Every channel is
    /// constructed here; operations never open clients of their own
    pub async fn try_into_wallet(&self, config: WalletConfig) -> Result<Wallet, Report> {
        let metrics = Arc::new(WalletMetrics::new(
            config.environment.as_str(),
            self.metrics,
            Arc::new(prometheus::Registry::new()),
        )?);

        let mut channels = HashMap::new();
        for (k, v) in self.chains.iter().filter(|(_, v)| v.disabled.is_none()) {
            if k != &v.name {
                bail!(
                    "Chain key does not match chain name:\n key: {}  name: {}",
                    k,
                    v.name
                );
            }

            let assets = config.chain_assets(k).cloned().unwrap_or_default();
            let channel = v
                .try_into_channel(&assets, config.routes(), self.get_signer(k))
                .await?;
            channels.insert(v.name.clone(), channel);
        }

        Ok(Wallet::new(config, channels, metrics))
    }
}
