//! Core network information

use portage_types::{deser_portage_u32, deser_portage_u64, deser_portage_u8, NameOrDomain};
use std::collections::{HashMap, HashSet};

/// Core network information
#[derive(Default, Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpecs {
    /// EVM chain id. 0 for non-EVM chains
    #[serde(default, deserialize_with = "deser_portage_u64")]
    pub chain_id: u64,
    /// Block time on the network
    #[serde(deserialize_with = "deser_portage_u64")]
    pub block_time: u64,
    /// Decimals of the network's native asset
    #[serde(deserialize_with = "deser_portage_u8")]
    pub native_decimals: u8,
    /// True if the network is a parachain exposing an EVM execution
    /// environment alongside its substrate one. Otherwise false
    #[serde(default)]
    pub evm_parachain: bool,
    /// Seconds between balance re-reads on connections with no block
    /// subscription. 0 falls back to the network block time
    #[serde(default, deserialize_with = "deser_portage_u64")]
    pub log_poll_seconds: u64,
    /// Block explorer URL
    pub block_explorer: String,
}

/// Core network information
#[derive(Default, Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    /// Network name
    pub name: String,
    /// Network domain identifier
    #[serde(deserialize_with = "deser_portage_u32")]
    pub domain: u32,
    /// List of connections to other networks
    pub connections: HashSet<String>,
    /// Network specifications
    pub specs: NetworkSpecs,
}

impl Domain {
    /// True if this network settles balances through an EVM environment
    pub fn is_evm(&self) -> bool {
        self.specs.evm_parachain
    }
}

/// Core deployment info
#[derive(Default, Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    /// The network information for each network
    pub networks: HashMap<String, Domain>,
}

impl NetworkInfo {
    /// Resolve a `NameOrDomain` to a string, if that name/domain is present in this config
    pub fn resolve_domain(&self, domain: NameOrDomain) -> Option<String> {
        match domain {
            NameOrDomain::Name(name) => self.networks.get(&name).map(|_| name.to_owned()),
            NameOrDomain::Domain(number) => self
                .networks
                .iter()
                .find(|(_, net)| net.domain == number)
                .map(|(net, _)| net.to_owned()),
        }
    }

    /// Get the network associated with the domain if any
    pub fn get_network(&self, domain: NameOrDomain) -> Option<&Domain> {
        self.resolve_domain(domain)
            .and_then(|name| self.networks.get(&name))
    }

    /// Returns a set of networks known to this deploy
    pub fn networks(&self) -> HashSet<String> {
        self.networks.keys().map(ToOwned::to_owned).collect()
    }
}
