//! Transfer route configuration

use portage_types::{deser_portage_u64, WalletAddress};

use crate::asset::ChainAsset;
use crate::error::ConfigError;
use crate::network::Domain;

/// Contract-call transfer details
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContractRouteConf {
    /// Router contract dispatching the transfer on the source chain
    pub router: WalletAddress,
}

/// Extrinsic transfer details
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtrinsicRouteConf {
    /// Pallet exposing the transfer call
    pub pallet: String,
    /// Pallet instance, for chains running several
    #[serde(default)]
    pub pallet_instance: Option<u8>,
}

/// How the fee charged on the destination chain is determined
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DestinationFeeConf {
    /// Flat fee, written as a display literal in fee-asset units
    Fixed {
        /// Fee amount, e.g. `"0.02"`
        amount: String,
    },
    /// Fee derived from the destination's per-asset fee schedule.
    ///
    /// The schedule entry is keyed by the fee asset's destination id and
    /// holds units-per-second; the fee is `units * weight / 10^12`.
    Dynamic {
        /// Pallet holding the fee schedule
        pallet: String,
        /// Storage entry name
        entry: String,
        /// Execution weight bought on the destination
        #[serde(deserialize_with = "deser_portage_u64")]
        weight: u64,
    },
}

/// A single source/destination/asset lane.
///
/// Exactly one of `contract` and `extrinsic` must be present; which one
/// fixes the transfer mechanism for the lane. The pair is collapsed into
/// a [`TransferSpec`] before any route is handed out.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConf {
    /// Source network name
    pub from: String,
    /// Destination network name
    pub to: String,
    /// Logical asset carried over this lane
    pub asset: String,
    /// Contract-call transfer details
    #[serde(default)]
    pub contract: Option<ContractRouteConf>,
    /// Extrinsic transfer details
    #[serde(default)]
    pub extrinsic: Option<ExtrinsicRouteConf>,
    /// Asset the destination charges its fee in. None if the fee is
    /// taken from the transferred asset itself
    #[serde(default)]
    pub fee_asset: Option<String>,
    /// Destination fee determination
    pub destination_fee: DestinationFeeConf,
}

impl RouteConf {
    /// Collapse the builder pair into a single tagged spec
    pub fn transfer_spec(&self) -> Result<TransferSpec, ConfigError> {
        match (&self.contract, &self.extrinsic) {
            (Some(contract), None) => Ok(TransferSpec::Contract(contract.clone())),
            (None, Some(extrinsic)) => Ok(TransferSpec::Extrinsic(extrinsic.clone())),
            (None, None) => Err(ConfigError::MissingBuilder {
                source: self.from.clone(),
                destination: self.to.clone(),
                asset: self.asset.clone(),
            }),
            (Some(_), Some(_)) => Err(ConfigError::AmbiguousBuilder {
                source: self.from.clone(),
                destination: self.to.clone(),
                asset: self.asset.clone(),
            }),
        }
    }
}

/// The transfer mechanism for a lane, validated at config load
#[derive(Debug, Clone, PartialEq)]
pub enum TransferSpec {
    /// Dispatch through a router contract on the source EVM environment
    Contract(ContractRouteConf),
    /// Dispatch as an extrinsic on the source chain
    Extrinsic(ExtrinsicRouteConf),
}

/// Fee asset registration on both ends of a lane
#[derive(Debug, Clone)]
pub struct FeeAssetConfig {
    /// Logical asset name
    pub name: String,
    /// Registration on the source chain
    pub source: ChainAsset,
    /// Registration on the destination chain
    pub destination: ChainAsset,
}

/// Everything needed to service one transfer lane.
///
/// Produced by route resolution; all fields are owned copies so the
/// config can be dropped once transfers are set up.
#[derive(Debug, Clone)]
pub struct TransferConfig {
    /// Source network
    pub source: Domain,
    /// Destination network
    pub destination: Domain,
    /// Logical asset name
    pub asset: String,
    /// Asset registration on the source chain
    pub source_asset: ChainAsset,
    /// Asset registration on the destination chain
    pub destination_asset: ChainAsset,
    /// Fee asset registrations, if the lane names one
    pub fee_asset: Option<FeeAssetConfig>,
    /// Transfer mechanism
    pub spec: TransferSpec,
    /// Destination fee determination
    pub destination_fee: DestinationFeeConf,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn lane(contract: bool, extrinsic: bool) -> RouteConf {
        RouteConf {
            from: "riverton".to_owned(),
            to: "lakewood".to_owned(),
            asset: "RVT".to_owned(),
            contract: contract.then(|| ContractRouteConf {
                router: Default::default(),
            }),
            extrinsic: extrinsic.then(|| ExtrinsicRouteConf {
                pallet: "XTokens".to_owned(),
                pallet_instance: None,
            }),
            fee_asset: None,
            destination_fee: DestinationFeeConf::Fixed {
                amount: "0.02".to_owned(),
            },
        }
    }

    #[test]
    fn it_requires_exactly_one_builder() {
        assert!(matches!(
            lane(true, false).transfer_spec(),
            Ok(TransferSpec::Contract(_))
        ));
        assert!(matches!(
            lane(false, true).transfer_spec(),
            Ok(TransferSpec::Extrinsic(_))
        ));
        assert!(matches!(
            lane(false, false).transfer_spec(),
            Err(ConfigError::MissingBuilder { .. })
        ));
        assert!(matches!(
            lane(true, true).transfer_spec(),
            Err(ConfigError::AmbiguousBuilder { .. })
        ));
    }

    #[test]
    fn it_desers_destination_fees() {
        let fee: DestinationFeeConf = serde_json::from_value(json!({
            "kind": "fixed",
            "amount": "0.0199"
        }))
        .unwrap();
        assert_eq!(
            fee,
            DestinationFeeConf::Fixed {
                amount: "0.0199".to_owned()
            }
        );

        let fee: DestinationFeeConf = serde_json::from_value(json!({
            "kind": "dynamic",
            "pallet": "AssetTxPayment",
            "entry": "AssetUnitsPerSecond",
            "weight": "4000000000"
        }))
        .unwrap();
        assert_eq!(
            fee,
            DestinationFeeConf::Dynamic {
                pallet: "AssetTxPayment".to_owned(),
                entry: "AssetUnitsPerSecond".to_owned(),
                weight: 4_000_000_000,
            }
        );
    }
}
