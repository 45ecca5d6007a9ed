use ethers::prelude::{Address, U256};
use portage_types::{AssetId, WalletAddress};
use serde::{Deserialize, Serialize};

/// A fully-resolved transfer, ready to be signed and dispatched on its
/// origin chain. The variant is fixed when the route's configuration is
/// built and is the only thing deciding which backend executes the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mechanism")]
pub enum TransferCall {
    /// A router contract `send` on an EVM-capable chain
    Contract(ContractTransfer),
    /// A bridge pallet extrinsic on a chain-native chain
    Extrinsic(ExtrinsicTransfer),
}

impl TransferCall {
    /// Static label for the execution mechanism of this call
    pub fn mechanism(&self) -> &'static str {
        match self {
            TransferCall::Contract(_) => "contract",
            TransferCall::Extrinsic(_) => "extrinsic",
        }
    }

    /// Domain of the chain the call executes on
    pub fn origin_domain(&self) -> u32 {
        match self {
            TransferCall::Contract(call) => call.origin_domain,
            TransferCall::Extrinsic(call) => call.origin_domain,
        }
    }

    /// Domain of the receiving chain
    pub fn destination_domain(&self) -> u32 {
        match self {
            TransferCall::Contract(call) => call.destination_domain,
            TransferCall::Extrinsic(call) => call.destination_domain,
        }
    }

    /// Amount moved by the call, in origin minor units
    pub fn amount(&self) -> U256 {
        match self {
            TransferCall::Contract(call) => call.amount,
            TransferCall::Extrinsic(call) => call.amount,
        }
    }
}

impl std::fmt::Display for TransferCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TransferCall {{ {} {}->{} amount: {} }}",
            self.mechanism(),
            self.origin_domain(),
            self.destination_domain(),
            self.amount(),
        )
    }
}

/// Arguments of a router contract
/// `send(token, amount, fee, destination, recipient)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTransfer {
    /// Domain of the dispatching chain
    pub origin_domain: u32,
    /// Domain of the receiving chain
    pub destination_domain: u32,
    /// Router contract dispatching the transfer
    pub router: Address,
    /// ERC-20 token under transfer
    pub token: Address,
    /// Amount in the token's minor units
    pub amount: U256,
    /// Destination execution fee, paid in the transferred token
    pub fee: U256,
    /// Receiving account in 32-byte universal form
    pub recipient: WalletAddress,
}

/// Arguments of a bridge pallet `transfer` extrinsic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrinsicTransfer {
    /// Domain of the dispatching chain
    pub origin_domain: u32,
    /// Domain of the receiving chain
    pub destination_domain: u32,
    /// Pallet carrying the `transfer` call
    pub pallet: String,
    /// Instance index when the pallet is instanced
    pub pallet_instance: Option<u8>,
    /// Asset under transfer
    pub asset_id: AssetId,
    /// Amount in the asset's minor units
    pub amount: U256,
    /// Asset the destination fee is paid in, when distinct from the
    /// transferred asset
    pub fee_asset_id: Option<AssetId>,
    /// Destination execution fee in fee-asset minor units
    pub fee: U256,
    /// Receiving account in 32-byte universal form
    pub recipient: WalletAddress,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_tags_calls_with_their_mechanism() {
        let call = TransferCall::Extrinsic(ExtrinsicTransfer {
            origin_domain: 2000,
            destination_domain: 2004,
            pallet: "Bridge".to_owned(),
            pallet_instance: None,
            asset_id: AssetId::Local(1984),
            amount: U256::from(5_000_000u64),
            fee_asset_id: Some(AssetId::Native),
            fee: U256::from(100u64),
            recipient: WalletAddress::default(),
        });

        let value = serde_json::to_value(&call).unwrap();
        assert_eq!(value["mechanism"], "extrinsic");
        assert_eq!(value["pallet"], "Bridge");

        let back: TransferCall = serde_json::from_value(value).unwrap();
        assert_eq!(back, call);
        assert_eq!(back.mechanism(), "extrinsic");
        assert_eq!(back.origin_domain(), 2000);
        assert_eq!(back.amount(), U256::from(5_000_000u64));
    }
}
