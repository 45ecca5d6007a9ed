use portage_types::deser_portage_u128;
use serde::{Deserialize, Serialize};

/// `System.Account` storage entry. Only the fields balance reads care
/// about; the deserializer skips the rest of the record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct AccountInfo {
    pub data: AccountData,
}

/// Balance portion of a `System.Account` record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct AccountData {
    pub free: u128,
}

/// `Assets.Account` storage entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct AssetAccount {
    pub balance: u128,
}

/// `Assets.Asset` storage entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct AssetDetails {
    pub min_balance: u128,
}

/// orml-style `Tokens.Accounts` storage entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct OrmlAccountData {
    pub free: u128,
}

/// `payment_queryInfo` RPC response. Nodes return `partialFee` as a
/// decimal string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentInfo {
    #[serde(deserialize_with = "deser_portage_u128")]
    pub partial_fee: u128,
}
