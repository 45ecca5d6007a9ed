//! Asset metadata and per-chain registration details

use portage_types::{deser_portage_u8, AssetId, WalletAddress};

/// Chain-independent description of a transferable asset
#[derive(Default, Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicalAsset {
    /// Human-readable asset name
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
}

/// How an asset's balance is read on a given chain.
///
/// The mechanism tag decides which client stack performs the read; it is
/// fixed when the config is assembled and never re-inspected downstream.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "mechanism", rename_all = "camelCase")]
pub enum BalanceSpec {
    /// Balance lives in an ERC-20 contract (or xc-20 precompile)
    Erc20 {
        /// Contract address on the chain's EVM environment
        contract: WalletAddress,
    },
    /// Balance lives in chain storage
    Storage {
        /// Storage entry layout to query
        query: BalanceQuery,
    },
}

/// Storage entry layout for a balance read
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BalanceQuery {
    /// `System.Account` keyed by account, `data.free` holds the balance
    SystemAccount,
    /// `Assets.Account` keyed by (asset id, account)
    AssetsAccount,
    /// `Tokens.Accounts` keyed by (account, currency id)
    TokensAccounts {
        /// Chain-specific currency id, passed through to the storage key
        currency_id: serde_json::Value,
    },
    /// Any other single-map layout keyed by account
    Raw {
        /// Pallet holding the entry
        pallet: String,
        /// Storage entry name
        entry: String,
    },
}

/// Where an asset's existential minimum is read from
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MinimumQuery {
    /// `Assets.Asset` keyed by asset id, `minBalance` holds the minimum
    AssetsAsset,
    /// Any other storage entry keyed by asset id
    Raw {
        /// Pallet holding the entry
        pallet: String,
        /// Storage entry name
        entry: String,
    },
    /// Runtime constant, e.g. `Balances.ExistentialDeposit`
    Constant {
        /// Pallet exposing the constant
        pallet: String,
        /// Constant name
        name: String,
    },
}

/// An asset as registered on one chain
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainAsset {
    /// On-chain asset identifier used in transfer calls
    #[serde(default)]
    pub id: AssetId,
    /// Asset identifier for balance reads, when it differs from `id`
    #[serde(default)]
    pub balance_id: Option<AssetId>,
    /// Asset identifier for minimum reads, when it differs from `id`
    #[serde(default)]
    pub min_id: Option<AssetId>,
    /// Decimals the chain stores this asset with
    #[serde(deserialize_with = "deser_portage_u8")]
    pub decimals: u8,
    /// How the balance is read on this chain
    pub balance: BalanceSpec,
    /// How the existential minimum is read, if the chain enforces one
    #[serde(default)]
    pub minimum: Option<MinimumQuery>,
}

impl ChainAsset {
    /// Asset identifier to key balance reads with
    pub fn balance_asset_id(&self) -> &AssetId {
        self.balance_id.as_ref().unwrap_or(&self.id)
    }

    /// Asset identifier to key minimum reads with
    pub fn min_asset_id(&self) -> &AssetId {
        self.min_id.as_ref().unwrap_or(&self.id)
    }

    /// True if reading this asset's balance requires an EVM client
    pub fn is_erc20(&self) -> bool {
        matches!(self.balance, BalanceSpec::Erc20 { .. })
    }
}
