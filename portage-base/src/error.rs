use portage_configuration::ConfigError;
use portage_core::{decimal::AmountError, QueryError};
use portage_types::{PortageTypeError, WalletAddress};

/// WalletError contains errors surfaced by wallet operations: directory
/// lookups that come up empty, chain reads that fail, and amounts that
/// cannot be re-expressed at the requested precision
#[derive(thiserror::Error, Debug)]
pub enum WalletError {
    /// Directory lookup failure
    #[error("{0}")]
    ConfigError(#[from] ConfigError),
    /// Chain read failure
    #[error("{0}")]
    QueryError(#[from] QueryError),
    /// Amount conversion failure
    #[error("{0}")]
    AmountError(#[from] AmountError),
    /// Portage type error
    #[error("{0}")]
    TypeError(#[from] PortageTypeError),
    /// No channel open for a chain named by an operation
    #[error("No channel open for chain '{0}'")]
    MissingChannel(String),
    /// No balance reader built for an asset on a chain
    #[error("Asset '{asset}' has no reader on chain '{chain}'")]
    AssetNotFound {
        /// Logical asset name
        asset: String,
        /// Chain name
        chain: String,
    },
    /// Address is not the account the chain's channel was built for
    #[error("Account {address} is not held by the wallet on chain '{chain}'")]
    UnknownAccount {
        /// Offending address
        address: WalletAddress,
        /// Chain name
        chain: String,
    },
    /// Fee asset registered as erc20. Fee reads go through chain storage
    #[error("Fee asset '{asset}' is registered as erc20 on chain '{chain}'")]
    EvmFeeAsset {
        /// Logical asset name
        asset: String,
        /// Chain name
        chain: String,
    },
    /// Fee schedule holds no price for an asset
    #[error("Asset '{asset}' is not priced in the fee schedule of chain '{chain}'")]
    UnpricedAsset {
        /// Logical asset name
        asset: String,
        /// Chain name
        chain: String,
    },
    /// No fee estimator built for a transfer mechanism on a chain
    #[error("No {mechanism} fee estimator open for chain '{chain}'")]
    MissingEstimator {
        /// Chain name
        chain: String,
        /// Transfer mechanism label
        mechanism: &'static str,
    },
    /// No fee schedule built for a storage entry on a chain
    #[error("No fee schedule reading '{entry}' open for chain '{chain}'")]
    MissingSchedule {
        /// Chain name
        chain: String,
        /// `pallet.entry` the schedule would read
        entry: String,
    },
    /// Route dispatches through a contract but the asset id is not one
    #[error("Asset '{asset}' on chain '{chain}' has no contract id for router dispatch")]
    NoContractId {
        /// Logical asset name
        asset: String,
        /// Chain name
        chain: String,
    },
    /// Mock error
    #[error("{0}")]
    MockError(#[from] portage_test::mocks::MockError),
}
