/// Errors resolving entries out of the wallet directory
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// No route registered for the requested triple
    #[error("No route configured from '{source}' to '{destination}' for asset '{asset}'")]
    RouteNotFound {
        /// Requested source chain
        // `r#` keeps thiserror from treating this chain name as the Error::source()
        r#source: String,
        /// Requested destination chain
        destination: String,
        /// Requested asset key
        asset: String,
    },
    /// Chain not present in the directory
    #[error("Chain '{0}' not present in configured networks")]
    UnknownChain(String),
    /// Logical asset not present in the directory
    #[error("Asset '{0}' not present in configured assets")]
    UnknownAsset(String),
    /// Asset not registered on a chain it is routed through
    #[error("Asset '{asset}' has no registration on chain '{chain}'")]
    MissingRegistration {
        /// Asset key
        asset: String,
        /// Chain the registration is missing on
        chain: String,
    },
    /// Route declares no builder section
    #[error("Route from '{source}' to '{destination}' for asset '{asset}' declares no builder")]
    MissingBuilder {
        /// Route source chain
        // `r#` keeps thiserror from treating this chain name as the Error::source()
        r#source: String,
        /// Route destination chain
        destination: String,
        /// Route asset key
        asset: String,
    },
    /// Route declares both builder sections
    #[error(
        "Route from '{source}' to '{destination}' for asset '{asset}' declares both contract and extrinsic builders"
    )]
    AmbiguousBuilder {
        /// Route source chain
        // `r#` keeps thiserror from treating this chain name as the Error::source()
        r#source: String,
        /// Route destination chain
        destination: String,
        /// Route asset key
        asset: String,
    },
}
