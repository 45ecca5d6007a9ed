//! Application-level configuration (logging, metrics, signers).
//!
//! All structs defined in this module include public data only. Signer
//! settings are separate and come from the environment so that keys never
//! land in shareable config files.

mod logging;
pub use logging::*;

mod signer;
pub use signer::*;

/// Application configuration
#[derive(Default, Debug, Copy, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Metrics port
    pub metrics: Option<u16>,
    /// Logging configuration
    pub logging: LogConfig,
}
