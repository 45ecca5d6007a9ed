//! Portage. Cross-chain token transfer plumbing.
//!
//! This crate contains core primitives, traits, and types for Portage
//! implementations.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]
#![forbid(unsafe_code)]

/// Conversions between chain-local decimal representations
pub mod decimal;

/// Async traits for balance reading and fee estimation, for use in
/// applications
mod traits;
pub use traits::*;

/// Core portage system data structures
mod types;
pub use types::*;

mod chain;
pub use chain::*;

pub use portage_types::{AssetId, WalletAddress};
