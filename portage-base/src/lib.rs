//! This crate contains the Portage wallet and its settings machinery.
//! Chain channels are built here from configuration, and every
//! user-facing operation (balances, fee quotes, transfer assembly,
//! balance subscriptions) runs through the [`Wallet`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

/// Settings and configuration from which a wallet is built
pub mod settings;

/// Base errors
mod error;

/// Balance reader variants
mod balance;

/// Fee estimator and fee schedule variants
mod fee;

/// Per-chain query channels
mod channel;

/// The wallet orchestrator
mod wallet;

/// Prometheus metrics
pub mod metrics;

pub use balance::*;
pub use channel::*;
pub use error::*;
pub use fee::*;
pub use settings::*;
pub use wallet::*;
