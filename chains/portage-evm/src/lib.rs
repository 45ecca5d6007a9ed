//! EVM clients: Erc20 balance reads, gas-based fee estimates, and
//! router transfer assembly

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

use portage_core::{BalanceReader, ContractLocator, FeeEstimator};
use portage_types::WalletAddress;
use std::sync::Arc;
use std::time::Duration;

#[macro_use]
mod macros;

/// Contract bindings
#[cfg(not(doctest))]
pub(crate) mod bindings;

/// Erc20 balance reads
#[cfg(not(doctest))]
mod balance;

/// Gas-based fee estimates
#[cfg(not(doctest))]
mod fee;

/// Transfer call assembly
#[cfg(not(doctest))]
mod transfer;

mod error;
pub use error::EvmError;

#[cfg(not(doctest))]
pub use crate::{balance::*, fee::*, transfer::*};

boxed_client!(
    make_balance_reader,
    EvmBalanceReader,
    BalanceReader,
    holder: WalletAddress,
    interval: Duration
);
boxed_client!(
    make_fee_estimator,
    EvmFeeEstimator,
    FeeEstimator,
    holder: WalletAddress
);
