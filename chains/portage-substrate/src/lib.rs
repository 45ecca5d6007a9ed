//! Interfaces to chain-query Portage chains
//!
//! Balances and existential minimums come from dynamic storage queries,
//! fee estimates from `payment_queryInfo` on a signed throwaway
//! extrinsic, and transfer dispatches from dynamically-assembled bridge
//! pallet calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(unused_extern_crates)]

mod client;
pub use client::*;

mod balance;
pub use balance::*;

mod fee;
pub use fee::*;

mod transfer;
pub use transfer::*;

mod queries;
pub use queries::*;

mod decodings;

mod utils;
pub use utils::*;

mod error;
pub use error::*;

mod signer;
pub use signer::*;

use color_eyre::Result;
use portage_configuration::app::SignerConf;
use portage_configuration::asset::ChainAsset;
use portage_configuration::Connection;
use portage_core::{BalanceReader, FeeEstimator, FeeSchedule};
use portage_types::WalletAddress;
use std::sync::Arc;
use subxt::ext::sp_core::sr25519;

/// Substrate signer over the sr25519 scheme the dev chains use
pub type SubstrateSigner<T> = SubstrateSigners<T, sr25519::Pair>;

/// Chain config used by the boxed constructors
pub type PortageConfig = subxt::PolkadotConfig;

/// Make a boxed balance reader for `asset` held by `holder`
pub async fn make_balance_reader(
    conn: Connection,
    name: &str,
    holder: WalletAddress,
    asset: &ChainAsset,
) -> Result<Box<dyn BalanceReader>> {
    let api = PortageOnlineClient::<PortageConfig>::from_url(conn.url()).await?;
    Ok(Box::new(SubstrateBalanceReader::new(
        api, name, holder, asset,
    )?))
}

/// Make a boxed fee estimator. Falls back to a dev signing pair when no
/// usable signer is configured.
pub async fn make_fee_estimator(
    conn: Connection,
    name: &str,
    signer_conf: Option<&SignerConf>,
) -> Result<Box<dyn FeeEstimator>> {
    let api = PortageOnlineClient::<PortageConfig>::from_url(conn.url()).await?;
    let signers = match signer_conf {
        Some(conf @ SignerConf::HexKey(_)) => {
            SubstrateSigners::<PortageConfig, sr25519::Pair>::try_from_conf(conf)?
        }
        _ => SubstrateSigners::estimation()?,
    };
    Ok(Box::new(SubstrateFeeEstimator::new(
        api,
        Arc::new(signers),
        name,
    )))
}

/// Make a boxed fee schedule reading `pallet.entry`
pub async fn make_fee_schedule(
    conn: Connection,
    name: &str,
    pallet: &str,
    entry: &str,
) -> Result<Box<dyn FeeSchedule>> {
    let api = PortageOnlineClient::<PortageConfig>::from_url(conn.url()).await?;
    Ok(Box::new(SubstrateFeeSchedule::new(api, name, pallet, entry)))
}
