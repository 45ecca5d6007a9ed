//! Quote a transfer over the builtin `test` environment.
//!
//! Expects the three dev chains named in `configs/test.json` to be
//! reachable on localhost. Run with:
//!
//! `cargo run -p portage-base --example example`

use std::collections::HashMap;

use color_eyre::Result;
use ethers::types::{Address, H256};
use portage_base::settings::trace::start_tracing;
use portage_base::Settings;
use portage_configuration::get_builtin;
use portage_types::WalletAddress;

/// Alice's AccountId32 on the dev chains
const ALICE: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
/// Alith, the first dev account on EVM parachains
const ALITH: &str = "0xf24FF3a9CF04c71Dbc94D0b566f7A27B94566cac";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = get_builtin("test").expect("!config").clone();

    let alice: WalletAddress = ALICE.parse::<H256>()?.into();
    let alith: WalletAddress = ALITH.parse::<Address>()?.into();
    let accounts: HashMap<String, WalletAddress> = config
        .networks
        .iter()
        .map(|network| {
            let account = if network == "emberhart" { alith } else { alice };
            (network.clone(), account)
        })
        .collect();

    let settings = Settings::from_config(&config, &accounts);
    let wallet = settings.try_into_wallet(config).await?;

    start_tracing(settings.logging, wallet.metrics.span_duration())?;
    let _ = wallet.metrics.clone().run_http_server();

    let data = wallet
        .source_data(alice, "riverton".into(), alice, "lakewood".into(), "RVT")
        .await?;

    println!("balance:         {}", data.balance);
    println!("fee balance:     {}", data.fee_balance);
    println!("destination fee: {}", data.destination_fee);
    println!("source fee:      {}", data.source_fee);
    println!("destination min: {}", data.min);

    Ok(())
}
