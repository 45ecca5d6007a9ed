use portage_base::Settings;
use portage_configuration::get_builtin;
use portage_types::WalletAddress;
use std::collections::HashMap;

#[tokio::test]
async fn wallet_builds_against_dev_chains() {
    // opt-in: requires the configs/test.json chains on localhost
    if std::env::var("PORTAGE_DEV_CHAINS").is_err() {
        return;
    }

    let config = get_builtin("test").expect("!config").clone();
    let accounts: HashMap<String, WalletAddress> = config
        .networks
        .iter()
        .map(|network| (network.clone(), WalletAddress::from([1u8; 32])))
        .collect();

    let settings = Settings::from_config(&config, &accounts);
    settings.validate_against_config(&config).unwrap();

    let wallet = settings.try_into_wallet(config).await.unwrap();
    assert_eq!(wallet.channels.len(), 3);

    let channel = wallet.channel("riverton").unwrap();
    assert_eq!(channel.domain, 2000);
    assert!(channel.readers.contains_key("RVT"));
}
