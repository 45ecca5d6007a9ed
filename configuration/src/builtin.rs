//! Pre-set configs bundled with the lib

use std::collections::HashMap;

use eyre::Context;
use once_cell::sync::OnceCell;

use crate::WalletConfig;

// built-in config objects
static TEST_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/configs/test.json"));
static BUILTINS: OnceCell<HashMap<&'static str, OnceCell<WalletConfig>>> = OnceCell::new();

fn deser(name: &str, json: &str) -> WalletConfig {
    serde_json::from_str(json)
        .wrap_err_with(|| format!("Configuration {}.json is malformed", name))
        .unwrap()
}

/// Get a built-in config object
pub fn get_builtin(name: &str) -> Option<&WalletConfig> {
    let builtins = BUILTINS.get_or_init(|| {
        let mut map: HashMap<_, _> = Default::default();

        map.insert("test", Default::default());
        map
    });

    Some(builtins.get(name)?.get_or_init(|| match name {
        "test" => deser("test", TEST_JSON),
        _ => panic!("unknown builtin {}", name),
    }))
}
