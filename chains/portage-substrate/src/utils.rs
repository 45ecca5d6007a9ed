use portage_types::{strip_0x_prefix, AssetId};
use subxt::ext::scale_value::Value;

/// Format a chain-local asset id into scale value format, for use as a
/// storage map key or call argument
pub fn asset_id_value(id: &AssetId) -> Value {
    match id {
        AssetId::Native => Value::unnamed_variant("Native", []),
        AssetId::Local(n) => Value::u128(*n),
        AssetId::Contract(addr) => Value::from_bytes(
            addr.as_evm_address()
                .map(|a| a.as_bytes().to_vec())
                .unwrap_or_else(|_| addr.as_ref().to_vec()),
        ),
    }
}

/// Format an optional value into scale `Option` format
pub fn option_value(inner: Option<Value>) -> Value {
    match inner {
        Some(value) => Value::unnamed_variant("Some", [value]),
        None => Value::unnamed_variant("None", []),
    }
}

/// Format the JSON form a config carries into scale value format.
///
/// Configs describe chain-specific keys (orml currency ids and the like)
/// as JSON. Single-entry objects become variants, bare strings become
/// unit variants unless they are hex byte strings, and numbers, bools,
/// arrays, and wider objects map structurally.
pub fn json_to_value(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::unnamed_composite([]),
        serde_json::Value::Bool(b) => Value::bool(*b),
        serde_json::Value::Number(n) => number_to_value(n),
        serde_json::Value::String(s) => string_to_value(s),
        serde_json::Value::Array(items) => {
            Value::unnamed_composite(items.iter().map(json_to_value).collect::<Vec<_>>())
        }
        serde_json::Value::Object(fields) if fields.len() == 1 => {
            let (name, inner) = fields.iter().next().unwrap();
            Value::unnamed_variant(name.as_str(), [json_to_value(inner)])
        }
        serde_json::Value::Object(fields) => Value::named_composite(
            fields
                .iter()
                .map(|(name, inner)| (name.as_str(), json_to_value(inner)))
                .collect::<Vec<_>>(),
        ),
    }
}

fn number_to_value(n: &serde_json::Number) -> Value {
    if let Some(u) = n.as_u64() {
        return Value::u128(u as u128);
    }
    if let Some(i) = n.as_i64() {
        return Value::i128(i as i128);
    }
    // Fractional numbers have no scale encoding. Encode the digits; the
    // chain will reject the key if it was never valid.
    Value::string(n.to_string())
}

fn string_to_value(s: &str) -> Value {
    let stripped = strip_0x_prefix(s);
    if s.starts_with("0x") {
        if let Ok(bytes) = hex::decode(stripped) {
            return Value::from_bytes(bytes);
        }
    }
    Value::unnamed_variant(s, [])
}

#[cfg(test)]
mod test {
    use portage_types::WalletAddress;
    use serde_json::json;

    use super::*;

    #[test]
    fn it_formats_asset_ids() {
        assert_eq!(
            asset_id_value(&AssetId::Local(1984)),
            Value::u128(1984u128)
        );
        assert_eq!(
            asset_id_value(&AssetId::Native),
            Value::unnamed_variant("Native", [])
        );

        let addr: WalletAddress = "0xffffffff1fcacbd218edc0eba20fc2308c778080"
            .parse::<ethers_core::types::Address>()
            .unwrap()
            .into();
        let value = asset_id_value(&AssetId::Contract(addr));
        assert_eq!(
            value,
            Value::from_bytes(hex::decode("ffffffff1fcacbd218edc0eba20fc2308c778080").unwrap())
        );
    }

    #[test]
    fn it_formats_currency_id_json() {
        assert_eq!(
            json_to_value(&json!({ "Token": "KAR" })),
            Value::unnamed_variant("Token", [Value::unnamed_variant("KAR", [])])
        );
        assert_eq!(
            json_to_value(&json!({ "ForeignAsset": 18 })),
            Value::unnamed_variant("ForeignAsset", [Value::u128(18u128)])
        );
        assert_eq!(json_to_value(&json!(1984)), Value::u128(1984u128));
        assert_eq!(
            json_to_value(&json!("0x0001")),
            Value::from_bytes(vec![0u8, 1u8])
        );
        assert_eq!(
            json_to_value(&json!(["DOT", 2])),
            Value::unnamed_composite([
                Value::unnamed_variant("DOT", []),
                Value::u128(2u128)
            ])
        );
    }

    #[test]
    fn it_formats_options() {
        assert_eq!(
            option_value(Some(Value::u128(7u128))),
            Value::unnamed_variant("Some", [Value::u128(7u128)])
        );
        assert_eq!(option_value(None), Value::unnamed_variant("None", []));
    }
}
