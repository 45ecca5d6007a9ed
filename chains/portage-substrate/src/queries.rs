use portage_configuration::asset::{BalanceQuery, MinimumQuery};
use portage_types::{AssetId, WalletAddress};
use subxt::ext::scale_value::{serde::from_value, Value};

use crate::decodings::{AccountInfo, AssetAccount, AssetDetails, OrmlAccountData};
use crate::utils::{asset_id_value, json_to_value};
use crate::SubstrateError;

/// A fully-keyed storage read, ready to fetch
#[derive(Debug, Clone)]
pub struct StorageRead {
    /// Pallet holding the entry
    pub pallet: String,
    /// Storage entry name
    pub entry: String,
    /// Map keys, outermost first
    pub keys: Vec<Value>,
}

impl StorageRead {
    /// A read of `pallet.entry` keyed by `keys`
    pub fn new(pallet: &str, entry: &str, keys: Vec<Value>) -> Self {
        Self {
            pallet: pallet.to_owned(),
            entry: entry.to_owned(),
            keys,
        }
    }
}

impl std::fmt::Display for StorageRead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}/{}", self.pallet, self.entry, self.keys.len())
    }
}

/// Locate the balance entry for `holder` under the configured layout
pub fn balance_read(query: &BalanceQuery, asset: &AssetId, holder: &WalletAddress) -> StorageRead {
    match query {
        BalanceQuery::SystemAccount => {
            StorageRead::new("System", "Account", vec![Value::from_bytes(holder)])
        }
        BalanceQuery::AssetsAccount => StorageRead::new(
            "Assets",
            "Account",
            vec![asset_id_value(asset), Value::from_bytes(holder)],
        ),
        BalanceQuery::TokensAccounts { currency_id } => StorageRead::new(
            "Tokens",
            "Accounts",
            vec![Value::from_bytes(holder), json_to_value(currency_id)],
        ),
        BalanceQuery::Raw { pallet, entry } => {
            StorageRead::new(pallet, entry, vec![Value::from_bytes(holder)])
        }
    }
}

/// Locate a u128 entry keyed by an asset id
pub fn asset_read(pallet: &str, entry: &str, asset: &AssetId) -> StorageRead {
    StorageRead::new(pallet, entry, vec![asset_id_value(asset)])
}

/// Pull the free balance out of a value fetched with `balance_read`
pub(crate) fn decode_balance<Ctx>(
    query: &BalanceQuery,
    value: Value<Ctx>,
) -> Result<u128, SubstrateError> {
    Ok(match query {
        BalanceQuery::SystemAccount => {
            let info: AccountInfo = from_value(value)?;
            info.data.free
        }
        BalanceQuery::AssetsAccount => {
            let account: AssetAccount = from_value(value)?;
            account.balance
        }
        BalanceQuery::TokensAccounts { .. } => {
            let account: OrmlAccountData = from_value(value)?;
            account.free
        }
        BalanceQuery::Raw { .. } => from_value(value)?,
    })
}

/// Pull the minimum out of a value fetched with `minimum_read`
pub(crate) fn decode_minimum<Ctx>(
    query: &MinimumQuery,
    value: Value<Ctx>,
) -> Result<u128, SubstrateError> {
    Ok(match query {
        MinimumQuery::AssetsAsset => {
            let details: AssetDetails = from_value(value)?;
            details.min_balance
        }
        MinimumQuery::Raw { .. } | MinimumQuery::Constant { .. } => from_value(value)?,
    })
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn holder() -> WalletAddress {
        WalletAddress::from([7u8; 32])
    }

    #[test]
    fn it_keys_balance_reads() {
        let read = balance_read(&BalanceQuery::SystemAccount, &AssetId::Native, &holder());
        assert_eq!(read.pallet, "System");
        assert_eq!(read.entry, "Account");
        assert_eq!(read.keys, vec![Value::from_bytes([7u8; 32])]);

        let read = balance_read(&BalanceQuery::AssetsAccount, &AssetId::Local(1984), &holder());
        assert_eq!(read.pallet, "Assets");
        assert_eq!(
            read.keys,
            vec![Value::u128(1984u128), Value::from_bytes([7u8; 32])]
        );

        let query = BalanceQuery::TokensAccounts {
            currency_id: json!({ "Token": "KAR" }),
        };
        let read = balance_read(&query, &AssetId::Native, &holder());
        assert_eq!(read.pallet, "Tokens");
        assert_eq!(
            read.keys,
            vec![
                Value::from_bytes([7u8; 32]),
                Value::unnamed_variant("Token", [Value::unnamed_variant("KAR", [])])
            ]
        );

        let query = BalanceQuery::Raw {
            pallet: "EqBalances".to_owned(),
            entry: "Account".to_owned(),
        };
        let read = balance_read(&query, &AssetId::Native, &holder());
        assert_eq!(read.pallet, "EqBalances");
        assert_eq!(read.keys.len(), 1);
    }

    #[test]
    fn it_decodes_balance_layouts() {
        let value = Value::named_composite([(
            "data",
            Value::named_composite([
                ("free", Value::u128(5_000_000_000_000u128)),
                ("reserved", Value::u128(0u128)),
                ("frozen", Value::u128(0u128)),
            ]),
        )]);
        let free = decode_balance(&BalanceQuery::SystemAccount, value).unwrap();
        assert_eq!(free, 5_000_000_000_000);

        let value = Value::named_composite([
            ("balance", Value::u128(150_000u128)),
            ("status", Value::unnamed_variant("Liquid", [])),
            ("reason", Value::unnamed_variant("Consumer", [])),
        ]);
        let free = decode_balance(&BalanceQuery::AssetsAccount, value).unwrap();
        assert_eq!(free, 150_000);

        let query = BalanceQuery::TokensAccounts {
            currency_id: json!({ "Token": "KAR" }),
        };
        let value = Value::named_composite([
            ("free", Value::u128(42u128)),
            ("reserved", Value::u128(1u128)),
            ("frozen", Value::u128(0u128)),
        ]);
        assert_eq!(decode_balance(&query, value).unwrap(), 42);

        let query = BalanceQuery::Raw {
            pallet: "EqBalances".to_owned(),
            entry: "Account".to_owned(),
        };
        let free = decode_balance(&query, Value::u128(9u128)).unwrap();
        assert_eq!(free, 9);
    }

    #[test]
    fn it_decodes_minimum_layouts() {
        let value = Value::named_composite([
            ("owner", Value::from_bytes([0u8; 32])),
            ("min_balance", Value::u128(100_000u128)),
            ("accounts", Value::u128(12u128)),
        ]);
        assert_eq!(
            decode_minimum(&MinimumQuery::AssetsAsset, value).unwrap(),
            100_000
        );

        let query = MinimumQuery::Constant {
            pallet: "Balances".to_owned(),
            name: "ExistentialDeposit".to_owned(),
        };
        assert_eq!(
            decode_minimum(&query, Value::u128(33_333_333u128)).unwrap(),
            33_333_333
        );
    }

    #[test]
    fn it_keys_asset_reads() {
        let read = asset_read("AssetFees", "AssetUnitsPerSecond", &AssetId::Local(1984));
        assert_eq!(read.pallet, "AssetFees");
        assert_eq!(read.entry, "AssetUnitsPerSecond");
        assert_eq!(read.keys, vec![Value::u128(1984u128)]);
        assert_eq!(read.to_string(), "AssetFees.AssetUnitsPerSecond/1");
    }
}
