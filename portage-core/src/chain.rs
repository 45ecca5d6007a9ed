#![allow(missing_docs)]

use ethers::prelude::U256;
use portage_types::WalletAddress;
use serde::{Deserialize, Serialize};

/// A balance in a chain's own minor units, exactly as the chain reports it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Balance(pub U256);

impl From<U256> for Balance {
    fn from(v: U256) -> Self {
        Self(v)
    }
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount paired with the decimal precision it is expressed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAmount {
    pub amount: U256,
    pub decimals: u8,
}

impl AssetAmount {
    pub fn new(amount: U256, decimals: u8) -> Self {
        Self { amount, decimals }
    }

    /// A zero amount at the given precision
    pub fn zero(decimals: u8) -> Self {
        Self {
            amount: U256::zero(),
            decimals,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl std::fmt::Display for AssetAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.amount, self.decimals)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractLocator {
    pub name: String,
    pub domain: u32,
    pub address: WalletAddress,
}

impl std::fmt::Display for ContractLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[@{}]+contract:0x{:x}",
            self.name, self.domain, *self.address
        )
    }
}
