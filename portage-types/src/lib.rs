//! Common Portage data structures used across various parts of the stack
//! (configuration, chain backends, wallet orchestration)

mod error;
pub use error::*;

mod macros;
pub use macros::*;

mod utils;
pub use utils::*;

use color_eyre::{eyre::bail, Report};
use ethers::prelude::{Address, H256};
use serde::{de, Deserializer};
use std::{fmt, ops::DerefMut, str::FromStr};

/// A Hex String of length `N` representing bytes of length `N / 2`
#[derive(Debug, Clone, PartialEq)]
pub struct HexString<const N: usize>(String);

impl<const N: usize> AsRef<String> for HexString<N> {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

impl<const N: usize> HexString<N> {
    /// Instantiate a new HexString from any `AsRef<str>`. Tolerates 0x
    /// prefixing. A succesful instantiation will create an owned copy of the
    /// string.
    pub fn from_string<S: AsRef<str>>(candidate: S) -> Result<Self, Report> {
        let s = strip_0x_prefix(candidate.as_ref());

        if s.len() != N {
            bail!("Expected string of length {}, got {}", N, s.len());
        }

        if hex::decode(s).is_err() {
            bail!("String is not hex");
        }
        Ok(Self(s.to_owned()))
    }
}

impl<const N: usize> FromStr for HexString<N> {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl<'de, const N: usize> serde::Deserialize<'de> for HexString<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_string(s).map_err(serde::de::Error::custom)
    }
}

/// A 32-byte chain-agnostic account or contract identifier. EVM addresses
/// are left-padded to 32 bytes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, serde::Serialize, Default, Hash)]
pub struct WalletAddress(H256);

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl<'de> serde::Deserialize<'de> for WalletAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(WalletAddressVisitor)
    }
}

impl std::ops::Deref for WalletAddress {
    type Target = H256;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for WalletAddress {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<H256> for WalletAddress {
    fn from(h: H256) -> Self {
        Self(h)
    }
}

impl From<Address> for WalletAddress {
    fn from(h: Address) -> Self {
        Self(h.into())
    }
}

impl From<[u8; 32]> for WalletAddress {
    fn from(buf: [u8; 32]) -> Self {
        Self(buf.into())
    }
}

impl AsRef<[u8]> for WalletAddress {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl AsMut<[u8]> for WalletAddress {
    fn as_mut(&mut self) -> &mut [u8] {
        self.0.as_mut()
    }
}

impl From<WalletAddress> for H256 {
    fn from(addr: WalletAddress) -> Self {
        addr.0
    }
}

impl From<WalletAddress> for [u8; 32] {
    fn from(addr: WalletAddress) -> Self {
        addr.0.into()
    }
}

impl WalletAddress {
    /// Check if the address is an EVM address. This checks that the first 12
    /// bytes are all 0.
    pub fn is_evm_address(&self) -> bool {
        self.0.as_bytes()[0..12].iter().all(|b| *b == 0)
    }

    /// Convert to an EVM address. Return an error if the conversion would
    /// drop non-0 bytes
    pub fn as_evm_address(&self) -> Result<Address, PortageTypeError> {
        let buf = self.as_fixed_bytes();
        if buf.starts_with(&[0u8; 12]) {
            Ok(Address::from_slice(&buf[12..]))
        } else {
            Err(PortageTypeError::AddressConversionError(*self))
        }
    }
}

struct WalletAddressVisitor;

impl<'de> de::Visitor<'de> for WalletAddressVisitor {
    type Value = WalletAddress;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a 20- or 32-byte 0x-prepended hexadecimal string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if let Ok(h) = v.parse::<H256>() {
            return Ok(h.into());
        }
        if let Ok(a) = v.parse::<Address>() {
            return Ok(a.into());
        }

        Err(E::custom("Unable to parse H256 or Address from string"))
    }
}

// Implement deser_portage_number for all uint types
impl_deser_portage_number!(u128, u64, u32, u16, u8);

/// A chain-local asset identifier
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AssetId {
    /// The chain's native currency
    Native,
    /// Numeric id in an assets- or tokens-style pallet
    Local(u128),
    /// An ERC-20 contract or precompile address
    Contract(WalletAddress),
}

impl Default for AssetId {
    fn default() -> Self {
        Self::Native
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetId::Native => write!(f, "native"),
            AssetId::Local(n) => write!(f, "{}", n),
            AssetId::Contract(addr) => write!(f, "{}", addr),
        }
    }
}

impl serde::Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            AssetId::Native => serializer.serialize_str("native"),
            AssetId::Local(n) => serializer.serialize_str(&n.to_string()),
            AssetId::Contract(addr) => addr.serialize(serializer),
        }
    }
}

impl<'de> serde::Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AssetIdVisitor)
    }
}

struct AssetIdVisitor;

impl<'de> de::Visitor<'de> for AssetIdVisitor {
    type Value = AssetId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(
            "\"native\", a numeric pallet asset id, or a 20- or 32-byte hexadecimal address",
        )
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(AssetId::Local(v.into()))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v.eq_ignore_ascii_case("native") {
            return Ok(AssetId::Native);
        }
        if let Ok(n) = v.parse::<u128>() {
            return Ok(AssetId::Local(n));
        }
        if let Ok(h) = v.parse::<H256>() {
            return Ok(AssetId::Contract(h.into()));
        }
        if let Ok(a) = v.parse::<Address>() {
            return Ok(AssetId::Contract(a.into()));
        }

        Err(E::custom("Unable to parse asset id from string"))
    }
}

/// An abstraction for allowing chains to be referenced by name or domain number
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum NameOrDomain {
    /// Chain name
    Name(String),
    /// Domain number
    Domain(u32),
}

impl std::fmt::Display for NameOrDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameOrDomain::Name(name) => write!(f, "{}", name),
            NameOrDomain::Domain(number) => write!(f, "{}", number),
        }
    }
}

impl From<String> for NameOrDomain {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<&str> for NameOrDomain {
    fn from(s: &str) -> Self {
        Self::Name(s.to_owned())
    }
}

impl From<u32> for NameOrDomain {
    fn from(t: u32) -> Self {
        Self::Domain(t)
    }
}

/// Domain/Address pair locating an asset or account on a specific chain
#[derive(
    Default, Debug, Clone, Copy, Hash, Eq, PartialEq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct PortageLocator {
    /// The domain
    pub domain: u32,
    /// The identifier on that domain
    pub id: WalletAddress,
}
