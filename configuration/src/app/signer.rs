use portage_types::HexString;

/// Signer types
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(untagged)]
pub enum SignerConf {
    /// A local hex key
    HexKey(
        /// Hex string of private key, without 0x prefix
        HexString<64>,
    ),
    /// Assume node will sign on RPC calls
    Node,
}

impl Default for SignerConf {
    fn default() -> Self {
        Self::Node
    }
}
