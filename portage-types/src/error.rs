use crate::WalletAddress;

/// Shared type error
#[derive(thiserror::Error, Debug)]
pub enum PortageTypeError {
    /// Failed to perform conversion to 20 byte address
    #[error("Failed to convert 32 byte address into 20 byte address: {0}")]
    AddressConversionError(WalletAddress),
}
