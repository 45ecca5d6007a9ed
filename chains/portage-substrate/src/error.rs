use ethers_core::types::U256;
use portage_core::QueryError;
use subxt::{ext::scale_value, Error as SubxtError};

/// Substrate-specific error wrapper
#[derive(Debug, thiserror::Error)]
pub enum SubstrateError {
    /// Substrate provider error
    #[error("{0}")]
    ProviderError(#[from] SubxtError),
    /// Scale value deserialization error
    #[error("{0}")]
    DeserializationError(#[from] scale_value::serde::DeserializerError),
    /// Amount too large for a chain-native u128 balance
    #[error("Amount does not fit a u128 balance: {0}")]
    AmountOverflow(U256),
    /// Asset registration does not describe a storage read
    #[error("Balance of {0} is not read from chain storage")]
    NotStorageBacked(String),
}

impl From<SubstrateError> for QueryError {
    fn from(e: SubstrateError) -> Self {
        match e {
            SubstrateError::DeserializationError(inner) => {
                QueryError::DecodeError(inner.to_string())
            }
            e => QueryError::CustomError(Box::new(e)),
        }
    }
}
