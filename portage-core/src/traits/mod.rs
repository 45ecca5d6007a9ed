mod balance;
mod fee;

use ethers::{
    contract::ContractError,
    providers::{Middleware, ProviderError},
};
use std::error::Error as StdError;

pub use balance::*;
pub use fee::*;

/// QueryError contains errors returned when attempting to read state from
/// a chain
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Contract Error
    #[error("{0}")]
    ContractError(Box<dyn StdError + Send + Sync>),
    /// Provider Error
    #[error("{0}")]
    ProviderError(#[from] ProviderError),
    /// Response did not match the expected shape
    #[error("Could not decode chain response: {0}")]
    DecodeError(String),
    /// Call shape not supported by the backend it was routed to
    #[error("Unsupported call for this backend: {0}")]
    UnsupportedCall(&'static str),
    /// Any other error
    #[error("{0}")]
    CustomError(#[from] Box<dyn StdError + Send + Sync>),
}

impl<M> From<ContractError<M>> for QueryError
where
    M: Middleware + 'static,
{
    fn from(e: ContractError<M>) -> Self {
        Self::ContractError(Box::new(e))
    }
}
