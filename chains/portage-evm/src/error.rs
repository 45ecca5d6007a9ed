use ethers::prelude::{ContractError, Middleware, ProviderError};
use portage_core::QueryError;
use std::error::Error as StdError;

/// EVM-specific error wrapper
#[derive(Debug, thiserror::Error)]
pub enum EvmError {
    /// Ethers provider error
    #[error("{0}")]
    ProviderError(#[from] ProviderError),
    /// Ethers contract error
    #[error("{0}")]
    ContractError(Box<dyn StdError + Send + Sync>),
    /// Middleware error
    #[error("{0}")]
    MiddlewareError(Box<dyn StdError + Send + Sync>),
    /// Any other error
    #[error("{0}")]
    CustomError(#[from] Box<dyn StdError + Send + Sync>),
}

impl<M> From<ContractError<M>> for EvmError
where
    M: Middleware + 'static,
{
    fn from(e: ContractError<M>) -> Self {
        Self::ContractError(e.into())
    }
}

impl From<EvmError> for QueryError {
    fn from(e: EvmError) -> Self {
        match e {
            EvmError::ProviderError(e) => QueryError::ProviderError(e),
            EvmError::ContractError(e) => QueryError::ContractError(e),
            EvmError::MiddlewareError(e) => QueryError::CustomError(e),
            EvmError::CustomError(e) => QueryError::CustomError(e),
        }
    }
}
