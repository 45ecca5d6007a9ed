/// Mock balance reader
mod balance;
pub use balance::*;

/// Mock fee estimator and fee schedule
mod fee;
pub use fee::*;

use portage_core::QueryError;

/// Error for mock chain backends
#[derive(Debug, thiserror::Error)]
#[error("Mock error: {0}")]
pub struct MockError(pub String);

impl From<MockError> for QueryError {
    fn from(e: MockError) -> Self {
        QueryError::CustomError(Box::new(e))
    }
}
