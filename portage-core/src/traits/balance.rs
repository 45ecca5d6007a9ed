use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::{Balance, QueryError};

/// Boxed stream of balance snapshots
pub type BalanceStream = BoxStream<'static, Result<Balance, QueryError>>;

/// Interface for reading one asset balance held by one account on one
/// chain. Implementations are bound to a single (chain, asset, holder)
/// triple at construction.
#[async_trait]
pub trait BalanceReader: Send + Sync + std::fmt::Debug {
    /// Return an identifier (not necessarily unique) for the chain this
    /// reader is bound to.
    fn name(&self) -> &str;

    /// Fetch the current balance snapshot
    async fn current_balance(&self) -> Result<Balance, QueryError>;

    /// Open a stream of balance snapshots. The current balance is the
    /// first item, and a fresh snapshot follows whenever the chain reports
    /// a change. Dropping the stream ends the underlying subscription.
    async fn subscribe(&self) -> Result<BalanceStream, QueryError>;

    /// Fetch the smallest balance the chain lets this asset's accounts
    /// hold, `None` where the chain imposes no floor.
    async fn minimum_balance(&self) -> Result<Option<Balance>, QueryError> {
        Ok(None)
    }
}
