use async_trait::async_trait;
use portage_core::{Balance, BalanceReader, BalanceStream, QueryError};
use portage_test::mocks::MockBalanceReader;

/// Balance reader type
#[derive(Debug)]
pub enum BalanceReaders {
    /// Contract-call reader on an EVM execution environment
    Evm(Box<dyn BalanceReader>),
    /// Chain-storage reader over a substrate RPC surface
    Substrate(Box<dyn BalanceReader>),
    /// Mock balance reader
    Mock(Box<MockBalanceReader>),
}

impl BalanceReaders {
    /// Calls checkpoint on mock variant. Should
    /// only be used during tests.
    #[doc(hidden)]
    pub fn checkpoint(&mut self) {
        if let BalanceReaders::Mock(reader) = self {
            reader.checkpoint();
        } else {
            panic!("Reader should be mock variant!");
        }
    }
}

impl From<MockBalanceReader> for BalanceReaders {
    fn from(mock: MockBalanceReader) -> Self {
        BalanceReaders::Mock(Box::new(mock))
    }
}

#[async_trait]
impl BalanceReader for BalanceReaders {
    fn name(&self) -> &str {
        match self {
            BalanceReaders::Evm(reader) => reader.name(),
            BalanceReaders::Substrate(reader) => reader.name(),
            BalanceReaders::Mock(reader) => reader.name(),
        }
    }

    #[tracing::instrument(level = "trace", err)]
    async fn current_balance(&self) -> Result<Balance, QueryError> {
        match self {
            BalanceReaders::Evm(reader) => reader.current_balance().await,
            BalanceReaders::Substrate(reader) => reader.current_balance().await,
            BalanceReaders::Mock(reader) => reader.current_balance().await,
        }
    }

    async fn subscribe(&self) -> Result<BalanceStream, QueryError> {
        match self {
            BalanceReaders::Evm(reader) => reader.subscribe().await,
            BalanceReaders::Substrate(reader) => reader.subscribe().await,
            BalanceReaders::Mock(reader) => reader.subscribe().await,
        }
    }

    async fn minimum_balance(&self) -> Result<Option<Balance>, QueryError> {
        match self {
            BalanceReaders::Evm(reader) => reader.minimum_balance().await,
            BalanceReaders::Substrate(reader) => reader.minimum_balance().await,
            BalanceReaders::Mock(reader) => reader.minimum_balance().await,
        }
    }
}
