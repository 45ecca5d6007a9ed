#![allow(non_snake_case)]

use async_trait::async_trait;
use mockall::*;

use portage_core::*;

mock! {
    pub BalanceReader {
        // BalanceReader
        pub fn _name(&self) -> &str {}

        pub fn _current_balance(&self) -> Result<Balance, QueryError> {}

        pub fn _subscribe(&self) -> Result<BalanceStream, QueryError> {}

        pub fn _minimum_balance(&self) -> Result<Option<Balance>, QueryError> {}
    }
}

impl std::fmt::Debug for MockBalanceReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockBalanceReader")
    }
}

impl std::fmt::Display for MockBalanceReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockBalanceReader")
    }
}

#[async_trait]
impl BalanceReader for MockBalanceReader {
    fn name(&self) -> &str {
        self._name()
    }

    async fn current_balance(&self) -> Result<Balance, QueryError> {
        self._current_balance()
    }

    async fn subscribe(&self) -> Result<BalanceStream, QueryError> {
        self._subscribe()
    }

    async fn minimum_balance(&self) -> Result<Option<Balance>, QueryError> {
        self._minimum_balance()
    }
}
