//! Mock chain backends for testing Portage components

/// Mock implementations of the chain-facing traits
pub mod mocks;
