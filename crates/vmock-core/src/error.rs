//! Framework error type.
//!
//! Sub-crates define their own error enums (`BrokerError`, `BehaviorError`)
//! and either convert into `MockError` via `From` impls or stay separate;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `vmock-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum MockError {
    #[error("datapoint {0:?} not found")]
    DatapointNotFound(String),

    #[error("datapoint {0:?} declared more than once")]
    DuplicateDatapoint(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("broker error: {0}")]
    Broker(String),
}

/// Shorthand result type for all `vmock-*` crates.
pub type MockResult<T> = Result<T, MockError>;
