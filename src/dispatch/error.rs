//! Dispatch error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::types::ChainError;

/// Errors that can occur while building or submitting a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Empty, negative or malformed arguments, caught before any I/O.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No actions to submit.
    #[error("Refusing to submit a transaction with no actions")]
    EmptyBatch,

    /// Failure raised by the signer or chain client.
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl DispatchError {
    /// Classify this error for the caller.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::InvalidInput(_) => ErrorKind::InvalidInput,
            DispatchError::EmptyBatch => ErrorKind::EmptyBatch,
            DispatchError::Chain(ChainError::Signing(_)) => ErrorKind::SigningError,
            DispatchError::Chain(ChainError::Rejected { .. }) => ErrorKind::ChainRejection,
            DispatchError::Chain(
                ChainError::Network(_) | ChainError::Timeout(_) | ChainError::Decode(_),
            ) => ErrorKind::NetworkError,
        }
    }
}

/// Result type for dispatch internals.
pub type DispatchOutcome<T> = Result<T, DispatchError>;

/// Failure classification carried by `DispatchResult::Failure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    EmptyBatch,
    SigningError,
    NetworkError,
    ChainRejection,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::EmptyBatch => "empty_batch",
            ErrorKind::SigningError => "signing_error",
            ErrorKind::NetworkError => "network_error",
            ErrorKind::ChainRejection => "chain_rejection",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
