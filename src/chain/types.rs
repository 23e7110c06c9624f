//! Chain-specific types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the signing and chain-client capabilities.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The signer refused or failed to sign.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Transport failure reaching the chain API.
    #[error("Network error: {0}")]
    Network(String),

    /// Chain API request timed out.
    #[error("Chain API timeout after {0} seconds")]
    Timeout(u64),

    /// The chain API answered with a body we could not interpret.
    #[error("Malformed chain API response: {0}")]
    Decode(String),

    /// The chain accepted the request but rejected the transaction.
    #[error("Transaction rejected ({name}, code {code}): {message}")]
    Rejected { code: i64, name: String, message: String },
}

/// Result type for capability calls.
pub type ChainResult<T> = Result<T, ChainError>;

/// A transaction signed and packed, ready for broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub signatures: Vec<String>,
    /// Hex-encoded serialized transaction.
    pub packed_trx: String,
    #[serde(default)]
    pub compression: u8,
}

/// Outcome of a successful broadcast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_id: String,
    /// Opaque processing trace returned by the chain.
    #[serde(default)]
    pub processed: serde_json::Value,
}

/// Subset of `get_info` used for health and reference checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub chain_id: String,
    pub head_block_num: u64,
    pub last_irreversible_block_num: u64,
    #[serde(default)]
    pub head_block_id: String,
    #[serde(default)]
    pub head_block_time: String,
    #[serde(default)]
    pub server_version_string: Option<String>,
}

/// Error body returned by the chain API on HTTP failure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    pub code: i64,
    pub name: String,
    #[serde(default)]
    pub what: String,
    #[serde(default)]
    pub details: Vec<ApiErrorDetailEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetailEntry {
    pub message: String,
}

impl From<ApiErrorBody> for ChainError {
    fn from(body: ApiErrorBody) -> Self {
        // The first detail usually carries the assertion text; `what` is generic.
        let message = body
            .error
            .details
            .first()
            .map(|d| d.message.clone())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.error.what.is_empty() {
                    body.message.clone()
                } else {
                    body.error.what.clone()
                }
            });

        ChainError::Rejected {
            code: body.error.code,
            name: body.error.name,
            message,
        }
    }
}
