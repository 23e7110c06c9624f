//! Normalization of submission outcomes into tagged results.

use serde::{Deserialize, Serialize};

use crate::chain::types::Receipt;
use crate::dispatch::error::{DispatchError, DispatchOutcome, ErrorKind};

/// Outcome of a dispatcher operation.
///
/// Always tagged: callers match on the variant (or the serialized `status`
/// field), never on the shape of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchResult {
    Success {
        transaction_id: String,
        processed: serde_json::Value,
    },
    Failure {
        kind: ErrorKind,
        detail: String,
    },
}

impl DispatchResult {
    /// Convert the outcome of a submission attempt.
    pub fn from_outcome(outcome: DispatchOutcome<Receipt>) -> Self {
        match outcome {
            Ok(receipt) => DispatchResult::Success {
                transaction_id: receipt.transaction_id,
                processed: receipt.processed,
            },
            Err(err) => DispatchResult::from(err),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DispatchResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            DispatchResult::Success { transaction_id, .. } => Some(transaction_id),
            DispatchResult::Failure { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            DispatchResult::Success { .. } => None,
            DispatchResult::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Label used for logs and metrics.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            DispatchResult::Success { .. } => "success",
            DispatchResult::Failure { kind, .. } => kind.as_str(),
        }
    }
}

impl From<DispatchError> for DispatchResult {
    fn from(err: DispatchError) -> Self {
        DispatchResult::Failure {
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}

impl From<DispatchOutcome<Receipt>> for DispatchResult {
    fn from(outcome: DispatchOutcome<Receipt>) -> Self {
        DispatchResult::from_outcome(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::types::ChainError;

    #[test]
    fn test_success_is_tagged() {
        let result = DispatchResult::from_outcome(Ok(Receipt {
            transaction_id: "abc".into(),
            processed: serde_json::json!({"block_num": 1}),
        }));

        assert!(result.is_success());
        assert_eq!(result.transaction_id(), Some("abc"));
        assert_eq!(result.error_kind(), None);

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["transaction_id"], "abc");
        assert_eq!(json["processed"]["block_num"], 1);
    }

    #[test]
    fn test_failure_is_tagged() {
        let result = DispatchResult::from_outcome(Err(ChainError::Rejected {
            code: 3090003,
            name: "unsatisfied_authorization".into(),
            message: "missing authority of mywallet1234".into(),
        }
        .into()));

        assert!(result.is_failure());
        assert_eq!(result.transaction_id(), None);
        assert_eq!(result.error_kind(), Some(ErrorKind::ChainRejection));
        assert_eq!(result.outcome_label(), "chain_rejection");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["kind"], "chain_rejection");
        assert!(json["detail"].as_str().unwrap().contains("missing authority"));
        assert!(json.get("transaction_id").is_none());
    }

    #[test]
    fn test_local_errors_become_failures() {
        let result = DispatchResult::from(DispatchError::EmptyBatch);
        assert_eq!(result.error_kind(), Some(ErrorKind::EmptyBatch));

        let result = DispatchResult::from(DispatchError::InvalidInput("amount".into()));
        assert_eq!(result.error_kind(), Some(ErrorKind::InvalidInput));
    }

    #[test]
    fn test_roundtrip_keeps_tag() {
        let result = DispatchResult::Failure {
            kind: ErrorKind::NetworkError,
            detail: "Network error: refused".into(),
        };
        let json = serde_json::to_string(&result).unwrap();
        let decoded: DispatchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, result);
    }
}
