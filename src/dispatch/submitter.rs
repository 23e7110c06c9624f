//! Transaction assembly and submission.
//!
//! # Responsibilities
//! - Wrap an ordered action batch with the dispatch window
//! - Sign through the injected `Signer`
//! - Broadcast through the injected `ChainClient`
//!
//! # Design Decisions
//! - Exactly one sign and one broadcast per call, no retries
//! - Empty batches are refused before either capability is touched

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::chain::client::ChainClient;
use crate::chain::signer::Signer;
use crate::chain::types::Receipt;
use crate::dispatch::action::Action;
use crate::dispatch::error::{DispatchError, DispatchOutcome};
use crate::dispatch::identity::DispatchWindow;

/// One or more actions submitted together for atomic execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub actions: Vec<Action>,
    pub blocks_behind: u32,
    pub expire_seconds: u32,
}

impl TransactionRequest {
    /// Wrap a non-empty batch.
    pub fn new(actions: Vec<Action>, window: DispatchWindow) -> DispatchOutcome<Self> {
        if actions.is_empty() {
            return Err(DispatchError::EmptyBatch);
        }
        Ok(Self {
            actions,
            blocks_behind: window.blocks_behind,
            expire_seconds: window.expire_seconds,
        })
    }
}

/// Signs and broadcasts action batches.
#[derive(Clone)]
pub struct TransactionSubmitter {
    signer: Arc<dyn Signer>,
    client: Arc<dyn ChainClient>,
    window: DispatchWindow,
}

impl TransactionSubmitter {
    pub fn new(signer: Arc<dyn Signer>, client: Arc<dyn ChainClient>, window: DispatchWindow) -> Self {
        Self {
            signer,
            client,
            window,
        }
    }

    pub fn window(&self) -> DispatchWindow {
        self.window
    }

    pub fn client(&self) -> &dyn ChainClient {
        self.client.as_ref()
    }

    /// Submit `actions` as one transaction.
    pub async fn submit(&self, actions: Vec<Action>) -> DispatchOutcome<Receipt> {
        let request = TransactionRequest::new(actions, self.window)?;

        tracing::debug!(
            actions = request.actions.len(),
            blocks_behind = request.blocks_behind,
            expire_seconds = request.expire_seconds,
            "Signing transaction"
        );
        let signed = self.signer.sign(&request).await?;

        tracing::debug!(signatures = signed.signatures.len(), "Broadcasting transaction");
        let receipt = self.client.broadcast(&signed).await?;

        Ok(receipt)
    }
}

impl std::fmt::Debug for TransactionSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionSubmitter")
            .field("window", &self.window)
            .finish()
    }
}
