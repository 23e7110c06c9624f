//! Transaction signing capability.
//!
//! # Security
//! - Key material never enters this process; signing is delegated
//! - The signing service token is read ONLY from an environment variable
//! - Tokens are never logged or serialized

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::chain::types::{ChainError, ChainResult, SignedTransaction};
use crate::config::schema::SignerConfig;
use crate::dispatch::submitter::TransactionRequest;

/// Holds key material and signs transaction requests.
#[async_trait]
pub trait Signer: Send + Sync {
    async fn sign(&self, request: &TransactionRequest) -> ChainResult<SignedTransaction>;
}

#[derive(Serialize)]
struct SignRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    chain_id: Option<&'a str>,
    transaction: &'a TransactionRequest,
}

#[derive(Deserialize)]
struct SignResponse {
    signatures: Vec<String>,
    packed_trx: String,
    #[serde(default)]
    compression: u8,
}

/// Signer backed by an external signing vault reached over HTTP.
///
/// The vault resolves the reference block from the request's window, packs
/// the transaction and returns signatures over it.
#[derive(Clone)]
pub struct RemoteSigner {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    chain_id: Option<String>,
}

impl RemoteSigner {
    /// Create a signer for the vault at `config.url`.
    ///
    /// The bearer token is taken from the environment variable named by
    /// `config.token_env`; a missing variable means unauthenticated requests.
    pub fn new(config: &SignerConfig) -> ChainResult<Self> {
        let token = std::env::var(&config.token_env).ok();
        if token.is_none() {
            tracing::warn!(
                token_env = %config.token_env,
                "Signer token not set, sending unauthenticated requests"
            );
        }
        Self::with_token(config, token)
    }

    pub fn with_token(config: &SignerConfig, token: Option<String>) -> ChainResult<Self> {
        let base = url::Url::parse(&config.url)
            .map_err(|e| ChainError::Signing(format!("Invalid signer URL '{}': {}", config.url, e)))?;
        let endpoint = base
            .join("v1/sign")
            .map_err(|e| ChainError::Signing(format!("Invalid signer URL '{}': {}", config.url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChainError::Signing(format!("HTTP client error: {}", e)))?;

        tracing::info!(endpoint = %endpoint, "Remote signer initialized");

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            token,
            chain_id: None,
        })
    }

    /// Pin the chain id sent to the vault.
    pub fn with_chain_id(mut self, chain_id: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id.into());
        self
    }
}

#[async_trait]
impl Signer for RemoteSigner {
    async fn sign(&self, request: &TransactionRequest) -> ChainResult<SignedTransaction> {
        let body = SignRequest {
            chain_id: self.chain_id.as_deref(),
            transaction: request,
        };

        let mut req = self.http.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ChainError::Signing(format!("Signer unreachable: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ChainError::Signing(format!(
                "Signer returned status {}: {}",
                status, text
            )));
        }

        let signed: SignResponse = resp
            .json()
            .await
            .map_err(|e| ChainError::Signing(format!("Malformed signer response: {}", e)))?;

        if signed.signatures.is_empty() {
            return Err(ChainError::Signing("Signer returned no signatures".to_string()));
        }

        Ok(SignedTransaction {
            signatures: signed.signatures,
            packed_trx: signed.packed_trx,
            compression: signed.compression,
        })
    }
}

impl std::fmt::Debug for RemoteSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSigner")
            .field("endpoint", &self.endpoint)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}
