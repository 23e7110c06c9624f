//! Chain API client with timeout and failover handling.
//!
//! # Responsibilities
//! - Connect to the chain HTTP API (`/v1/chain/*`)
//! - Query chain state (`get_info`)
//! - Broadcast signed transactions (`push_transaction`)
//! - Handle timeouts and network errors gracefully

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::chain::types::{ApiErrorBody, ChainError, ChainInfo, ChainResult, Receipt, SignedTransaction};
use crate::config::schema::ChainConfig;

/// Ledger access: chain state and transaction broadcast.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Broadcast a signed transaction and return the chain's receipt.
    async fn broadcast(&self, tx: &SignedTransaction) -> ChainResult<Receipt>;

    /// Fetch current chain state.
    async fn chain_info(&self) -> ChainResult<ChainInfo>;
}

#[derive(Serialize)]
struct PushTransaction<'a> {
    signatures: &'a [String],
    compression: u8,
    packed_context_free_data: &'a str,
    packed_trx: &'a str,
}

/// Chain API client over HTTP with failover support.
#[derive(Clone)]
pub struct RpcChainClient {
    http: reqwest::Client,
    /// Endpoints (primary + failovers).
    endpoints: Vec<url::Url>,
    /// Request timeout in seconds.
    timeout_secs: u64,
}

impl RpcChainClient {
    /// Create a new chain client.
    ///
    /// # Arguments
    /// * `config` - Chain configuration
    ///
    /// # Returns
    /// A new client or error if the primary URL is invalid
    pub fn new(config: &ChainConfig) -> ChainResult<Self> {
        let mut endpoints = Vec::new();

        // 1. Add primary endpoint
        let primary: url::Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Network(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        endpoints.push(primary);

        // 2. Add failover endpoints
        for url_str in &config.failover_urls {
            match url_str.parse() {
                Ok(url) => endpoints.push(url),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.rpc_timeout_secs))
            .build()
            .map_err(|e| ChainError::Network(format!("HTTP client error: {}", e)))?;

        tracing::info!(
            rpc_url = %config.rpc_url,
            failovers = endpoints.len() - 1,
            "Chain client initialized"
        );

        Ok(Self {
            http,
            endpoints,
            timeout_secs: config.rpc_timeout_secs,
        })
    }

    /// Number of configured endpoints.
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    /// POST `body` to `path` on each endpoint until one answers.
    ///
    /// Transport errors and timeouts move on to the next endpoint. Any HTTP
    /// response, success or rejection, ends the loop.
    async fn post<B, T>(&self, path: &str, body: &B) -> ChainResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let mut last_error = ChainError::Network("No chain endpoints configured".to_string());

        for (i, endpoint) in self.endpoints.iter().enumerate() {
            let url = endpoint
                .join(path)
                .map_err(|e| ChainError::Network(format!("Invalid endpoint path: {}", e)))?;

            match self.http.post(url).json(body).send().await {
                Ok(resp) => return self.read_response(resp).await,
                Err(e) if e.is_timeout() => {
                    tracing::warn!(provider_idx = i, path, "RPC timeout, trying next provider");
                    last_error = ChainError::Timeout(self.timeout_secs);
                }
                Err(e) => {
                    tracing::warn!(provider_idx = i, path, error = %e, "RPC error, trying next provider");
                    last_error = ChainError::Network(format!("All RPC providers failed: {}", e));
                }
            }
        }

        Err(last_error)
    }

    async fn read_response<T>(&self, resp: reqwest::Response) -> ChainResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ChainError::Network(format!("Failed to read response body: {}", e)))?;

        if status.is_success() {
            return serde_json::from_str(&text).map_err(|e| ChainError::Decode(e.to_string()));
        }

        // Nodes report ledger-side failures as HTTP errors with a structured body.
        match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => Err(ChainError::from(body)),
            Err(_) => Err(ChainError::Network(format!(
                "Chain API returned status {}: {}",
                status, text
            ))),
        }
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn broadcast(&self, tx: &SignedTransaction) -> ChainResult<Receipt> {
        let body = PushTransaction {
            signatures: &tx.signatures,
            compression: tx.compression,
            packed_context_free_data: "",
            packed_trx: &tx.packed_trx,
        };
        let receipt: Receipt = self.post("v1/chain/push_transaction", &body).await?;

        tracing::info!(transaction_id = %receipt.transaction_id, "Transaction broadcast");
        Ok(receipt)
    }

    async fn chain_info(&self) -> ChainResult<ChainInfo> {
        self.post("v1/chain/get_info", &serde_json::json!({})).await
    }
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("rpc_url", &self.endpoints[0].as_str())
            .field("endpoints", &self.endpoints.len())
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ChainConfig {
        ChainConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            failover_urls: Vec::new(),
            rpc_timeout_secs: 2,
        }
    }

    #[test]
    fn test_client_creation() {
        let mut config = test_config();
        config.failover_urls.push("http://127.0.0.1:2".to_string());
        config.failover_urls.push("not a url".to_string());

        let client = RpcChainClient::new(&config).unwrap();
        assert_eq!(client.endpoint_count(), 2);
    }

    #[test]
    fn test_invalid_primary_url() {
        let mut config = test_config();
        config.rpc_url = "wax".to_string();
        let err = RpcChainClient::new(&config).unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_rpc_failover_exhausted() {
        let mut config = test_config();
        config.failover_urls.push("http://127.0.0.1:2".to_string());

        let client = RpcChainClient::new(&config).unwrap();
        let result = client.chain_info().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("All RPC providers failed"));
    }
}
