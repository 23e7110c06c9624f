//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the dispatcher.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the dispatcher.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DispatcherConfig {
    /// The authorizing account and permission.
    pub identity: IdentityConfig,

    /// Transaction staleness and validity window.
    pub window: WindowConfig,

    /// Contract accounts targeted by asset actions.
    pub contracts: ContractsConfig,

    /// Native token definition (symbol, precision, contract).
    pub native_token: NativeTokenConfig,

    /// Bounds on how far one intent may expand.
    pub limits: LimitsConfig,

    /// Chain API endpoints.
    pub chain: ChainConfig,

    /// Remote signing service.
    pub signer: SignerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Wallet account name (e.g. "mywallet1234", "i15.y.c.wam").
    pub address: String,

    /// Permission level used to authorize every action.
    pub permission: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            permission: "active".to_string(),
        }
    }
}

/// Dispatch window configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowConfig {
    /// How many blocks behind head the reference block may be.
    pub blocks_behind: u32,

    /// Seconds until the transaction expires.
    pub expire_seconds: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            blocks_behind: 3,
            expire_seconds: 30,
        }
    }
}

/// Contract accounts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// NFT standard contract (transfer, burnasset, mintasset).
    pub assets: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            assets: "atomicassets".to_string(),
        }
    }
}

/// Native token configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NativeTokenConfig {
    /// Token symbol code.
    pub symbol: String,

    /// Number of fractional digits the chain expects.
    pub precision: u8,

    /// Token contract account.
    pub contract: String,
}

impl Default for NativeTokenConfig {
    fn default() -> Self {
        Self {
            symbol: "WAX".to_string(),
            precision: 8,
            contract: "eosio.token".to_string(),
        }
    }
}

/// Batch limits.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Most actions a single intent may put into one transaction.
    pub max_actions_per_transaction: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_actions_per_transaction: 100,
        }
    }
}

/// Chain API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Chain API endpoint URL.
    pub rpc_url: String,

    /// Failover chain API endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://wax.greymass.com".to_string(),
            failover_urls: Vec::new(),
            rpc_timeout_secs: 10,
        }
    }
}

/// Remote signer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Base URL of the signing service.
    pub url: String,

    /// Name of the environment variable holding the bearer token.
    pub token_env: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:7777".to_string(),
            token_env: "WAX_DISPATCH_SIGNER_TOKEN".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Record dispatch metrics.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatcherConfig::default();
        assert_eq!(config.identity.permission, "active");
        assert_eq!(config.window.blocks_behind, 3);
        assert_eq!(config.window.expire_seconds, 30);
        assert_eq!(config.contracts.assets, "atomicassets");
        assert_eq!(config.native_token.symbol, "WAX");
        assert_eq!(config.native_token.precision, 8);
        assert_eq!(config.native_token.contract, "eosio.token");
        assert_eq!(config.limits.max_actions_per_transaction, 100);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DispatcherConfig = toml::from_str(
            r#"
            [identity]
            address = "mywallet1234"

            [window]
            expire_seconds = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.identity.address, "mywallet1234");
        assert_eq!(config.identity.permission, "active");
        assert_eq!(config.window.blocks_behind, 3);
        assert_eq!(config.window.expire_seconds, 60);
        assert_eq!(config.chain.rpc_timeout_secs, 10);
    }
}
