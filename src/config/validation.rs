//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check ledger names, symbols and precision
//! - Validate value ranges (timeouts > 0, expiry > 0)
//! - Check endpoint URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DispatcherConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use crate::config::schema::DispatcherConfig;
use crate::dispatch::identity::{is_valid_name, is_valid_symbol, MAX_PRECISION};

/// A single semantic problem with a configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g. "identity.address").
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &DispatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_valid_name(&config.identity.address) {
        errors.push(ValidationError::new(
            "identity.address",
            format!("'{}' is not a valid account name", config.identity.address),
        ));
    }
    if config.identity.permission.trim().is_empty() {
        errors.push(ValidationError::new("identity.permission", "must not be empty"));
    }

    if config.window.expire_seconds == 0 {
        errors.push(ValidationError::new("window.expire_seconds", "must be greater than 0"));
    }

    if !is_valid_name(&config.contracts.assets) {
        errors.push(ValidationError::new(
            "contracts.assets",
            format!("'{}' is not a valid account name", config.contracts.assets),
        ));
    }

    let native = &config.native_token;
    if !is_valid_symbol(&native.symbol) {
        errors.push(ValidationError::new(
            "native_token.symbol",
            format!("'{}' must be 1-7 uppercase letters", native.symbol),
        ));
    }
    if native.precision > MAX_PRECISION {
        errors.push(ValidationError::new(
            "native_token.precision",
            format!("{} exceeds maximum of {}", native.precision, MAX_PRECISION),
        ));
    }
    if !is_valid_name(&native.contract) {
        errors.push(ValidationError::new(
            "native_token.contract",
            format!("'{}' is not a valid account name", native.contract),
        ));
    }

    if config.limits.max_actions_per_transaction == 0 {
        errors.push(ValidationError::new(
            "limits.max_actions_per_transaction",
            "must be greater than 0",
        ));
    }

    if let Err(e) = url::Url::parse(&config.chain.rpc_url) {
        errors.push(ValidationError::new("chain.rpc_url", e.to_string()));
    }
    for (i, failover) in config.chain.failover_urls.iter().enumerate() {
        if let Err(e) = url::Url::parse(failover) {
            errors.push(ValidationError::new(
                &format!("chain.failover_urls[{}]", i),
                e.to_string(),
            ));
        }
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("chain.rpc_timeout_secs", "must be greater than 0"));
    }

    if let Err(e) = url::Url::parse(&config.signer.url) {
        errors.push(ValidationError::new("signer.url", e.to_string()));
    }
    if config.signer.token_env.trim().is_empty() {
        errors.push(ValidationError::new("signer.token_env", "must not be empty"));
    }
    if config.signer.timeout_secs == 0 {
        errors.push(ValidationError::new("signer.timeout_secs", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> DispatcherConfig {
        let mut config = DispatcherConfig::default();
        config.identity.address = "mywallet1234".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_address_rejected() {
        let config = DispatcherConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "identity.address");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.window.expire_seconds = 0;
        config.native_token.symbol = "wax".to_string();
        config.native_token.precision = 19;
        config.limits.max_actions_per_transaction = 0;
        config.chain.rpc_url = "not a url".to_string();
        config.chain.rpc_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "window.expire_seconds",
                "native_token.symbol",
                "native_token.precision",
                "limits.max_actions_per_transaction",
                "chain.rpc_url",
                "chain.rpc_timeout_secs",
            ]
        );
    }

    #[test]
    fn test_bad_failover_url_reports_index() {
        let mut config = valid_config();
        config.chain.failover_urls = vec!["https://wax.eosphere.io".into(), "::".into()];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "chain.failover_urls[1]");
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::new("signer.url", "relative URL without a base");
        assert_eq!(err.to_string(), "signer.url: relative URL without a base");
    }
}
