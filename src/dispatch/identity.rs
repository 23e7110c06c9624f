//! Authorizing identity and dispatch window.

use serde::{Deserialize, Serialize};

use crate::config::schema::{IdentityConfig, WindowConfig};
use crate::dispatch::error::DispatchError;

/// Permission used when none is supplied.
pub const DEFAULT_PERMISSION: &str = "active";

/// Largest fractional precision accepted for a token.
pub const MAX_PRECISION: u8 = 18;

/// The account and permission level that authorizes every action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    address: String,
    permission: String,
}

impl Identity {
    /// Create an identity, defaulting the permission to `active`.
    pub fn new(address: impl Into<String>, permission: Option<&str>) -> Result<Self, DispatchError> {
        let address = address.into();
        ensure_name("address", &address)?;

        let permission = permission.unwrap_or(DEFAULT_PERMISSION).trim();
        if permission.is_empty() {
            return Err(DispatchError::InvalidInput("permission must not be empty".to_string()));
        }

        Ok(Self {
            address,
            permission: permission.to_string(),
        })
    }

    pub fn from_config(config: &IdentityConfig) -> Result<Self, DispatchError> {
        Self::new(config.address.clone(), Some(config.permission.as_str()))
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn permission(&self) -> &str {
        &self.permission
    }
}

/// Bounds on reference-block staleness and transaction validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchWindow {
    pub blocks_behind: u32,
    pub expire_seconds: u32,
}

impl Default for DispatchWindow {
    fn default() -> Self {
        Self {
            blocks_behind: 3,
            expire_seconds: 30,
        }
    }
}

impl From<WindowConfig> for DispatchWindow {
    fn from(config: WindowConfig) -> Self {
        Self {
            blocks_behind: config.blocks_behind,
            expire_seconds: config.expire_seconds,
        }
    }
}

/// Check a ledger name: 1-12 chars of `a-z`, `1-5` and `.`, no trailing dot.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 12
        && !name.ends_with('.')
        && name
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'1'..=b'5' | b'.'))
}

/// Check a token symbol code: 1-7 uppercase ASCII letters.
pub fn is_valid_symbol(symbol: &str) -> bool {
    (1..=7).contains(&symbol.len()) && symbol.bytes().all(|b| b.is_ascii_uppercase())
}

pub(crate) fn ensure_name(field: &str, value: &str) -> Result<(), DispatchError> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(DispatchError::InvalidInput(format!(
            "{} '{}' is not a valid account name",
            field, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_defaults_to_active() {
        let identity = Identity::new("mywallet1234", None).unwrap();
        assert_eq!(identity.address(), "mywallet1234");
        assert_eq!(identity.permission(), "active");
    }

    #[test]
    fn test_explicit_permission() {
        let identity = Identity::new("gibbotwallet", Some("claim")).unwrap();
        assert_eq!(identity.permission(), "claim");
    }

    #[test]
    fn test_invalid_address_rejected() {
        let err = Identity::new("Not-A-Name", None).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidInput(_)));
    }

    #[test]
    fn test_empty_permission_rejected() {
        assert!(Identity::new("thepixelgibs", Some("  ")).is_err());
    }

    #[test]
    fn test_name_rules() {
        assert!(is_valid_name("i15.y.c.wam"));
        assert!(is_valid_name("eosio.token"));
        assert!(is_valid_name("a"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("thirteenchars"));
        assert!(!is_valid_name("trailing."));
        assert!(!is_valid_name("has6digit"));
        assert!(!is_valid_name("UPPER"));
    }

    #[test]
    fn test_symbol_rules() {
        assert!(is_valid_symbol("WAX"));
        assert!(is_valid_symbol("TLM"));
        assert!(!is_valid_symbol(""));
        assert!(!is_valid_symbol("wax"));
        assert!(!is_valid_symbol("TOOLONGX"));
        assert!(!is_valid_symbol("W4X"));
    }

    #[test]
    fn test_default_window() {
        let window = DispatchWindow::default();
        assert_eq!(window.blocks_behind, 3);
        assert_eq!(window.expire_seconds, 30);
        assert_eq!(DispatchWindow::from(WindowConfig::default()), window);
    }
}
