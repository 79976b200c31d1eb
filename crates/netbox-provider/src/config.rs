//! Provider configuration
//!
//! Values written in the provider block win; anything left out falls back to
//! the environment:
//!
//! - `NETBOX_SERVER_URL`: NetBox base URL, e.g. `https://netbox.example.com`
//! - `NETBOX_API_TOKEN`: API token
//! - `NETBOX_INSECURE`: `true` skips TLS certificate verification

use crate::error::ProviderError;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SERVER_URL_ENV: &str = "NETBOX_SERVER_URL";
pub const API_TOKEN_ENV: &str = "NETBOX_API_TOKEN";
pub const INSECURE_ENV: &str = "NETBOX_INSECURE";

/// The provider block as written in configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderBlock {
    pub server_url: Value<String>,
    pub api_token: Value<String>,
    pub insecure: Value<bool>,
}

/// Resolved settings used to build the NetBox client
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub server_url: String,
    pub api_token: String,
    pub insecure: bool,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("server_url", &self.server_url)
            .field("api_token", &"<redacted>")
            .field("insecure", &self.insecure)
            .finish()
    }
}

impl ProviderConfig {
    /// Resolve `block` against the process environment
    pub fn from_block(block: &ProviderBlock) -> Result<Self, ProviderError> {
        Self::resolve(block, |key| std::env::var(key).ok())
    }

    /// Resolve `block`, filling gaps from `env`
    pub fn resolve(
        block: &ProviderBlock,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ProviderError> {
        let setting = |value: &Value<String>, key: &str| {
            value
                .as_str()
                .map(str::to_string)
                .or_else(|| env(key))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_url = setting(&block.server_url, SERVER_URL_ENV).ok_or_else(|| {
            ProviderError::InvalidConfig(format!("server_url is required (or set {})", SERVER_URL_ENV))
        })?;
        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            return Err(ProviderError::InvalidConfig(format!(
                "server_url {:?} must start with http:// or https://",
                server_url
            )));
        }

        let api_token = setting(&block.api_token, API_TOKEN_ENV).ok_or_else(|| {
            ProviderError::InvalidConfig(format!("api_token is required (or set {})", API_TOKEN_ENV))
        })?;

        let insecure = match block.insecure {
            Value::Known(insecure) => insecure,
            _ => env(INSECURE_ENV).is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
        };

        Ok(Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            api_token,
            insecure,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_environment_fallback() {
        let config = ProviderConfig::resolve(
            &ProviderBlock::default(),
            env(&[
                (SERVER_URL_ENV, "https://netbox.example.com/"),
                (API_TOKEN_ENV, "abc123"),
                (INSECURE_ENV, "TRUE"),
            ]),
        )
        .unwrap();
        assert_eq!(config.server_url, "https://netbox.example.com");
        assert_eq!(config.api_token, "abc123");
        assert!(config.insecure);
    }

    #[test]
    fn test_block_values_win() {
        let block = ProviderBlock {
            server_url: Value::known("http://localhost:8000"),
            api_token: Value::known("from-block"),
            insecure: Value::Known(false),
        };
        let config = ProviderConfig::resolve(
            &block,
            env(&[(API_TOKEN_ENV, "from-env"), (INSECURE_ENV, "true")]),
        )
        .unwrap();
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.api_token, "from-block");
        assert!(!config.insecure);
    }

    #[test]
    fn test_block_decodes_from_configure_request() {
        let block: ProviderBlock = serde_json::from_value(serde_json::json!({
            "server_url": "https://netbox.example.com",
            "api_token": {"$unknown": true},
        }))
        .unwrap();
        assert_eq!(block.server_url, Value::known("https://netbox.example.com"));
        assert!(block.api_token.is_unknown());
        assert!(block.insecure.is_null());

        let config = ProviderConfig::resolve(&block, env(&[(API_TOKEN_ENV, "from-env")])).unwrap();
        assert_eq!(config.api_token, "from-env");
    }

    #[test]
    fn test_missing_token_names_env_var() {
        let err = ProviderConfig::resolve(
            &ProviderBlock::default(),
            env(&[(SERVER_URL_ENV, "https://netbox.example.com")]),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidConfig(_)));
        assert!(err.to_string().contains("api_token"));
        assert!(err.to_string().contains(API_TOKEN_ENV));
    }

    #[test]
    fn test_url_without_scheme_is_rejected() {
        let err = ProviderConfig::resolve(
            &ProviderBlock::default(),
            env(&[(SERVER_URL_ENV, "netbox.example.com"), (API_TOKEN_ENV, "t")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ProviderConfig {
            server_url: "https://netbox.example.com".to_string(),
            api_token: "supersecret".to_string(),
            insecure: false,
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("supersecret"));
        assert!(rendered.contains("<redacted>"));
    }
}
