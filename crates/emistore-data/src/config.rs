//! Catalog client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "EMISTORE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "EMISTORE_TIMEOUT_SECS";

/// Invalid catalog configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid timeout {value:?}: expected a positive number of seconds")]
    InvalidTimeout { value: String },

    #[error("Invalid catalog URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Where and how to reach the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("emistore/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Defaults overridden by `EMISTORE_API_URL` and `EMISTORE_TIMEOUT_SECS`, validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides on top of `self`.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Only the override values themselves are checked; call [`validate`](Self::validate)
    /// before using the result.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_timeout(&value)?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: reason.to_string(),
        };
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                value: self.timeout_secs.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_timeout(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| ConfigError::InvalidTimeout {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.user_agent.starts_with("emistore/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_applied() {
        let config = CatalogConfig::default()
            .with_overrides(vars(&[
                (ENV_API_URL, "https://shop.example.com/api"),
                (ENV_TIMEOUT_SECS, "3"),
            ]))
            .unwrap();
        assert_eq!(config.base_url, "https://shop.example.com/api");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_bad_timeout_is_an_error() {
        let err = CatalogConfig::default()
            .with_overrides(vars(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTimeout { value: "soon".into() });

        let zero = CatalogConfig::default().with_overrides(vars(&[(ENV_TIMEOUT_SECS, "0")]));
        assert!(zero.is_err());
    }

    #[test]
    fn test_overrides_leave_file_values_unvalidated() {
        let config = CatalogConfig::new("nope")
            .with_timeout_secs(0)
            .with_overrides(vars(&[]))
            .unwrap();
        assert_eq!(config.base_url, "nope");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        let fixed = config
            .with_overrides(vars(&[(ENV_API_URL, "http://127.0.0.1:9000/api")]))
            .unwrap();
        assert_eq!(
            fixed.validate(),
            Err(ConfigError::InvalidTimeout { value: "0".into() })
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(CatalogConfig::new("not a url").validate().is_err());
        assert!(CatalogConfig::new("ftp://example.com").validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: CatalogConfig =
            serde_json::from_str(r#"{"base_url": "http://127.0.0.1:8080/api"}"#).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:8080/api");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
