//! Tracker configuration: one serde document for the API, cache and
//! refresh settings, with environment overrides for deployment secrets.

use crate::cache::CacheConfig;
use crate::error::TrackerError;
use crate::network::{
    DEFAULT_API_URL, DEFAULT_PER_PAGE, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_VS_CURRENCY,
};
use crate::refresh::RefreshConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Overrides `api.base_url`.
pub const ENV_API_URL: &str = "COINTRACK_API_URL";
/// Overrides `api.api_key`.
pub const ENV_API_KEY: &str = "COINTRACK_API_KEY";
/// Overrides `api.vs_currency`.
pub const ENV_VS_CURRENCY: &str = "COINTRACK_VS_CURRENCY";

/// Upper bound the upstream accepts for `per_page`.
const MAX_PER_PAGE: u32 = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub vs_currency: String,
    pub per_page: u32,
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            per_page: DEFAULT_PER_PAGE,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Full configuration. Every field is optional in the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub refresh: RefreshConfig,
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `COINTRACK_*` environment variables on top of this config.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Blank values are ignored.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = get(ENV_API_URL) {
            self.api.base_url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.api.api_key = Some(key);
        }
        if let Some(vs) = get(ENV_VS_CURRENCY) {
            self.api.vs_currency = vs.to_lowercase();
        }
        self
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.api.base_url.trim().is_empty() {
            return Err(TrackerError::Validation("api.base_url is empty".into()));
        }
        if self.api.vs_currency.trim().is_empty() {
            return Err(TrackerError::Validation("api.vs_currency is empty".into()));
        }
        if self.api.per_page == 0 || self.api.per_page > MAX_PER_PAGE {
            return Err(TrackerError::Validation(format!(
                "api.per_page must be in 1..={}, got {}",
                MAX_PER_PAGE, self.api.per_page
            )));
        }
        if self.api.request_timeout_ms == 0 {
            return Err(TrackerError::Validation(
                "api.request_timeout_ms must be positive".into(),
            ));
        }
        if self.cache.max_entries == Some(0) {
            return Err(TrackerError::Validation(
                "cache.max_entries must be positive when set".into(),
            ));
        }
        self.refresh.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_json_is_default() {
        let config = TrackerConfig::from_json("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.api.per_page, 50);
        assert_eq!(config.cache.ttl_ms, 30_000);
        assert_eq!(config.refresh.coins_interval_ms, 30_000);
        assert_eq!(config.refresh.market_interval_ms, 60_000);
    }

    #[test]
    fn test_partial_json() {
        let config = TrackerConfig::from_json(
            r#"{"api": {"vs_currency": "eur", "per_page": 100}, "cache": {"ttl_ms": 5000}}"#,
        )
        .unwrap();
        assert_eq!(config.api.vs_currency, "eur");
        assert_eq!(config.api.per_page, 100);
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.cache.ttl_ms, 5000);
        assert_eq!(config.api.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            TrackerConfig::from_json(r#"{"api": {"per_page": 0}}"#),
            Err(TrackerError::Validation(_))
        ));
        assert!(matches!(
            TrackerConfig::from_json(r#"{"refresh": {"coins_interval_ms": 0}}"#),
            Err(TrackerError::Validation(_))
        ));
        assert!(matches!(
            TrackerConfig::from_json("not json"),
            Err(TrackerError::Serde(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "https://pro-api.example.com/api/v3"),
            (ENV_API_KEY, "demo-key"),
            (ENV_VS_CURRENCY, "EUR"),
        ]
        .into_iter()
        .collect();
        let config = TrackerConfig::default()
            .with_overrides_from(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api.base_url, "https://pro-api.example.com/api/v3");
        assert_eq!(config.api.api_key.as_deref(), Some("demo-key"));
        assert_eq!(config.api.vs_currency, "eur");
    }

    #[test]
    fn test_blank_override_ignored() {
        let config = TrackerConfig::default().with_overrides_from(|_| Some("  ".to_string()));
        assert_eq!(config, TrackerConfig::default());
    }
}
