//! Catalog client configuration.

use cadence_core::DEFAULT_ASSET_BASE_URL;
use serde::{Deserialize, Serialize};

/// Default catalog endpoint
pub const DEFAULT_API_URL: &str = "https://cms.samespace.com/items/songs";

/// Where the catalog lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Endpoint returning the `{ "data": [...] }` envelope
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Host serving cover assets under `/assets/{id}`
    #[serde(default = "default_asset_base_url")]
    pub asset_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_asset_base_url() -> String {
    DEFAULT_ASSET_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl CatalogConfig {
    /// Config for a custom endpoint, other settings default.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Resolve cover assets against `url`.
    pub fn with_asset_base_url(mut self, url: impl Into<String>) -> Self {
        self.asset_base_url = url.into();
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            asset_base_url: default_asset_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_catalog() {
        let config = CatalogConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.asset_base_url, DEFAULT_ASSET_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: CatalogConfig =
            serde_json::from_str(r#"{"api_url": "http://localhost:9000/songs"}"#).unwrap();
        assert_eq!(config.api_url, "http://localhost:9000/songs");
        assert_eq!(config.timeout_secs, 30);
    }
}
