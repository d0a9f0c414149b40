//! Catalog HTTP client.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use cadence_core::{CatalogEnvelope, CatalogRecord, Track};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Fetches the track catalog.
///
/// # Example
///
/// ```ignore
/// use cadence_catalog::{CatalogClient, CatalogConfig};
///
/// let client = CatalogClient::new(CatalogConfig::default())?;
/// let tracks = client.fetch_tracks().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    api_url: Url,
    asset_base_url: String,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let api_url = parse_http_url("catalog", &config.api_url)?;
        let asset_base_url = parse_http_url("asset", &config.asset_base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Cadence/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_url,
            asset_base_url: asset_base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Catalog endpoint.
    pub fn api_url(&self) -> &str {
        self.api_url.as_str()
    }

    /// Host cover assets are resolved against.
    pub fn asset_base_url(&self) -> &str {
        &self.asset_base_url
    }

    /// Fetch the raw catalog records.
    pub async fn fetch_records(&self) -> Result<Vec<CatalogRecord>> {
        debug!(url = %self.api_url, "Fetching catalog");

        let response = self
            .http
            .get(self.api_url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    CatalogError::Unreachable(e.to_string())
                } else {
                    CatalogError::Request(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Catalog request failed");
            return Err(CatalogError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let envelope = CatalogEnvelope::from_json(&body)
            .map_err(|e| CatalogError::Parse(format!("Failed to parse catalog envelope: {e}")))?;

        info!(records = envelope.data.len(), "Catalog fetched");
        Ok(envelope.data)
    }

    /// Fetch the catalog normalized into playable tracks, in catalog order.
    pub async fn fetch_tracks(&self) -> Result<Vec<Track>> {
        let records = self.fetch_records().await?;
        let tracks: Vec<Track> = records
            .into_iter()
            .map(|record| record.into_track(&self.asset_base_url))
            .collect();

        let unplayable = tracks.iter().filter(|t| !t.is_loadable()).count();
        if unplayable > 0 {
            debug!(unplayable, "Catalog contains tracks without a stream URL");
        }

        Ok(tracks)
    }
}

fn parse_http_url(kind: &str, raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CatalogError::InvalidUrl(format!("{kind} URL cannot be empty")));
    }

    let url = Url::parse(raw).map_err(|e| CatalogError::InvalidUrl(format!("{kind} URL {raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(CatalogError::InvalidUrl(format!(
            "{kind} URL must use http or https, got {scheme}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_other_schemes() {
        let err = parse_http_url("catalog", "ftp://example.com/songs").unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn parse_trims_whitespace() {
        let url = parse_http_url("catalog", "  https://example.com/songs ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/songs");
    }
}
