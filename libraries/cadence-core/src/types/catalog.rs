/// Raw catalog records and their normalization into tracks
use crate::error::Result;
use crate::types::{Track, TrackAttributes, TrackId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Host serving cover art assets for the default catalog
pub const DEFAULT_ASSET_BASE_URL: &str = "https://cms.samespace.com";

/// One record as served by the catalog API
///
/// Fields the player does not model (such as `top_track`) are collected in
/// `extra` and end up in the track's attribute bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: TrackId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub artist: String,

    /// Cover asset identifier, resolved against the asset host
    #[serde(default)]
    pub cover: Option<String>,

    #[serde(default)]
    pub accent: Option<String>,

    /// Stream URL; records without one are kept but are not loadable
    #[serde(default)]
    pub url: Option<String>,

    /// Duration in seconds. The API does not serve this yet.
    #[serde(default)]
    pub duration: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CatalogRecord {
    /// Normalize into an immutable `Track`
    pub fn into_track(self, asset_base_url: &str) -> Track {
        let stream_url = self.url.unwrap_or_default();
        if stream_url.trim().is_empty() {
            debug!(track_id = %self.id, "Catalog record has no stream URL");
        }

        let mut track = Track::new(self.id, self.name, self.artist, stream_url)
            .with_attributes(self.extra.into_iter().collect::<TrackAttributes>());

        if let Some(cover) = self.cover.filter(|c| !c.trim().is_empty()) {
            track = track.with_cover_art_url(cover_art_url(asset_base_url, &cover));
        }
        if let Some(accent) = self.accent.filter(|a| !a.trim().is_empty()) {
            track = track.with_accent_color(accent);
        }
        if let Some(secs) = self.duration.filter(|s| s.is_finite() && *s > 0.0) {
            track = track.with_duration(Duration::from_secs_f64(secs));
        }

        track
    }
}

/// Build the URL of a cover asset
pub fn cover_art_url(asset_base_url: &str, cover: &str) -> String {
    format!("{}/assets/{}", asset_base_url.trim_end_matches('/'), cover)
}

/// Response envelope of the catalog endpoint: `{ "data": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEnvelope {
    #[serde(default)]
    pub data: Vec<CatalogRecord>,
}

impl CatalogEnvelope {
    /// Parse an envelope from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Normalize every record into a track, keeping catalog order
    pub fn into_tracks(self, asset_base_url: &str) -> Vec<Track> {
        self.data
            .into_iter()
            .map(|record| record.into_track(asset_base_url))
            .collect()
    }
}
