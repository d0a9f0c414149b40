/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Attribute key carrying the "top track" flag used by the top-tracks tab
pub const TOP_TRACK_ATTRIBUTE: &str = "top_track";

/// Opaque attribute bag attached to a track
///
/// Only filtering looks inside it. Everything the catalog serves beyond the
/// fields `Track` models ends up here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackAttributes(BTreeMap<String, Value>);

impl TrackAttributes {
    /// Create an empty attribute bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a raw attribute
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the catalog flagged this track as a top track
    ///
    /// Accepts JSON booleans as well as `1`/`0`.
    pub fn is_top_track(&self) -> bool {
        match self.0.get(TOP_TRACK_ATTRIBUTE) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_u64().is_some_and(|n| n != 0),
            _ => false,
        }
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }
}

impl FromIterator<(String, Value)> for TrackAttributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One playable catalog entry
///
/// Tracks are immutable once built: fields are private and only readable
/// through accessors. Identity is the `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    id: TrackId,
    title: String,
    artist: String,
    /// Duration hint in seconds, if the catalog knows it
    #[serde(default, rename = "durationSeconds")]
    duration_secs: Option<f64>,
    #[serde(default)]
    cover_art_url: Option<String>,
    #[serde(default)]
    stream_url: String,
    #[serde(default)]
    accent_color: Option<String>,
    #[serde(default)]
    attributes: TrackAttributes,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        stream_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            duration_secs: None,
            cover_art_url: None,
            stream_url: stream_url.into(),
            accent_color: None,
            attributes: TrackAttributes::new(),
        }
    }

    /// Attach a duration hint
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_secs = Some(duration.as_secs_f64());
        self
    }

    /// Attach a cover art URL
    #[must_use]
    pub fn with_cover_art_url(mut self, url: impl Into<String>) -> Self {
        self.cover_art_url = Some(url.into());
        self
    }

    /// Attach an accent color (CSS color string)
    #[must_use]
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = Some(color.into());
        self
    }

    /// Replace the attribute bag
    #[must_use]
    pub fn with_attributes(mut self, attributes: TrackAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set a single attribute
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key, value);
        self
    }

    pub fn id(&self) -> &TrackId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Duration hint, `None` until something reports it
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(Duration::from_secs_f64)
    }

    pub fn cover_art_url(&self) -> Option<&str> {
        self.cover_art_url.as_deref()
    }

    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }

    pub fn accent_color(&self) -> Option<&str> {
        self.accent_color.as_deref()
    }

    pub fn attributes(&self) -> &TrackAttributes {
        &self.attributes
    }

    /// Whether the track has a stream URL at all
    pub fn is_loadable(&self) -> bool {
        !self.stream_url.trim().is_empty()
    }
}
