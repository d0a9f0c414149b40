//! Playlist filtering
//!
//! Turns the full catalog into the playlist being navigated, by search text
//! and by category tab. Pure list transforms: the catalog is never modified and
//! every call builds a fresh `Playlist`.

use crate::error::{CoreError, Result};
use crate::types::{Playlist, Track};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Category tab shown above the track list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    /// Everything in the catalog
    #[default]
    ForYou,

    /// Tracks flagged `top_track`, or everything when none are flagged
    TopTracks,
}

impl Tab {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForYou => "for-you",
            Self::TopTracks => "top-tracks",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "for-you" => Ok(Self::ForYou),
            "top-tracks" => Ok(Self::TopTracks),
            other => Err(CoreError::UnknownTab(other.to_string())),
        }
    }
}

/// Search text and tab, applied together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistFilter {
    pub query: String,
    pub tab: Tab,
}

impl PlaylistFilter {
    pub fn new(query: impl Into<String>, tab: Tab) -> Self {
        Self {
            query: query.into(),
            tab,
        }
    }

    /// Build the playlist for this filter from the full catalog
    pub fn apply(&self, catalog: &[Track]) -> Playlist {
        let needle = self.query.trim().to_lowercase();

        let matches: Vec<&Track> = catalog
            .iter()
            .filter(|track| needle.is_empty() || matches_query(track, &needle))
            .collect();

        let selected = match self.tab {
            Tab::ForYou => matches,
            Tab::TopTracks => {
                let top: Vec<&Track> = matches
                    .iter()
                    .copied()
                    .filter(|track| track.attributes().is_top_track())
                    .collect();
                if top.is_empty() {
                    matches
                } else {
                    top
                }
            }
        };

        debug!(
            query = %self.query,
            tab = %self.tab,
            catalog = catalog.len(),
            kept = selected.len(),
            "Applied playlist filter"
        );

        selected.into_iter().cloned().collect()
    }
}

fn matches_query(track: &Track, needle: &str) -> bool {
    track.title().to_lowercase().contains(needle) || track.artist().to_lowercase().contains(needle)
}
