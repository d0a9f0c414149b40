/// Playlist domain type
use crate::types::{Track, TrackId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Ordered, filtered view of tracks being navigated
///
/// A playlist is never edited in place. Every filter change builds a new one,
/// and clones share the same immutable storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    tracks: Arc<[Track]>,
}

impl Default for Playlist {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Playlist {
    /// Create a playlist from an ordered list of tracks
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks: tracks.into(),
        }
    }

    /// Create an empty playlist
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Position of the track with `id`, by identity
    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| track.id() == id)
    }

    /// Whether a track with `id` is part of this playlist
    pub fn contains(&self, id: &TrackId) -> bool {
        self.position(id).is_some()
    }

    /// Iterate over tracks in order
    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Borrow the tracks as a slice
    pub fn as_slice(&self) -> &[Track] {
        &self.tracks
    }
}

impl From<Vec<Track>> for Playlist {
    fn from(tracks: Vec<Track>) -> Self {
        Self::new(tracks)
    }
}

impl FromIterator<Track> for Playlist {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Playlist {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.tracks.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Playlist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<Track>::deserialize(deserializer).map(Self::new)
    }
}
