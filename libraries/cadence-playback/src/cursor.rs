//! Playlist navigation
//!
//! Pure lookups against the current [`Playlist`]. Positions are always
//! resolved by track identity, never cached.

use cadence_core::{Playlist, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Next,
    Previous,
}

/// Answers "where is X" and "what comes next/previous"
#[derive(Debug, Clone, Default)]
pub struct PlaylistCursor {
    playlist: Playlist,
}

impl PlaylistCursor {
    pub fn new(playlist: Playlist) -> Self {
        Self { playlist }
    }

    /// Position of `id` in the current playlist
    pub fn index_of(&self, id: &TrackId) -> Option<usize> {
        self.playlist.position(id)
    }

    /// Index after `from`, wrapping around
    ///
    /// A missing or unknown `from` counts as "before the first track", so
    /// the first track comes next.
    pub fn next(&self, from: Option<&TrackId>) -> Option<usize> {
        let len = self.playlist.len();
        if len == 0 {
            return None;
        }
        Some(match self.current(from) {
            Some(index) => (index + 1) % len,
            None => 0,
        })
    }

    /// Index before `from`, wrapping around
    ///
    /// A missing or unknown `from` resolves to the last track.
    pub fn previous(&self, from: Option<&TrackId>) -> Option<usize> {
        let len = self.playlist.len();
        if len == 0 {
            return None;
        }
        Some(match self.current(from) {
            Some(index) => (index + len - 1) % len,
            None => len - 1,
        })
    }

    pub fn step(&self, direction: Direction, from: Option<&TrackId>) -> Option<usize> {
        match direction {
            Direction::Next => self.next(from),
            Direction::Previous => self.previous(from),
        }
    }

    /// Swap in a new playlist
    pub fn replace(&mut self, playlist: Playlist) {
        self.playlist = playlist;
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.playlist.get(index)
    }

    pub fn len(&self) -> usize {
        self.playlist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    fn current(&self, from: Option<&TrackId>) -> Option<usize> {
        from.and_then(|id| self.index_of(id))
    }
}
