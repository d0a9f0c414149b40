//! Playback status snapshot

use serde::{Deserialize, Serialize};

/// Read-only view of the engine's state, re-rendered on every status event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatus {
    /// Whether the device confirmed playback
    pub is_playing: bool,

    /// Position in seconds
    #[serde(rename = "currentTimeSeconds")]
    pub current_time: f64,

    /// Length in seconds, once the device reports it
    #[serde(rename = "durationSeconds")]
    pub duration: Option<f64>,

    /// Output volume (0.0 - 1.0)
    pub volume: f32,
}

impl PlaybackStatus {
    pub fn new(volume: f32) -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: None,
            volume,
        }
    }

    /// Progress through the track in percent, 0 while the length is unknown
    pub fn progress_percent(&self) -> f64 {
        match self.duration {
            Some(duration) if duration > 0.0 => {
                (self.current_time / duration * 100.0).clamp(0.0, 100.0)
            }
            _ => 0.0,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.volume <= 0.0
    }

    /// Forget everything tied to the previous source, keep the volume
    pub(crate) fn reset_source(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
        self.duration = None;
    }
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self::new(1.0)
    }
}
