//! Playback configuration

use serde::{Deserialize, Serialize};

/// Configuration for the playback coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0.0 - 1.0, default: 1.0)
    pub volume: f32,

    /// Cue the first track (loaded, not playing) when the first playlist
    /// arrives and nothing is selected yet (default: true)
    pub cue_first_track: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            cue_first_track: true,
        }
    }
}
