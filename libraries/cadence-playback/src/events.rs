//! Events reported to the rendering layer

use crate::device::Generation;
use crate::status::PlaybackStatus;
use cadence_core::TrackId;
use serde::{Deserialize, Serialize};

/// Event drained from the engine or coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// The status snapshot changed
    #[serde(rename_all = "camelCase")]
    StatusChanged {
        status: PlaybackStatus,
        generation: Generation,
    },

    /// A different track became the active selection
    #[serde(rename_all = "camelCase")]
    TrackChanged {
        track_id: TrackId,
        previous_track_id: Option<TrackId>,
    },

    /// The loaded source played to its end
    ///
    /// The engine does not know about tracks and leaves `track_id` empty;
    /// the coordinator fills it in.
    #[serde(rename_all = "camelCase")]
    TrackEnded {
        track_id: Option<TrackId>,
        generation: Generation,
    },

    /// The selected track could not be loaded or played
    #[serde(rename_all = "camelCase")]
    LoadFailed { track_id: TrackId, reason: String },

    /// The navigable playlist was replaced
    PlaylistChanged { length: usize },

    /// Nothing is selected anymore
    SelectionCleared,
}

impl PlaybackEvent {
    /// Status carried by the event, if any
    pub fn status(&self) -> Option<&PlaybackStatus> {
        match self {
            Self::StatusChanged { status, .. } => Some(status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_changed_json_shape() {
        let event = PlaybackEvent::TrackChanged {
            track_id: TrackId::from(2u64),
            previous_track_id: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "trackChanged");
        assert_eq!(json["trackId"], "2");
        assert!(json["previousTrackId"].is_null());
    }

    #[test]
    fn status_accessor() {
        let event = PlaybackEvent::StatusChanged {
            status: PlaybackStatus::default(),
            generation: Generation::INITIAL,
        };
        assert!(event.status().is_some());
        assert!(PlaybackEvent::SelectionCleared.status().is_none());
    }
}
