//! Playback coordinator
//!
//! The only component that talks to both the [`PlaylistCursor`] and the
//! [`PlaybackEngine`]. It owns the active selection and keeps the engine's
//! loaded source in step with it: either the engine plays the selected
//! track's stream, or nothing is loaded.

use crate::{
    config::PlaybackConfig,
    cursor::{Direction, PlaylistCursor},
    device::{AudioDevice, DeviceEvent, DeviceInbox, Generation, TaggedEvent},
    engine::PlaybackEngine,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    status::PlaybackStatus,
};
use cadence_core::{Playlist, Track, TrackId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Coordinator state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoordinatorState {
    /// No selection, or nothing loaded
    #[default]
    Idle,
    /// Selection loaded, waiting for the device to start
    Loading,
    Playing,
    Paused,
}

/// Owns the active selection and drives the engine
pub struct PlaybackCoordinator<D: AudioDevice> {
    engine: PlaybackEngine<D>,
    cursor: PlaylistCursor,
    active: Option<Track>,
    state: CoordinatorState,
    config: PlaybackConfig,
    pending_events: Vec<PlaybackEvent>,
}

impl<D: AudioDevice> PlaybackCoordinator<D> {
    pub fn new(device: D, config: PlaybackConfig) -> Self {
        Self {
            engine: PlaybackEngine::new(device, config.volume),
            cursor: PlaylistCursor::default(),
            active: None,
            state: CoordinatorState::Idle,
            config,
            pending_events: Vec::new(),
        }
    }

    // ===== Playlist =====

    /// Replace the navigable playlist
    ///
    /// The active selection survives even when the new playlist no longer
    /// contains it. With nothing selected yet, the first track is cued when
    /// the configuration asks for it.
    pub fn set_playlist(&mut self, playlist: Playlist) {
        let length = playlist.len();
        self.cursor.replace(playlist);
        debug!(length, "Playlist replaced");
        self.emit(PlaybackEvent::PlaylistChanged { length });

        if self.active.is_none() && self.config.cue_first_track && length > 0 {
            if let Err(e) = self.load_index(0, false) {
                debug!(error = %e, "Could not cue the first track");
            }
        }
    }

    // ===== Selection =====

    /// Select the track at `index` and start it
    pub fn select_by_index(&mut self, index: usize) -> Result<()> {
        self.load_index(index, true)
    }

    /// Move to the neighbouring track and start it
    pub fn advance(&mut self, direction: Direction) -> Result<()> {
        let from = self.active_track_id().cloned();
        let Some(index) = self.cursor.step(direction, from.as_ref()) else {
            debug!(?direction, "Nothing to advance to, playlist is empty");
            return Err(PlaybackError::PlaylistEmpty);
        };
        self.load_index(index, true)
    }

    pub fn next(&mut self) -> Result<()> {
        self.advance(Direction::Next)
    }

    pub fn previous(&mut self) -> Result<()> {
        self.advance(Direction::Previous)
    }

    /// The loaded track played to its end
    ///
    /// Always advances to the next track. An empty playlist leaves nothing
    /// to advance to, so the engine is emptied and the coordinator idles.
    pub fn on_engine_ended(&mut self) {
        if self.cursor.is_empty() {
            debug!("Track ended with an empty playlist");
            self.engine.eject();
            self.state = CoordinatorState::Idle;
            self.collect_engine_events();
            return;
        }

        if let Err(e) = self.advance(Direction::Next) {
            debug!(error = %e, "Auto-advance skipped");
        }
    }

    // ===== Transport =====

    /// Pause when playing, play otherwise
    pub fn toggle_play_pause(&mut self) {
        if self.engine.status().is_playing {
            self.engine.pause();
        } else if !self.engine.play() && self.state == CoordinatorState::Loading {
            self.state = CoordinatorState::Paused;
        }
        self.collect_engine_events();
    }

    pub fn seek(&mut self, position: f64) {
        self.engine.seek(position);
        self.collect_engine_events();
    }

    pub fn set_volume(&mut self, level: f32) {
        self.engine.set_volume(level);
        self.collect_engine_events();
    }

    /// Mute when audible, otherwise restore full volume
    pub fn toggle_mute(&mut self) {
        let level = if self.engine.status().volume > 0.0 {
            0.0
        } else {
            1.0
        };
        self.set_volume(level);
    }

    // ===== Device events =====

    /// Feed one device notification through the engine
    pub fn handle_device_event(&mut self, tagged: TaggedEvent) {
        let Some(event) = self.engine.handle(tagged) else {
            return;
        };

        match event {
            DeviceEvent::Playing => self.state = CoordinatorState::Playing,
            DeviceEvent::Paused | DeviceEvent::PlayRejected { .. } => {
                self.state = CoordinatorState::Paused;
            }
            DeviceEvent::Failed { reason } => {
                self.state = CoordinatorState::Paused;
                if let Some(track_id) = self.active_track_id().cloned() {
                    self.emit(PlaybackEvent::LoadFailed { track_id, reason });
                }
            }
            DeviceEvent::Ended => {
                self.collect_engine_events();
                self.on_engine_ended();
            }
            DeviceEvent::TimeUpdate { .. } | DeviceEvent::DurationKnown { .. } => {}
        }

        self.collect_engine_events();
    }

    /// Handle every queued notification, returns how many were taken
    pub fn pump(&mut self, inbox: &DeviceInbox) -> usize {
        let mut handled = 0;
        while let Some(tagged) = inbox.pop() {
            self.handle_device_event(tagged);
            handled += 1;
        }
        handled
    }

    /// Empty the engine and forget the selection
    pub fn shutdown(&mut self) {
        self.engine.eject();
        self.state = CoordinatorState::Idle;
        if self.active.take().is_some() {
            info!("Selection cleared");
            self.emit(PlaybackEvent::SelectionCleared);
        }
        self.collect_engine_events();
    }

    // ===== Queries =====

    pub fn status(&self) -> PlaybackStatus {
        self.engine.status()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Generation of the engine's current load
    pub fn generation(&self) -> Generation {
        self.engine.generation()
    }

    pub fn active_track(&self) -> Option<&Track> {
        self.active.as_ref()
    }

    pub fn active_track_id(&self) -> Option<&TrackId> {
        self.active.as_ref().map(Track::id)
    }

    /// Position of the active selection in the current playlist
    pub fn active_index(&self) -> Option<usize> {
        self.active_track_id()
            .and_then(|id| self.cursor.index_of(id))
    }

    pub fn playlist(&self) -> &Playlist {
        self.cursor.playlist()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Take pending events in the order they happened
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.collect_engine_events();
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn load_index(&mut self, index: usize, autoplay: bool) -> Result<()> {
        let len = self.cursor.len();
        let Some(track) = self.cursor.get(index).cloned() else {
            warn!(index, len, "Ignoring selection outside the playlist");
            return Err(PlaybackError::IndexOutOfBounds { index, len });
        };

        let track_id = track.id().clone();
        let previous_track_id = self.active.replace(track).map(|t| t.id().clone());
        info!(
            track_id = %track_id,
            index,
            autoplay,
            "Track selected"
        );
        self.emit(PlaybackEvent::TrackChanged {
            track_id: track_id.clone(),
            previous_track_id,
        });

        let stream_url = self
            .active
            .as_ref()
            .map(|t| t.stream_url().to_string())
            .unwrap_or_default();

        if self.engine.load(&stream_url, false).is_some() {
            // A device may refuse playback before reporting anything
            self.state = if autoplay && self.engine.play() {
                CoordinatorState::Loading
            } else {
                CoordinatorState::Paused
            };
        } else {
            // The engine must not keep playing the previous selection
            if self.engine.is_loaded() {
                self.engine.eject();
            }
            self.state = CoordinatorState::Paused;
            let reason = if stream_url.trim().is_empty() {
                "track has no stream URL"
            } else {
                "stream unavailable"
            };
            self.emit(PlaybackEvent::LoadFailed {
                track_id,
                reason: reason.to_string(),
            });
        }

        self.collect_engine_events();
        Ok(())
    }

    fn emit(&mut self, event: PlaybackEvent) {
        // Keep engine events that happened first ahead of this one
        self.collect_engine_events();
        self.pending_events.push(event);
    }

    fn collect_engine_events(&mut self) {
        for event in self.engine.drain_events() {
            let event = match event {
                PlaybackEvent::TrackEnded {
                    track_id: None,
                    generation,
                } => PlaybackEvent::TrackEnded {
                    track_id: self.active_track_id().cloned(),
                    generation,
                },
                other => other,
            };
            self.pending_events.push(event);
        }
    }
}
