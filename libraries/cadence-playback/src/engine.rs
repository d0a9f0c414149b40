//! Playback engine - owns the audio device
//!
//! Translates imperative controls into device calls and folds the device's
//! asynchronous notifications into a [`PlaybackStatus`] snapshot. Every load
//! gets a fresh [`Generation`]; notifications from older loads are dropped.

use crate::{
    device::{AudioDevice, DeviceEvent, Generation, TaggedEvent},
    events::PlaybackEvent,
    status::PlaybackStatus,
};
use tracing::{debug, trace, warn};

/// Single-source playback engine
pub struct PlaybackEngine<D: AudioDevice> {
    device: D,
    generation: Generation,
    loaded: bool,
    status: PlaybackStatus,
    pending_events: Vec<PlaybackEvent>,
}

impl<D: AudioDevice> PlaybackEngine<D> {
    /// Create an engine around `device` with an initial volume
    pub fn new(mut device: D, volume: f32) -> Self {
        device.set_volume(volume);
        Self {
            device,
            generation: Generation::INITIAL,
            loaded: false,
            status: PlaybackStatus::new(volume),
            pending_events: Vec::new(),
        }
    }

    /// Replace the current source
    ///
    /// Failures are logged and reported as `None`, never as an error: an
    /// empty URL leaves the engine untouched, an unavailable resource leaves
    /// it empty. A rejected autoplay attempt keeps the source loaded and
    /// paused.
    pub fn load(&mut self, stream_url: &str, autoplay: bool) -> Option<Generation> {
        if stream_url.trim().is_empty() {
            warn!("Ignoring load without a stream URL");
            return None;
        }

        let generation = self.generation.next();
        self.generation = generation;
        self.status.reset_source();

        if let Err(e) = self.device.set_source(stream_url, generation) {
            warn!(url = stream_url, %generation, error = %e, "Stream unavailable");
            self.device.clear_source();
            self.loaded = false;
            self.emit_status_changed();
            return None;
        }

        self.loaded = true;
        debug!(url = stream_url, %generation, autoplay, "Source loaded");
        self.emit_status_changed();

        if autoplay {
            self.request_play();
        }

        Some(generation)
    }

    /// Start playback; no-op when nothing is loaded or already playing
    ///
    /// Returns `false` when there is nothing to play or the device refused
    /// the request outright.
    pub fn play(&mut self) -> bool {
        if !self.loaded {
            debug!("Play ignored, no source loaded");
            return false;
        }
        if self.status.is_playing {
            return true;
        }
        self.request_play()
    }

    /// Pause playback; no-op when nothing is loaded
    pub fn pause(&mut self) {
        if !self.loaded {
            debug!("Pause ignored, no source loaded");
            return;
        }
        self.device.pause();
    }

    /// Seek to `position` seconds
    ///
    /// Values outside the track are passed through, the device clamps them.
    pub fn seek(&mut self, position: f64) {
        if !self.loaded {
            debug!(position, "Seek ignored, no source loaded");
            return;
        }
        if !position.is_finite() {
            debug!(position, "Seek ignored, position is not a number of seconds");
            return;
        }
        if let Some(duration) = self.status.duration {
            if !(0.0..=duration).contains(&position) {
                debug!(position, duration, "Seek outside track, device clamps");
            }
        }
        self.device.seek(position);
    }

    /// Set output volume; callers keep `level` within 0.0 - 1.0
    pub fn set_volume(&mut self, level: f32) {
        self.device.set_volume(level);
        self.status.volume = level;
        self.emit_status_changed();
    }

    /// Pause and drop the current source
    pub fn eject(&mut self) {
        self.generation = self.generation.next();
        if self.loaded {
            self.device.pause();
        }
        self.device.clear_source();
        self.loaded = false;
        self.status.reset_source();
        debug!(generation = %self.generation, "Source ejected");
        self.emit_status_changed();
    }

    /// Apply a device notification
    ///
    /// Returns the event when it belongs to the current load, `None` when it
    /// was discarded as stale.
    pub fn handle(&mut self, tagged: TaggedEvent) -> Option<DeviceEvent> {
        let TaggedEvent { generation, event } = tagged;

        if generation != self.generation || !self.loaded {
            trace!(
                event_generation = %generation,
                current_generation = %self.generation,
                ?event,
                "Discarding stale device event"
            );
            return None;
        }

        match &event {
            DeviceEvent::Playing => self.status.is_playing = true,
            DeviceEvent::Paused => self.status.is_playing = false,
            DeviceEvent::TimeUpdate { position } => {
                if position.is_finite() {
                    self.status.current_time = position.max(0.0);
                }
            }
            DeviceEvent::DurationKnown { duration } => {
                // Live streams report an infinite length
                if duration.is_finite() && *duration > 0.0 {
                    self.status.duration = Some(*duration);
                }
            }
            DeviceEvent::Ended => self.status.is_playing = false,
            DeviceEvent::PlayRejected { reason } => {
                debug!(%generation, reason = reason.as_str(), "Play request rejected");
                self.status.is_playing = false;
            }
            DeviceEvent::Failed { reason } => {
                warn!(%generation, reason = reason.as_str(), "Playback failed");
                self.status.is_playing = false;
            }
        }

        self.emit_status_changed();
        if event == DeviceEvent::Ended {
            self.pending_events.push(PlaybackEvent::TrackEnded {
                track_id: None,
                generation,
            });
        }

        Some(event)
    }

    /// Current status snapshot
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Generation of the current (or last ejected) load
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether a source is loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Take pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn request_play(&mut self) -> bool {
        match self.device.request_play() {
            Ok(()) => true,
            Err(e) => {
                // Autoplay policies land here; the track stays paused
                debug!(generation = %self.generation, reason = %e, "Play request rejected");
                false
            }
        }
    }

    fn emit_status_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::StatusChanged {
            status: self.status,
            generation: self.generation,
        });
    }
}

impl<D: AudioDevice> Drop for PlaybackEngine<D> {
    fn drop(&mut self) {
        if self.loaded {
            self.device.pause();
        }
        self.device.clear_source();
    }
}
