//! Cadence - Playback Coordination
//!
//! Platform-agnostic playback state machine and playlist navigation for the
//! Cadence player.
//!
//! This crate provides:
//! - A playback engine owning one audio device and a status snapshot
//! - Generation-tagged device events, so stale results of a superseded load
//!   are dropped instead of overwriting newer state
//! - Wraparound playlist navigation resolved by track identity
//! - A coordinator that keeps the loaded source in step with the selection
//!   and advances automatically when a track ends
//!
//! # Architecture
//!
//! Audio output is provided via the [`AudioDevice`] trait. The browser
//! binding (`wasm` feature) implements it over an `HTMLAudioElement`; tests
//! and the command line tool use simulated devices. Devices report back
//! through a [`DeviceInbox`] that the host pumps into the coordinator.
//!
//! Everything here is single-threaded and event-driven.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Playlist, Track};
//! use cadence_playback::{
//!     AudioDevice, CoordinatorState, DeviceEvent, DeviceInbox, Generation,
//!     PlaybackConfig, PlaybackCoordinator, Result,
//! };
//!
//! // A device that starts instantly
//! struct InstantDevice {
//!     inbox: DeviceInbox,
//!     generation: Generation,
//! }
//!
//! impl AudioDevice for InstantDevice {
//!     fn set_source(&mut self, _url: &str, generation: Generation) -> Result<()> {
//!         self.generation = generation;
//!         Ok(())
//!     }
//!     fn clear_source(&mut self) {}
//!     fn request_play(&mut self) -> Result<()> {
//!         self.inbox.push(self.generation, DeviceEvent::Playing);
//!         Ok(())
//!     }
//!     fn pause(&mut self) {
//!         self.inbox.push(self.generation, DeviceEvent::Paused);
//!     }
//!     fn seek(&mut self, _position: f64) {}
//!     fn set_volume(&mut self, _level: f32) {}
//! }
//!
//! let inbox = DeviceInbox::new();
//! let device = InstantDevice { inbox: inbox.clone(), generation: Generation::INITIAL };
//! let mut player = PlaybackCoordinator::new(device, PlaybackConfig::default());
//!
//! player.set_playlist(Playlist::new(vec![
//!     Track::new("1", "Intro", "Band", "https://cdn.example.com/1.mp3"),
//!     Track::new("2", "Outro", "Band", "https://cdn.example.com/2.mp3"),
//! ]));
//! player.select_by_index(1)?;
//! player.pump(&inbox);
//!
//! assert_eq!(player.state(), CoordinatorState::Playing);
//! assert!(player.status().is_playing);
//!
//! player.next()?; // wraps to the first track
//! assert_eq!(player.active_index(), Some(0));
//! # Ok::<(), cadence_playback::PlaybackError>(())
//! ```

mod config;
mod coordinator;
mod cursor;
mod device;
mod engine;
mod error;
mod events;
mod status;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use config::PlaybackConfig;
pub use coordinator::{CoordinatorState, PlaybackCoordinator};
pub use cursor::{Direction, PlaylistCursor};
pub use device::{AudioDevice, DeviceEvent, DeviceInbox, Generation, TaggedEvent};
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use status::PlaybackStatus;
