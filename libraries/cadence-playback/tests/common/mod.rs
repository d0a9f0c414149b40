//! Shared helpers for playback integration tests

#![allow(dead_code)]

use cadence_core::{Playlist, Track};
use cadence_playback::{
    AudioDevice, DeviceEvent, DeviceInbox, Generation, PlaybackConfig, PlaybackCoordinator,
    PlaybackError, Result,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Everything the mock device was asked to do
#[derive(Debug, Default)]
pub struct DeviceLog {
    pub sources: Vec<(String, Generation)>,
    pub play_requests: usize,
    pub pauses: usize,
    pub clears: usize,
    pub seeks: Vec<f64>,
    pub volumes: Vec<f32>,
}

impl DeviceLog {
    pub fn last_source(&self) -> Option<&str> {
        self.sources.last().map(|(url, _)| url.as_str())
    }
}

/// Mock device that answers like a browser audio element: asynchronously,
/// through the inbox
pub struct MockDevice {
    inbox: DeviceInbox,
    log: Rc<RefCell<DeviceLog>>,
    generation: Generation,
    loaded: bool,
    playing: bool,
    autoplay_allowed: bool,
    play_throws: bool,
    unavailable: Vec<String>,
}

impl MockDevice {
    pub fn new(inbox: DeviceInbox) -> (Self, Rc<RefCell<DeviceLog>>) {
        let log = Rc::new(RefCell::new(DeviceLog::default()));
        (
            Self {
                inbox,
                log: log.clone(),
                generation: Generation::INITIAL,
                loaded: false,
                playing: false,
                autoplay_allowed: true,
                play_throws: false,
                unavailable: Vec::new(),
            },
            log,
        )
    }

    /// Refuse every play request the way an autoplay policy does
    pub fn rejecting_play(mut self) -> Self {
        self.autoplay_allowed = false;
        self
    }

    /// Fail every play request on the spot, without reporting through the inbox
    pub fn throwing_play(mut self) -> Self {
        self.play_throws = true;
        self
    }

    /// Fail `set_source` for `url`
    pub fn with_unavailable(mut self, url: &str) -> Self {
        self.unavailable.push(url.to_string());
        self
    }
}

impl AudioDevice for MockDevice {
    fn set_source(&mut self, url: &str, generation: Generation) -> Result<()> {
        if self.unavailable.iter().any(|u| u == url) {
            return Err(PlaybackError::Device(format!("{url} unavailable")));
        }
        self.log
            .borrow_mut()
            .sources
            .push((url.to_string(), generation));
        self.generation = generation;
        self.loaded = true;
        self.playing = false;
        Ok(())
    }

    fn clear_source(&mut self) {
        self.log.borrow_mut().clears += 1;
        self.loaded = false;
        self.playing = false;
    }

    fn request_play(&mut self) -> Result<()> {
        self.log.borrow_mut().play_requests += 1;
        if !self.loaded {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if self.play_throws {
            return Err(PlaybackError::Device("NotAllowedError".to_string()));
        }
        if self.autoplay_allowed {
            self.playing = true;
            self.inbox.push(self.generation, DeviceEvent::Playing);
        } else {
            self.inbox.push(
                self.generation,
                DeviceEvent::PlayRejected {
                    reason: "NotAllowedError".to_string(),
                },
            );
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().pauses += 1;
        if self.playing {
            self.playing = false;
            self.inbox.push(self.generation, DeviceEvent::Paused);
        }
    }

    fn seek(&mut self, position: f64) {
        self.log.borrow_mut().seeks.push(position);
    }

    fn set_volume(&mut self, level: f32) {
        self.log.borrow_mut().volumes.push(level);
    }
}

/// Tracks `id` with stream `https://cdn.test/{id}.mp3`
pub fn track(id: u64) -> Track {
    Track::new(
        id,
        format!("Track {id}"),
        format!("Artist {id}"),
        stream_url(id),
    )
}

pub fn stream_url(id: u64) -> String {
    format!("https://cdn.test/{id}.mp3")
}

pub fn playlist(ids: &[u64]) -> Playlist {
    ids.iter().copied().map(track).collect()
}

/// Coordinator over a mock device, without cueing
pub fn coordinator() -> (
    PlaybackCoordinator<MockDevice>,
    DeviceInbox,
    Rc<RefCell<DeviceLog>>,
) {
    let inbox = DeviceInbox::new();
    let (device, log) = MockDevice::new(inbox.clone());
    (with_device(device), inbox, log)
}

pub fn with_device(device: MockDevice) -> PlaybackCoordinator<MockDevice> {
    PlaybackCoordinator::new(
        device,
        PlaybackConfig {
            cue_first_track: false,
            ..PlaybackConfig::default()
        },
    )
}
