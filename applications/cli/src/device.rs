//! Simulated audio device
//!
//! Plays nothing. Time only moves when the [`SimClock`] is advanced, which
//! makes a rehearsal deterministic and lets it run faster than real time.

use cadence_playback::{AudioDevice, DeviceEvent, DeviceInbox, Generation, PlaybackError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

struct SimState {
    inbox: DeviceInbox,
    generation: Generation,
    source: Option<String>,
    length: f64,
    position: f64,
    playing: bool,
    volume: f32,
    default_length: f64,
    lengths: HashMap<String, f64>,
}

impl SimState {
    fn length_of(&self, url: &str) -> f64 {
        self.lengths
            .get(url)
            .copied()
            .unwrap_or(self.default_length)
    }
}

/// Device half, owned by the playback engine
pub struct SimulatedDevice {
    state: Rc<RefCell<SimState>>,
}

/// Clock half, owned by whoever drives the simulation
#[derive(Clone)]
pub struct SimClock {
    state: Rc<RefCell<SimState>>,
}

/// Create a device reporting into `inbox`; every source lasts
/// `default_length` seconds unless listed in `lengths` by stream URL
pub fn simulated(
    inbox: DeviceInbox,
    default_length: f64,
    lengths: HashMap<String, f64>,
) -> (SimulatedDevice, SimClock) {
    let state = Rc::new(RefCell::new(SimState {
        inbox,
        generation: Generation::INITIAL,
        source: None,
        length: 0.0,
        position: 0.0,
        playing: false,
        volume: 1.0,
        default_length,
        lengths,
    }));
    (
        SimulatedDevice {
            state: state.clone(),
        },
        SimClock { state },
    )
}

/// Push outside the state borrow; the inbox may run a waker
fn report(state: &Rc<RefCell<SimState>>, events: Vec<DeviceEvent>) {
    let (inbox, generation) = {
        let state = state.borrow();
        (state.inbox.clone(), state.generation)
    };
    for event in events {
        inbox.push(generation, event);
    }
}

impl AudioDevice for SimulatedDevice {
    fn set_source(&mut self, url: &str, generation: Generation) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PlaybackError::Device(format!("unsupported stream {url}")));
        }

        let length = {
            let mut state = self.state.borrow_mut();
            let length = state.length_of(url);
            state.generation = generation;
            state.source = Some(url.to_string());
            state.length = length;
            state.position = 0.0;
            state.playing = false;
            length
        };
        trace!(url, %generation, length, "Simulated source set");
        report(&self.state, vec![DeviceEvent::DurationKnown { duration: length }]);
        Ok(())
    }

    fn clear_source(&mut self) {
        let mut state = self.state.borrow_mut();
        state.source = None;
        state.playing = false;
        state.position = 0.0;
    }

    fn request_play(&mut self) -> Result<()> {
        {
            let mut state = self.state.borrow_mut();
            if state.source.is_none() {
                return Err(PlaybackError::NoTrackLoaded);
            }
            if state.playing {
                return Ok(());
            }
            state.playing = true;
        }
        report(&self.state, vec![DeviceEvent::Playing]);
        Ok(())
    }

    fn pause(&mut self) {
        let was_playing = std::mem::take(&mut self.state.borrow_mut().playing);
        if was_playing {
            report(&self.state, vec![DeviceEvent::Paused]);
        }
    }

    fn seek(&mut self, position: f64) {
        let position = {
            let mut state = self.state.borrow_mut();
            if state.source.is_none() {
                return;
            }
            state.position = position.clamp(0.0, state.length);
            state.position
        };
        report(&self.state, vec![DeviceEvent::TimeUpdate { position }]);
    }

    fn set_volume(&mut self, level: f32) {
        self.state.borrow_mut().volume = level;
    }
}

impl SimClock {
    /// Move playback forward by `seconds`
    ///
    /// Reaching the end reports the final position, a pause and the end of
    /// the track, in that order.
    pub fn advance(&self, seconds: f64) {
        let events = {
            let mut state = self.state.borrow_mut();
            if !state.playing || state.source.is_none() {
                return;
            }
            state.position = (state.position + seconds).min(state.length);

            let mut events = vec![DeviceEvent::TimeUpdate {
                position: state.position,
            }];
            if state.position >= state.length {
                state.playing = false;
                events.push(DeviceEvent::Paused);
                events.push(DeviceEvent::Ended);
            }
            events
        };
        report(&self.state, events);
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    pub fn position(&self) -> f64 {
        self.state.borrow().position
    }

    pub fn volume(&self) -> f32 {
        self.state.borrow().volume
    }

    /// Stream URL currently loaded
    pub fn source(&self) -> Option<String> {
        self.state.borrow().source.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> (SimulatedDevice, SimClock, DeviceInbox) {
        let inbox = DeviceInbox::new();
        let (device, clock) = simulated(inbox.clone(), 10.0, HashMap::new());
        (device, clock, inbox)
    }

    #[test]
    fn reports_duration_on_load() {
        let (mut device, _clock, inbox) = device();
        let generation = Generation::INITIAL.next();

        device.set_source("https://cdn.test/a.mp3", generation).unwrap();

        let event = inbox.pop().unwrap();
        assert_eq!(event.generation, generation);
        assert_eq!(event.event, DeviceEvent::DurationKnown { duration: 10.0 });
    }

    #[test]
    fn rejects_non_http_sources() {
        let (mut device, _clock, _inbox) = device();
        assert!(device
            .set_source("file:///a.mp3", Generation::INITIAL)
            .is_err());
    }

    #[test]
    fn plays_to_the_end() {
        let (mut device, clock, inbox) = device();
        device.set_source("https://cdn.test/a.mp3", Generation::INITIAL).unwrap();
        device.request_play().unwrap();
        inbox.drain();

        clock.advance(4.0);
        clock.advance(8.0);

        let events: Vec<_> = inbox.drain().into_iter().map(|e| e.event).collect();
        assert_eq!(
            events,
            vec![
                DeviceEvent::TimeUpdate { position: 4.0 },
                DeviceEvent::TimeUpdate { position: 10.0 },
                DeviceEvent::Paused,
                DeviceEvent::Ended,
            ]
        );
        assert!(!clock.is_playing());
    }

    #[test]
    fn clock_does_not_move_while_paused() {
        let (mut device, clock, inbox) = device();
        device.set_source("https://cdn.test/a.mp3", Generation::INITIAL).unwrap();
        inbox.drain();

        clock.advance(5.0);

        assert!(inbox.is_empty());
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn play_without_source_fails() {
        let (mut device, _clock, _inbox) = device();
        assert!(matches!(
            device.request_play(),
            Err(PlaybackError::NoTrackLoaded)
        ));
    }

    #[test]
    fn per_track_lengths() {
        let inbox = DeviceInbox::new();
        let lengths = HashMap::from([("https://cdn.test/b.mp3".to_string(), 3.5)]);
        let (mut device, _clock) = simulated(inbox.clone(), 10.0, lengths);

        device.set_source("https://cdn.test/b.mp3", Generation::INITIAL).unwrap();

        assert_eq!(
            inbox.pop().unwrap().event,
            DeviceEvent::DurationKnown { duration: 3.5 }
        );
    }
}
