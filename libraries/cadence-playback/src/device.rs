//! Audio device abstraction
//!
//! The playback core never talks to an audio backend directly. A platform
//! supplies an [`AudioDevice`] and hands its asynchronous notifications back
//! through a [`DeviceInbox`], tagged with the [`Generation`] of the load that
//! produced them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Load counter
///
/// Bumped on every load and eject. Events carrying an older generation belong
/// to a superseded source.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// Generation before anything was loaded
    pub const INITIAL: Self = Self(0);

    /// The generation that follows this one
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Notification reported by an audio device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DeviceEvent {
    /// Playback started
    Playing,
    /// Playback paused
    Paused,
    /// Playback position advanced (seconds)
    TimeUpdate { position: f64 },
    /// Source metadata reports the total length (seconds)
    DurationKnown { duration: f64 },
    /// Source played to its end
    Ended,
    /// A play request was refused, e.g. by an autoplay policy
    PlayRejected { reason: String },
    /// The source could not be fetched or decoded
    Failed { reason: String },
}

/// Device event stamped with the load it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedEvent {
    pub generation: Generation,
    pub event: DeviceEvent,
}

impl TaggedEvent {
    pub fn new(generation: Generation, event: DeviceEvent) -> Self {
        Self { generation, event }
    }
}

/// Output device controlled by the playback engine
///
/// Implementations report state changes asynchronously; none of these calls
/// are expected to block. Devices are single-threaded and may hold `Rc`
/// closures, so there is no `Send` bound.
pub trait AudioDevice {
    /// Replace the current source
    ///
    /// Every event later reported for this source must carry `generation`.
    /// An error means the resource is unavailable.
    fn set_source(&mut self, url: &str, generation: Generation) -> Result<()>;

    /// Drop the current source and any per-source listeners
    fn clear_source(&mut self);

    /// Ask the device to start playing
    ///
    /// A synchronous error is a rejection. Asynchronous rejections are
    /// reported as [`DeviceEvent::PlayRejected`].
    fn request_play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Move the playback position (seconds); the device clamps to the source
    fn seek(&mut self, position: f64);

    /// Set output volume (0.0 - 1.0)
    fn set_volume(&mut self, level: f32);
}

type Waker = Rc<dyn Fn()>;

/// Single-threaded FIFO of tagged device events
///
/// Clones share the same queue. Devices push, the host pops and feeds the
/// coordinator. An optional waker runs after every push so hosts driven by
/// callbacks (the browser) can pump immediately.
#[derive(Clone, Default)]
pub struct DeviceInbox {
    queue: Rc<RefCell<VecDeque<TaggedEvent>>>,
    waker: Rc<RefCell<Option<Waker>>>,
}

impl DeviceInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for `generation`
    pub fn push(&self, generation: Generation, event: DeviceEvent) {
        self.queue
            .borrow_mut()
            .push_back(TaggedEvent::new(generation, event));

        // Clone the waker out so it may push or pop re-entrantly
        let waker = self.waker.borrow().clone();
        if let Some(wake) = waker {
            wake();
        }
    }

    /// Take the oldest queued event
    pub fn pop(&self) -> Option<TaggedEvent> {
        self.queue.borrow_mut().pop_front()
    }

    /// Take every queued event in arrival order
    pub fn drain(&self) -> Vec<TaggedEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Run `wake` after every push
    pub fn set_waker(&self, wake: impl Fn() + 'static) {
        *self.waker.borrow_mut() = Some(Rc::new(wake));
    }

    pub fn clear_waker(&self) {
        self.waker.borrow_mut().take();
    }
}

impl fmt::Debug for DeviceInbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceInbox")
            .field("queued", &self.len())
            .field("has_waker", &self.waker.borrow().is_some())
            .finish()
    }
}
