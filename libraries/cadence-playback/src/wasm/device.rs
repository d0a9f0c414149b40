//! `HTMLAudioElement` audio device

use crate::{
    device::{AudioDevice, DeviceEvent, DeviceInbox, Generation},
    error::{PlaybackError, Result},
};
use tracing::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlAudioElement;

type EventMapper = fn(&HtmlAudioElement) -> DeviceEvent;

/// Media events observed for every load
const MEDIA_EVENTS: [(&str, EventMapper); 6] = [
    ("play", |_| DeviceEvent::Playing),
    ("pause", |_| DeviceEvent::Paused),
    ("timeupdate", |el| DeviceEvent::TimeUpdate {
        position: el.current_time(),
    }),
    ("loadedmetadata", |el| DeviceEvent::DurationKnown {
        duration: el.duration(),
    }),
    ("ended", |_| DeviceEvent::Ended),
    ("error", |el| DeviceEvent::Failed {
        reason: el
            .error()
            .map(|e| format!("media error code {}", e.code()))
            .unwrap_or_else(|| "media error".to_string()),
    }),
];

/// Audio device backed by a detached `<audio>` element
pub struct HtmlAudioDevice {
    element: HtmlAudioElement,
    inbox: DeviceInbox,
    generation: Generation,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
}

impl HtmlAudioDevice {
    /// Create the element; events are pushed into `inbox`
    pub fn new(inbox: DeviceInbox) -> std::result::Result<Self, JsValue> {
        let element = HtmlAudioElement::new()?;
        element.set_preload("metadata");
        Ok(Self {
            element,
            inbox,
            generation: Generation::INITIAL,
            listeners: Vec::new(),
        })
    }

    fn attach(&mut self, generation: Generation) {
        self.detach();

        for (name, to_event) in MEDIA_EVENTS {
            let element = self.element.clone();
            let inbox = self.inbox.clone();
            let listener = Closure::<dyn FnMut()>::new(move || {
                inbox.push(generation, to_event(&element));
            });

            if let Err(e) = self
                .element
                .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            {
                warn!(event = name, error = ?e, "Failed to attach media listener");
                continue;
            }
            self.listeners.push((name, listener));
        }
    }

    fn detach(&mut self) {
        for (name, listener) in self.listeners.drain(..) {
            let _ = self
                .element
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref());
        }
    }
}

impl AudioDevice for HtmlAudioDevice {
    fn set_source(&mut self, url: &str, generation: Generation) -> Result<()> {
        self.generation = generation;
        self.attach(generation);
        self.element.set_src(url);
        self.element.load();
        Ok(())
    }

    fn clear_source(&mut self) {
        self.detach();
        let _ = self.element.pause();
        let _ = self.element.remove_attribute("src");
        self.element.load();
    }

    fn request_play(&mut self) -> Result<()> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlaybackError::Device(format!("{e:?}")))?;

        // Autoplay policies reject the promise, not the call
        let inbox = self.inbox.clone();
        let generation = self.generation;
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                inbox.push(
                    generation,
                    DeviceEvent::PlayRejected {
                        reason: format!("{e:?}"),
                    },
                );
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            warn!(error = ?e, "Pause failed");
        }
    }

    fn seek(&mut self, position: f64) {
        self.element.set_current_time(position);
    }

    fn set_volume(&mut self, level: f32) {
        self.element.set_volume(f64::from(level));
    }
}

impl Drop for HtmlAudioDevice {
    fn drop(&mut self) {
        self.clear_source();
    }
}
