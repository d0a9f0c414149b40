//! WASM-compatible player wrapper

use super::device::HtmlAudioDevice;
use crate::{DeviceInbox, PlaybackConfig, PlaybackCoordinator, PlaybackEvent};
use cadence_core::{
    format_clock, CatalogEnvelope, CatalogRecord, PlaylistFilter, Tab, Track,
    DEFAULT_ASSET_BASE_URL,
};
use js_sys::Function;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

/// Catalog payload accepted by `loadCatalog`: a bare array or the API envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Records(Vec<CatalogRecord>),
    Envelope(CatalogEnvelope),
}

struct PlayerCore {
    coordinator: PlaybackCoordinator<HtmlAudioDevice>,
    catalog: Vec<Track>,
    filter: PlaylistFilter,
}

impl PlayerCore {
    fn refresh_playlist(&mut self) {
        let playlist = self.filter.apply(&self.catalog);
        self.coordinator.set_playlist(playlist);
    }
}

#[derive(Default)]
struct Callbacks {
    on_status: Option<Function>,
    on_track_change: Option<Function>,
}

/// JavaScript-facing player
///
/// Owns the coordinator and its `<audio>` element. Status and track changes
/// are delivered to the registered callbacks as soon as the element reports
/// them.
#[wasm_bindgen]
pub struct WasmPlayer {
    core: Rc<RefCell<PlayerCore>>,
    callbacks: Rc<RefCell<Callbacks>>,
    inbox: DeviceInbox,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player; `config` is an optional `PlaybackConfig` object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };

        let inbox = DeviceInbox::new();
        let device = HtmlAudioDevice::new(inbox.clone())?;
        let core = Rc::new(RefCell::new(PlayerCore {
            coordinator: PlaybackCoordinator::new(device, config),
            catalog: Vec::new(),
            filter: PlaylistFilter::default(),
        }));
        let callbacks = Rc::new(RefCell::new(Callbacks::default()));

        let weak_core: Weak<RefCell<PlayerCore>> = Rc::downgrade(&core);
        let weak_callbacks = Rc::downgrade(&callbacks);
        let waker_inbox = inbox.clone();
        inbox.set_waker(move || {
            if let (Some(core), Some(callbacks)) = (weak_core.upgrade(), weak_callbacks.upgrade()) {
                flush(&core, &callbacks, &waker_inbox);
            }
        });

        Ok(Self {
            core,
            callbacks,
            inbox,
        })
    }

    // ===== Catalog =====

    /// Load catalog records and rebuild the playlist, returns the catalog size
    #[wasm_bindgen(js_name = loadCatalog)]
    pub fn load_catalog(
        &self,
        records: JsValue,
        asset_base_url: Option<String>,
    ) -> Result<usize, JsValue> {
        let records = match serde_wasm_bindgen::from_value(records)? {
            CatalogPayload::Records(records) => records,
            CatalogPayload::Envelope(envelope) => envelope.data,
        };
        let base = asset_base_url.unwrap_or_else(|| DEFAULT_ASSET_BASE_URL.to_string());

        Ok(self.with_core(|core| {
            core.catalog = records
                .into_iter()
                .map(|record| record.into_track(&base))
                .collect();
            core.refresh_playlist();
            core.catalog.len()
        }))
    }

    /// Filter the playlist by title or artist
    pub fn search(&self, query: String) {
        self.with_core(|core| {
            core.filter.query = query;
            core.refresh_playlist();
        });
    }

    /// Switch tab: `for-you` or `top-tracks`
    #[wasm_bindgen(js_name = setTab)]
    pub fn set_tab(&self, tab: &str) -> Result<(), JsValue> {
        let tab: Tab = tab
            .parse()
            .map_err(|e: cadence_core::CoreError| JsValue::from_str(&e.to_string()))?;
        self.with_core(|core| {
            core.filter.tab = tab;
            core.refresh_playlist();
        });
        Ok(())
    }

    // ===== Navigation =====

    /// Select and start the track at `index`; false when out of range
    #[wasm_bindgen(js_name = selectByIndex)]
    pub fn select_by_index(&self, index: usize) -> bool {
        self.with_core(|core| core.coordinator.select_by_index(index).is_ok())
    }

    pub fn next(&self) -> bool {
        self.with_core(|core| core.coordinator.next().is_ok())
    }

    pub fn previous(&self) -> bool {
        self.with_core(|core| core.coordinator.previous().is_ok())
    }

    // ===== Transport =====

    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&self) {
        self.with_core(|core| core.coordinator.toggle_play_pause());
    }

    /// Seek to position in seconds
    pub fn seek(&self, position_secs: f64) {
        self.with_core(|core| core.coordinator.seek(position_secs));
    }

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: f32) {
        let level = if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.with_core(|core| core.coordinator.set_volume(level));
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.with_core(|core| core.coordinator.toggle_mute());
    }

    /// Stop playback and release the audio element's source
    pub fn shutdown(&self) {
        self.with_core(|core| core.coordinator.shutdown());
    }

    // ===== Queries =====

    /// Current `PlaybackStatus`
    pub fn status(&self) -> Result<JsValue, JsValue> {
        let status = self.core.borrow().coordinator.status();
        Ok(serde_wasm_bindgen::to_value(&status)?)
    }

    /// Coordinator state: `idle`, `loading`, `playing` or `paused`
    pub fn state(&self) -> Result<JsValue, JsValue> {
        let state = self.core.borrow().coordinator.state();
        Ok(serde_wasm_bindgen::to_value(&state)?)
    }

    #[wasm_bindgen(js_name = activeTrackId)]
    pub fn active_track_id(&self) -> Option<String> {
        self.core
            .borrow()
            .coordinator
            .active_track_id()
            .map(|id| id.as_str().to_string())
    }

    #[wasm_bindgen(js_name = activeIndex)]
    pub fn active_index(&self) -> Option<usize> {
        self.core.borrow().coordinator.active_index()
    }

    /// Tracks of the current (filtered) playlist
    pub fn playlist(&self) -> Result<JsValue, JsValue> {
        let core = self.core.borrow();
        Ok(serde_wasm_bindgen::to_value(core.coordinator.playlist())?)
    }

    // ===== Event Callbacks =====

    /// Called with a `PlaybackStatus` on every status change
    #[wasm_bindgen(js_name = onStatus)]
    pub fn on_status(&self, callback: Function) {
        self.callbacks.borrow_mut().on_status = Some(callback);
    }

    /// Called with the newly selected track
    #[wasm_bindgen(js_name = onTrackChange)]
    pub fn on_track_change(&self, callback: Function) {
        self.callbacks.borrow_mut().on_track_change = Some(callback);
    }
}

impl WasmPlayer {
    fn with_core<R>(&self, f: impl FnOnce(&mut PlayerCore) -> R) -> R {
        let result = f(&mut self.core.borrow_mut());
        flush(&self.core, &self.callbacks, &self.inbox);
        result
    }
}

impl Drop for WasmPlayer {
    fn drop(&mut self) {
        self.inbox.clear_waker();
    }
}

/// Format seconds as `mm:ss`
#[wasm_bindgen(js_name = formatClock)]
pub fn format_clock_js(seconds: f64) -> String {
    format_clock(seconds)
}

enum Outgoing {
    Status(JsValue),
    Track(JsValue),
}

/// Pump queued device events and deliver the results to JavaScript
///
/// Callbacks run after the core borrow is released so they may call back
/// into the player.
fn flush(core: &RefCell<PlayerCore>, callbacks: &RefCell<Callbacks>, inbox: &DeviceInbox) {
    let outgoing = {
        // Busy means an operation is running; it flushes when done
        let Ok(mut core) = core.try_borrow_mut() else {
            return;
        };
        core.coordinator.pump(inbox);

        let mut outgoing = Vec::new();
        for event in core.coordinator.drain_events() {
            match event {
                PlaybackEvent::StatusChanged { status, .. } => {
                    if let Ok(value) = serde_wasm_bindgen::to_value(&status) {
                        outgoing.push(Outgoing::Status(value));
                    }
                }
                PlaybackEvent::TrackChanged { .. } => {
                    if let Ok(value) = serde_wasm_bindgen::to_value(&core.coordinator.active_track())
                    {
                        outgoing.push(Outgoing::Track(value));
                    }
                }
                _ => {}
            }
        }
        outgoing
    };

    for message in outgoing {
        let (callback, value) = match message {
            Outgoing::Status(value) => (callbacks.borrow().on_status.clone(), value),
            Outgoing::Track(value) => (callbacks.borrow().on_track_change.clone(), value),
        };
        if let Some(callback) = callback {
            let _ = callback.call1(&JsValue::NULL, &value);
        }
    }
}
