//! WASM bindings for cadence-playback
//!
//! Runs the coordinator in the browser over an `HTMLAudioElement` and exposes
//! a JavaScript-friendly player.

pub mod device;
pub mod player;

pub use device::HtmlAudioDevice;
pub use player::WasmPlayer;
