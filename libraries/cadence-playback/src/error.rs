//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// None of these are fatal. Navigation errors report a no-op, device errors
/// are logged by the engine and never reach the coordinator's callers.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Selection outside the current playlist
    #[error("Index {index} out of bounds for playlist of {len} tracks")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Navigation requested on an empty playlist
    #[error("Playlist is empty")]
    PlaylistEmpty,

    /// No source is loaded in the device
    #[error("No track loaded")]
    NoTrackLoaded,

    /// The audio device refused an operation
    #[error("Audio device error: {0}")]
    Device(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
