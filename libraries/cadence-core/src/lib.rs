//! Cadence Core
//!
//! Platform-agnostic domain types for the Cadence player.
//!
//! This crate is shared by the playback core, the catalog client and the
//! browser binding, so it carries no I/O of its own.
//!
//! # Architecture
//!
//! - **Domain Types**: `Track`, `TrackId`, `Playlist`
//! - **Catalog Records**: the raw API shape and its normalization into tracks
//! - **Filtering**: search text and category tabs producing a `Playlist`
//! - **Formatting**: `mm:ss` clock strings for a rendering layer
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{PlaylistFilter, Tab, Track};
//!
//! let catalog = vec![
//!     Track::new("1", "Intro", "Band", "https://cdn.example.com/1.mp3"),
//!     Track::new("2", "Outro", "Other Band", "https://cdn.example.com/2.mp3"),
//! ];
//!
//! let playlist = PlaylistFilter::new("other", Tab::ForYou).apply(&catalog);
//! assert_eq!(playlist.len(), 1);
//! assert_eq!(playlist.get(0).map(|t| t.title()), Some("Outro"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod filter;
pub mod format;
pub mod types;

pub use error::{CoreError, Result};
pub use filter::{PlaylistFilter, Tab};
pub use format::{format_clock, format_duration};
pub use types::{
    CatalogEnvelope, CatalogRecord, Playlist, Track, TrackAttributes, TrackId,
    DEFAULT_ASSET_BASE_URL,
};
