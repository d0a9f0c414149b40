mod catalog;
mod ids;
mod playlist;
mod track;

pub use catalog::{CatalogEnvelope, CatalogRecord, DEFAULT_ASSET_BASE_URL};
pub use ids::TrackId;
pub use playlist::Playlist;
pub use track::{Track, TrackAttributes};
