//! Cadence Catalog Client
//!
//! HTTP client for the track catalog consumed by the Cadence player.
//!
//! The catalog endpoint answers a plain `GET` with a `{ "data": [...] }`
//! envelope of track records. This crate fetches it, maps HTTP failures to
//! [`CatalogError`] and normalizes records into [`cadence_core::Track`]s.
//!
//! # Example
//!
//! ```ignore
//! use cadence_catalog::{CatalogClient, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::default())?;
//!
//!     for track in client.fetch_tracks().await? {
//!         println!("{} - {}", track.title(), track.artist());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;

// Re-export main types
pub use client::CatalogClient;
pub use config::{CatalogConfig, DEFAULT_API_URL};
pub use error::{CatalogError, Result};
