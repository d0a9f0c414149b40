//! Error types for the catalog client.

use thiserror::Error;

/// Errors that can occur when fetching the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Catalog host returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Catalog host could not be reached or timed out
    #[error("Catalog unreachable: {0}")]
    Unreachable(String),

    /// Invalid catalog or asset URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Response body is not a catalog envelope
    #[error("Failed to parse catalog: {0}")]
    Parse(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
