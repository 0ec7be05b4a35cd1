//! Internal error types for portal HTTP operations.
//!
//! These errors are internal to `cfphub-portals` and are mapped to
//! [`PortalError`](cfphub_core::PortalError) at the port boundary.

use thiserror::Error;

/// Result type alias for portal HTTP operations.
pub type PortalHttpResult<T> = Result<T, PortalHttpError>;

#[derive(Debug, Error)]
pub enum PortalHttpError {
    /// The portal answered with a non-success status.
    #[error("Portal request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
