//! Error types for portal port operations.

use thiserror::Error;

/// A single call to an external portal failed.
///
/// Implementation-specific errors (reqwest, JSON) are mapped to these by the
/// adapter before they cross the port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    /// The portal answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Response status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Connection, TLS or timeout failure.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The body could not be decoded.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// The portal is misconfigured (bad base URL, unusable client).
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

impl PortalError {
    /// Whether retrying the same request could succeed.
    ///
    /// Client errors (4xx) are permanent; server errors and network failures
    /// are transient. Adapters never retry on their own.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status >= 500,
            Self::Network { .. } => true,
            Self::InvalidResponse { .. } | Self::Configuration { .. } => false,
        }
    }
}

/// Result type alias for portal port operations.
pub type PortalResult<T> = Result<T, PortalError>;
