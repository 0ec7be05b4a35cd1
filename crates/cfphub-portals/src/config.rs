//! Public configuration for portal clients.
//!
//! One config is shared by every portal client the registry builds.

use std::time::Duration;

/// Configuration for portal HTTP clients.
///
/// # Example
///
/// ```
/// use cfphub_portals::PortalClientConfig;
/// use std::time::Duration;
///
/// let config = PortalClientConfig::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_log_requests(true);
/// ```
#[derive(Debug, Clone)]
pub struct PortalClientConfig {
    /// Read timeout for a single request
    pub(crate) timeout: Duration,
    /// Connect timeout for a single request
    pub(crate) connect_timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Log request line and headers at debug level
    pub(crate) log_requests: bool,
    /// Log response status and body at debug level
    pub(crate) log_responses: bool,
}

impl Default for PortalClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(30),
            user_agent: concat!("cfphub/", env!("CARGO_PKG_VERSION")).to_string(),
            log_requests: false,
            log_responses: false,
        }
    }
}

impl PortalClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub const fn with_log_requests(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }

    #[must_use]
    pub const fn with_log_responses(mut self, enabled: bool) -> Self {
        self.log_responses = enabled;
        self
    }

    /// Build from the application configuration.
    pub fn from_app_config(config: &cfphub_core::AppConfig) -> Self {
        Self::new()
            .with_timeout(config.request_timeout())
            .with_connect_timeout(config.connect_timeout())
            .with_log_requests(config.log_requests)
            .with_log_responses(config.log_responses)
    }
}
