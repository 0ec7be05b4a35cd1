//! Portal client factory port.

use std::sync::Arc;

use super::client::PortalClientPort;
use super::error::PortalError;
use crate::domain::Portal;

/// Hands out one client per portal, keyed by portal name.
///
/// Implementations cache clients so a portal's client is created at most
/// once, even when several pipelines ask for it at the same time.
pub trait PortalClientFactory: Send + Sync {
    /// Get or create the client for `portal`.
    fn client_for(&self, portal: &Portal) -> Result<Arc<dyn PortalClientPort>, PortalError>;

    /// Drop the cached client for `portal_name`, if any.
    ///
    /// Called when a portal's configuration changes or it is deleted.
    fn evict(&self, portal_name: &str);
}
