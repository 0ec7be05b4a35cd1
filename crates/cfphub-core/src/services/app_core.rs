//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, Web)
//! receive an `AppCore` instance and use it to access all functionality.

use std::sync::Arc;
use std::time::Duration;

use crate::ports::{PortalClientFactory, Repos};

use super::{AggregationService, EventService, PortalService};

/// The core application facade.
///
/// `AppCore` provides access to all core services. It's constructed at the
/// adapter's composition root (main.rs or bootstrap.rs) with concrete
/// repositories and a portal client factory.
///
/// # Example
///
/// ```ignore
/// let repos = cfphub_db::CoreFactory::build_repos(pool);
/// let clients = Arc::new(PortalClientRegistry::new(client_config));
/// let core = AppCore::new(repos, clients, config.request_timeout());
///
/// let summary = core.aggregation().create_events(&criteria).await?;
/// ```
pub struct AppCore {
    portals: PortalService,
    events: EventService,
    aggregation: AggregationService,
}

impl AppCore {
    /// Create a new `AppCore`.
    ///
    /// `request_timeout` is the per-request budget used to derive the
    /// aggregation deadline.
    pub fn new(
        repos: Repos,
        clients: Arc<dyn PortalClientFactory>,
        request_timeout: Duration,
    ) -> Self {
        let aggregation = AggregationService::new(
            Arc::clone(&repos.portals),
            Arc::clone(&repos.events),
            Arc::clone(&clients),
            request_timeout,
        );
        let portals = PortalService::new(
            Arc::clone(&repos.portals),
            clients,
            aggregation.write_lock(),
        );
        let events = EventService::new(repos.events, repos.portals);
        Self {
            portals,
            events,
            aggregation,
        }
    }

    /// Access the portal service.
    pub const fn portals(&self) -> &PortalService {
        &self.portals
    }

    /// Access the event service.
    pub const fn events(&self) -> &EventService {
        &self.events
    }

    /// Access the aggregation service.
    pub const fn aggregation(&self) -> &AggregationService {
        &self.aggregation
    }
}
