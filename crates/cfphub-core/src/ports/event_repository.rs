//! Event repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Event, EventGraph, Portal};

/// Repository for aggregated events and their speakers and talks.
///
/// Writes take whole [`EventGraph`]s. Every write validates its graphs first
/// and either applies completely or not at all.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// List all events with speakers and talks, in storage order.
    async fn list(&self) -> Result<Vec<Event>, RepositoryError>;

    /// Get the event owned by `portal_name`.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the portal has no event.
    async fn get_by_portal(&self, portal_name: &str) -> Result<Event, RepositoryError>;

    /// Persist one graph, replacing the portal's previous event.
    ///
    /// The graph's portal must already be stored.
    async fn persist(&self, graph: &EventGraph) -> Result<Event, RepositoryError>;

    /// Delete every portal, then store `portals` and `graphs`, atomically.
    ///
    /// This is the write side of an aggregation run. If any step fails the
    /// store is left exactly as it was.
    async fn replace_all(
        &self,
        portals: &[Portal],
        graphs: &[EventGraph],
    ) -> Result<Vec<Event>, RepositoryError>;
}
