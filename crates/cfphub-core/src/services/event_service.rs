//! Event service - read side of the store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Event, EventSort, Portal};
use crate::ports::{CoreError, EventRepository, PortalRepository, RepositoryError};

/// Full dump of the store, as served by the export endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub generated_at: DateTime<Utc>,
    pub portals: Vec<Portal>,
    pub events: Vec<Event>,
}

/// Service for reading aggregated events.
///
/// Storage order is arbitrary; ordering is applied here on every read.
pub struct EventService {
    events: Arc<dyn EventRepository>,
    portals: Arc<dyn PortalRepository>,
}

impl EventService {
    pub fn new(events: Arc<dyn EventRepository>, portals: Arc<dyn PortalRepository>) -> Self {
        Self { events, portals }
    }

    /// List all events in `sort` order.
    pub async fn list(&self, sort: EventSort) -> Result<Vec<Event>, CoreError> {
        let mut events = self.events.list().await?;
        sort.apply(&mut events);
        Ok(events)
    }

    /// The event of one portal, `None` if it has not been aggregated.
    pub async fn get_by_portal(&self, portal_name: &str) -> Result<Option<Event>, CoreError> {
        match self.events.get_by_portal(portal_name).await {
            Ok(event) => Ok(Some(event)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(CoreError::from(e)),
        }
    }

    pub async fn export(&self) -> Result<ExportDocument, CoreError> {
        Ok(ExportDocument {
            generated_at: Utc::now(),
            portals: self.portals.list().await?,
            events: self.list(EventSort::default()).await?,
        })
    }
}
