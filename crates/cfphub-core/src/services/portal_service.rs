//! Portal service - portal CRUD plus live speaker lookup.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::config::validate_portal;
use crate::domain::Portal;
use crate::ports::{
    CoreError, PortalClientFactory, PortalRepository, PortalSpeakerDetails, RepositoryError,
};
use crate::utils::text::normalize_blank;

/// Service for portal operations.
///
/// Every change to a portal evicts its cached HTTP client so the next call
/// sees the new base URL and type.
pub struct PortalService {
    repo: Arc<dyn PortalRepository>,
    clients: Arc<dyn PortalClientFactory>,
    write_lock: Arc<Mutex<()>>,
}

impl PortalService {
    pub fn new(
        repo: Arc<dyn PortalRepository>,
        clients: Arc<dyn PortalClientFactory>,
        write_lock: Arc<Mutex<()>>,
    ) -> Self {
        Self {
            repo,
            clients,
            write_lock,
        }
    }

    /// List all portals.
    pub async fn list(&self) -> Result<Vec<Portal>, CoreError> {
        self.repo.list().await.map_err(CoreError::from)
    }

    /// Get a portal by name, `None` if it doesn't exist.
    pub async fn get(&self, name: &str) -> Result<Option<Portal>, CoreError> {
        match self.repo.get_by_name(name).await {
            Ok(portal) => Ok(Some(portal)),
            Err(RepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(CoreError::from(e)),
        }
    }

    pub async fn count(&self) -> Result<u64, CoreError> {
        self.repo.count().await.map_err(CoreError::from)
    }

    /// Create or replace a portal.
    pub async fn save(&self, portal: Portal) -> Result<Portal, CoreError> {
        validate_portal(&portal.name, &portal.base_url)?;
        let portal = Portal {
            name: portal.name.trim().to_string(),
            base_url: portal.base_url.trim().to_string(),
            description: normalize_blank(portal.description.as_deref()),
            ..portal
        };

        let _guard = self.write_lock.lock().await;
        let saved = self.repo.upsert(&portal).await?;
        self.clients.evict(&saved.name);
        info!(portal = %saved.name, portal_type = %saved.portal_type, "Saved portal");
        Ok(saved)
    }

    /// Delete a portal and its event.
    pub async fn delete(&self, name: &str) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;
        self.repo.delete(name).await?;
        self.clients.evict(name);
        info!(portal = %name, "Deleted portal");
        Ok(())
    }

    /// Fetch speakers straight from the portal, bypassing the store.
    ///
    /// With a company, only speakers of that company are returned.
    pub async fn speakers(
        &self,
        name: &str,
        company: Option<&str>,
    ) -> Result<Vec<PortalSpeakerDetails>, CoreError> {
        let portal = self.repo.get_by_name(name).await?;
        let client = self.clients.client_for(&portal)?;
        let speakers = match normalize_blank(company) {
            Some(company) => client.search_speakers(&company).await?,
            None => client.fetch_speakers().await?,
        };
        Ok(speakers)
    }
}
