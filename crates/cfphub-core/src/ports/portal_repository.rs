//! Portal repository trait definition.
//!
//! This port defines the interface for portal persistence operations.
//! Implementations must handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::Portal;

/// Repository for configured portals.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - The portal name is the identity key
/// - Deleting a portal cascades to its event, speakers and talks
#[async_trait]
pub trait PortalRepository: Send + Sync {
    /// List all portals, ordered by name.
    async fn list(&self) -> Result<Vec<Portal>, RepositoryError>;

    /// Get a portal by its name.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if no portal with that name exists.
    async fn get_by_name(&self, name: &str) -> Result<Portal, RepositoryError>;

    /// Number of stored portals.
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Insert the portal, or replace the stored one with the same name.
    ///
    /// Replacing keeps the portal's event.
    async fn upsert(&self, portal: &Portal) -> Result<Portal, RepositoryError>;

    /// Delete a portal and everything it owns.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the portal doesn't exist.
    async fn delete(&self, name: &str) -> Result<(), RepositoryError>;

    /// Delete every portal and everything they own.
    async fn delete_all(&self) -> Result<(), RepositoryError>;
}
