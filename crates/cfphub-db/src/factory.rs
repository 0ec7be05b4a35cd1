//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the application
//! with `SQLite` repositories. It is focused purely on construction and
//! should not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

use cfphub_core::services::AppCore;
use cfphub_core::{PortalClientFactory, Repos};

use crate::repositories::{SqliteEventRepository, SqlitePortalRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// Returns a `Repos` struct from `cfphub-core` containing
    /// trait-object-wrapped repositories sharing one pool.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Arc::new(SqlitePortalRepository::new(pool.clone())),
            Arc::new(SqliteEventRepository::new(pool)),
        )
    }

    /// Build a complete `AppCore` from a pool and a portal client factory.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use cfphub_db::{CoreFactory, setup_database};
    /// use cfphub_portals::{PortalClientConfig, PortalClientRegistry};
    ///
    /// let pool = setup_database(&db_path).await?;
    /// let clients = Arc::new(PortalClientRegistry::new(PortalClientConfig::new()));
    /// let core = CoreFactory::build_app_core(pool, clients, Duration::from_secs(30));
    /// ```
    pub fn build_app_core(
        pool: SqlitePool,
        clients: Arc<dyn PortalClientFactory>,
        request_timeout: Duration,
    ) -> AppCore {
        AppCore::new(Self::build_repos(pool), clients, request_timeout)
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Repositories backed by this database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }

    pub fn portal_repository(&self) -> SqlitePortalRepository {
        SqlitePortalRepository::new(self.pool.clone())
    }

    pub fn event_repository(&self) -> SqliteEventRepository {
        SqliteEventRepository::new(self.pool.clone())
    }
}
