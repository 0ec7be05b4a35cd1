//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Repositories take and return domain types only
//! - Portal clients return core-owned DTOs, never wire models

pub mod event_repository;
pub mod portal;
pub mod portal_repository;

use std::sync::Arc;
use thiserror::Error;

pub use event_repository::EventRepository;
pub use portal::{
    PortalClientFactory, PortalClientPort, PortalError, PortalEventDetails, PortalResult,
    PortalSpeakerDetails, PortalTalkDetails,
};
pub use portal_repository::PortalRepository;

use crate::domain::ValidationError;

/// Container for all repository trait objects.
///
/// This struct provides a consistent way to wire repositories across adapters
/// without coupling them to concrete implementations. It lives in `cfphub-core`
/// so that `AppCore` can accept it without depending on `cfphub-db`.
///
/// # Example
///
/// ```ignore
/// // In cfphub-db factory:
/// pub fn build_repos(pool: SqlitePool) -> Repos { ... }
///
/// // In adapter bootstrap:
/// let repos = cfphub_db::CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos, clients, config.request_timeout());
/// ```
#[derive(Clone)]
pub struct Repos {
    /// Portal repository for CRUD operations on portals.
    pub portals: Arc<dyn PortalRepository>,
    /// Event repository for aggregated event graphs.
    pub events: Arc<dyn EventRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(portals: Arc<dyn PortalRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { portals, events }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., foreign key, unique constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// A graph failed its required-field checks before writing.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters should map this to their own error types (HTTP status codes,
/// CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A portal call failed outside an aggregation run.
    #[error(transparent)]
    Portal(#[from] PortalError),

    /// An aggregation run failed.
    #[error(transparent)]
    Aggregation(#[from] crate::services::AggregationError),

    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}
