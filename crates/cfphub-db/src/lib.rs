//! `SQLite` persistence for cfphub.
//!
//! Implements the core [`PortalRepository`](cfphub_core::PortalRepository)
//! and [`EventRepository`](cfphub_core::EventRepository) ports with `sqlx`.
//! Entry points call [`setup_database`] and hand the pool to
//! [`CoreFactory::build_repos`].

#![deny(unsafe_code)]

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

// Re-export repository implementations
pub use repositories::{SqliteEventRepository, SqlitePortalRepository};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;

// libsqlite3-sys is only linked for its bundled build
use libsqlite3_sys as _;
