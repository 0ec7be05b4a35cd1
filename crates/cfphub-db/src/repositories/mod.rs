//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_event_repository;
mod sqlite_portal_repository;

pub use sqlite_event_repository::SqliteEventRepository;
pub use sqlite_portal_repository::SqlitePortalRepository;
