//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for initializing
//! the `SQLite` database with full schema. Entry points call this with the
//! resolved database path.

use anyhow::Result;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;
use tracing::info;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// This function:
/// 1. Creates the parent directory and the database file if missing
/// 2. Enables foreign keys on every connection
/// 3. Creates all tables and indexes
///
/// # Example
///
/// ```rust,no_run
/// use cfphub_db::setup_database;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database(Path::new("data/cfphub.db")).await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let pool = SqlitePool::connect_with(
        SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .foreign_keys(true),
    )
    .await?;

    create_schema(&pool).await?;
    info!(path = %db_path.display(), "Database ready");

    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Every connection to `sqlite::memory:` is a separate database, so the pool
/// holds exactly one connection and never lets it expire.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    use sqlx::sqlite::SqlitePoolOptions;

    let options = "sqlite::memory:"
        .parse::<SqliteConnectOptions>()?
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Creates the complete database schema.
///
/// Safe to call multiple times as all statements use IF NOT EXISTS.
/// Deleting a portal cascades to its event, and from there to speakers,
/// talks and the edges between them.
pub(crate) async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS portals (
            name TEXT PRIMARY KEY NOT NULL,
            base_url TEXT NOT NULL,
            portal_type TEXT NOT NULL,
            description TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            portal_name TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT,
            from_date TEXT,
            to_date TEXT,
            time_zone TEXT,
            website_url TEXT,
            flickr_url TEXT,
            youtube_url TEXT,
            cfp_opening TEXT,
            cfp_closing TEXT,
            FOREIGN KEY (portal_name) REFERENCES portals(name) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS speakers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            external_id TEXT,
            first_name TEXT,
            last_name TEXT,
            company TEXT,
            bio TEXT,
            image_url TEXT,
            twitter_handle TEXT,
            linkedin_username TEXT,
            bluesky_username TEXT,
            country TEXT,
            FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS talks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            external_id TEXT,
            title TEXT NOT NULL,
            description TEXT,
            summary TEXT,
            video_url TEXT,
            FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS speaker_talks (
            speaker_id INTEGER NOT NULL,
            talk_id INTEGER NOT NULL,
            PRIMARY KEY (speaker_id, talk_id),
            FOREIGN KEY (speaker_id) REFERENCES speakers(id) ON DELETE CASCADE,
            FOREIGN KEY (talk_id) REFERENCES talks(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_speakers_event ON speakers(event_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_talks_event ON talks(event_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_speaker_talks_talk ON speaker_talks(talk_id)")
        .execute(pool)
        .await?;

    Ok(())
}
