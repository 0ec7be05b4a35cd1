//! `SQLite` implementation of the `PortalRepository` trait.

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

use cfphub_core::{Portal, PortalRepository, RepositoryError};

use super::row_mappers::{PortalRow, storage_error};

/// `SQLite` implementation of the `PortalRepository` trait.
pub struct SqlitePortalRepository {
    pool: SqlitePool,
}

impl SqlitePortalRepository {
    /// Create a new `SQLite` portal repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Insert or update a portal on an open connection.
///
/// `ON CONFLICT DO UPDATE` rewrites the row in place, so the portal's event
/// survives.
pub(crate) async fn upsert_portal(
    conn: &mut SqliteConnection,
    portal: &Portal,
) -> Result<(), RepositoryError> {
    sqlx::query(
        r#"
        INSERT INTO portals (name, base_url, portal_type, description)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(name) DO UPDATE SET
            base_url = excluded.base_url,
            portal_type = excluded.portal_type,
            description = excluded.description
        "#,
    )
    .bind(&portal.name)
    .bind(&portal.base_url)
    .bind(portal.portal_type.as_str())
    .bind(&portal.description)
    .execute(conn)
    .await
    .map_err(storage_error)?;
    Ok(())
}

#[async_trait]
impl PortalRepository for SqlitePortalRepository {
    async fn list(&self) -> Result<Vec<Portal>, RepositoryError> {
        let rows: Vec<PortalRow> = sqlx::query_as(
            "SELECT name, base_url, portal_type, description FROM portals ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(Portal::try_from).collect()
    }

    async fn get_by_name(&self, name: &str) -> Result<Portal, RepositoryError> {
        let row: PortalRow = sqlx::query_as(
            "SELECT name, base_url, portal_type, description FROM portals WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| RepositoryError::NotFound(format!("Portal '{name}'")))?;

        Portal::try_from(row)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM portals")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(count.unsigned_abs())
    }

    async fn upsert(&self, portal: &Portal) -> Result<Portal, RepositoryError> {
        let mut conn = self.pool.acquire().await.map_err(storage_error)?;
        upsert_portal(&mut *conn, portal).await?;
        drop(conn);
        self.get_by_name(&portal.name).await
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portals WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Portal '{name}'")));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM portals")
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}
