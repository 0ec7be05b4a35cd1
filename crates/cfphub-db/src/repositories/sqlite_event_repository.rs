//! `SQLite` implementation of the `EventRepository` trait.
//!
//! Graph writes run inside one transaction. Every graph is validated before
//! the transaction opens, and a failure after that rolls everything back.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use cfphub_core::{Event, EventGraph, EventRepository, Portal, RepositoryError, Talk};

use super::row_mappers::{
    EVENT_SELECT_COLUMNS, EventRow, SPEAKER_SELECT_COLUMNS, SpeakerRow, TALK_SELECT_COLUMNS,
    TalkRow, row_to_event, row_to_speaker, storage_error,
};
use super::sqlite_portal_repository::upsert_portal;

/// `SQLite` implementation of the `EventRepository` trait.
pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    /// Create a new `SQLite` event repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load_event(&self, row: EventRow) -> Result<Event, RepositoryError> {
        let talks: Vec<TalkRow> = sqlx::query_as(&format!(
            "SELECT {TALK_SELECT_COLUMNS} FROM talks WHERE event_id = ? ORDER BY position"
        ))
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let speakers: Vec<SpeakerRow> = sqlx::query_as(&format!(
            "SELECT {SPEAKER_SELECT_COLUMNS} FROM speakers WHERE event_id = ? ORDER BY position"
        ))
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let edge_rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT st.speaker_id, st.talk_id
            FROM speaker_talks st
            JOIN talks t ON t.id = st.talk_id
            WHERE t.event_id = ?
            ORDER BY t.position
            "#,
        )
        .bind(row.id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let mut edges: HashMap<i64, Vec<i64>> = HashMap::new();
        for (speaker_id, talk_id) in edge_rows {
            edges.entry(speaker_id).or_default().push(talk_id);
        }

        let speakers = speakers
            .into_iter()
            .map(|speaker| row_to_speaker(speaker, &edges))
            .collect();
        let talks = talks.into_iter().map(Talk::from).collect();
        row_to_event(row, speakers, talks)
    }
}

/// Write one validated graph. The graph's portal must exist and must not own
/// an event yet.
async fn insert_graph(
    conn: &mut SqliteConnection,
    graph: &EventGraph,
) -> Result<i64, RepositoryError> {
    let event = &graph.event;
    let event_id = sqlx::query(
        r#"
        INSERT INTO events (
            portal_name, name, description, from_date, to_date, time_zone,
            website_url, flickr_url, youtube_url, cfp_opening, cfp_closing
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&graph.portal.name)
    .bind(event.name.as_deref().unwrap_or_default().trim())
    .bind(&event.description)
    .bind(event.from_date)
    .bind(event.to_date)
    .bind(&event.time_zone)
    .bind(&event.website_url)
    .bind(&event.flickr_url)
    .bind(&event.youtube_url)
    .bind(event.cfp_opening)
    .bind(event.cfp_closing)
    .execute(&mut *conn)
    .await
    .map_err(storage_error)?
    .last_insert_rowid();

    let mut speaker_ids = Vec::with_capacity(graph.speakers.len());
    for (position, speaker) in (0_i64..).zip(&graph.speakers) {
        let id = sqlx::query(
            r#"
            INSERT INTO speakers (
                event_id, position, external_id, first_name, last_name, company, bio,
                image_url, twitter_handle, linkedin_username, bluesky_username, country
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event_id)
        .bind(position)
        .bind(&speaker.external_id)
        .bind(&speaker.first_name)
        .bind(&speaker.last_name)
        .bind(&speaker.company)
        .bind(&speaker.bio)
        .bind(&speaker.image_url)
        .bind(&speaker.twitter_handle)
        .bind(&speaker.linkedin_username)
        .bind(&speaker.bluesky_username)
        .bind(&speaker.country)
        .execute(&mut *conn)
        .await
        .map_err(storage_error)?
        .last_insert_rowid();
        speaker_ids.push(id);
    }

    let mut talk_ids = Vec::with_capacity(graph.talks.len());
    for (position, talk) in (0_i64..).zip(&graph.talks) {
        let id = sqlx::query(
            r#"
            INSERT INTO talks (event_id, position, external_id, title, description, summary, video_url)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event_id)
        .bind(position)
        .bind(&talk.external_id)
        .bind(talk.title.as_deref().unwrap_or_default().trim())
        .bind(&talk.description)
        .bind(&talk.summary)
        .bind(&talk.video_url)
        .execute(&mut *conn)
        .await
        .map_err(storage_error)?
        .last_insert_rowid();
        talk_ids.push(id);
    }

    for edge in &graph.presentations {
        let (Some(speaker_id), Some(talk_id)) =
            (speaker_ids.get(edge.speaker), talk_ids.get(edge.talk))
        else {
            return Err(RepositoryError::Constraint(format!(
                "dangling presentation {}->{} in portal '{}'",
                edge.speaker, edge.talk, graph.portal.name
            )));
        };
        sqlx::query("INSERT OR IGNORE INTO speaker_talks (speaker_id, talk_id) VALUES (?, ?)")
            .bind(speaker_id)
            .bind(talk_id)
            .execute(&mut *conn)
            .await
            .map_err(storage_error)?;
    }

    Ok(event_id)
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn list(&self) -> Result<Vec<Event>, RepositoryError> {
        let rows: Vec<EventRow> = sqlx::query_as(&format!(
            "SELECT {EVENT_SELECT_COLUMNS} FROM events e JOIN portals p ON p.name = e.portal_name ORDER BY e.id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            events.push(self.load_event(row).await?);
        }
        Ok(events)
    }

    async fn get_by_portal(&self, portal_name: &str) -> Result<Event, RepositoryError> {
        let row: EventRow = sqlx::query_as(&format!(
            "SELECT {EVENT_SELECT_COLUMNS} FROM events e JOIN portals p ON p.name = e.portal_name WHERE e.portal_name = ?"
        ))
        .bind(portal_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| RepositoryError::NotFound(format!("Event for portal '{portal_name}'")))?;

        self.load_event(row).await
    }

    async fn persist(&self, graph: &EventGraph) -> Result<Event, RepositoryError> {
        graph.validate()?;
        let portal_name = &graph.portal.name;

        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let exists: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM portals WHERE name = ?")
            .bind(portal_name)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage_error)?;
        if exists.is_none() {
            return Err(RepositoryError::NotFound(format!("Portal '{portal_name}'")));
        }

        sqlx::query("DELETE FROM events WHERE portal_name = ?")
            .bind(portal_name)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        insert_graph(&mut *tx, graph).await?;

        tx.commit().await.map_err(storage_error)?;
        self.get_by_portal(portal_name).await
    }

    async fn replace_all(
        &self,
        portals: &[Portal],
        graphs: &[EventGraph],
    ) -> Result<Vec<Event>, RepositoryError> {
        for graph in graphs {
            graph.validate()?;
        }

        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        sqlx::query("DELETE FROM portals")
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        for portal in portals {
            upsert_portal(&mut *tx, portal).await?;
        }
        for graph in graphs {
            upsert_portal(&mut *tx, &graph.portal).await?;
            insert_graph(&mut *tx, graph).await?;
        }

        tx.commit().await.map_err(storage_error)?;
        debug!(
            portals = portals.len(),
            events = graphs.len(),
            "Replaced all portal data"
        );

        self.list().await
    }
}
