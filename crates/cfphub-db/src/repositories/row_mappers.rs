//! Row types and mapping helpers for `SQLite` queries.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use cfphub_core::{Event, Portal, PortalType, RepositoryError, Speaker, Talk};
use sqlx::error::ErrorKind;

/// Shared SELECT column list for event queries.
pub const EVENT_SELECT_COLUMNS: &str = "e.id, e.portal_name, p.portal_type, e.name, e.description, e.from_date, e.to_date, e.time_zone, e.website_url, e.flickr_url, e.youtube_url, e.cfp_opening, e.cfp_closing";

pub const SPEAKER_SELECT_COLUMNS: &str = "id, external_id, first_name, last_name, company, bio, image_url, twitter_handle, linkedin_username, bluesky_username, country";

pub const TALK_SELECT_COLUMNS: &str = "id, external_id, title, description, summary, video_url";

/// Map `sqlx` errors to `RepositoryError`.
///
/// Unique and foreign-key violations become `Constraint`; everything else is
/// `Storage`.
pub fn storage_error(err: sqlx::Error) -> RepositoryError {
    if let Some(db_err) = err.as_database_error() {
        if matches!(
            db_err.kind(),
            ErrorKind::UniqueViolation | ErrorKind::ForeignKeyViolation
        ) {
            return RepositoryError::Constraint(db_err.message().to_string());
        }
    }
    RepositoryError::Storage(err.to_string())
}

#[derive(sqlx::FromRow)]
pub struct PortalRow {
    pub name: String,
    pub base_url: String,
    pub portal_type: String,
    pub description: Option<String>,
}

impl TryFrom<PortalRow> for Portal {
    type Error = RepositoryError;

    fn try_from(row: PortalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            portal_type: parse_portal_type(&row.portal_type)?,
            name: row.name,
            base_url: row.base_url,
            description: row.description,
        })
    }
}

fn parse_portal_type(raw: &str) -> Result<PortalType, RepositoryError> {
    PortalType::from_str(raw).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub id: i64,
    pub portal_name: String,
    pub portal_type: String,
    pub name: String,
    pub description: Option<String>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    pub time_zone: Option<String>,
    pub website_url: Option<String>,
    pub flickr_url: Option<String>,
    pub youtube_url: Option<String>,
    pub cfp_opening: Option<DateTime<Utc>>,
    pub cfp_closing: Option<DateTime<Utc>>,
}

#[derive(sqlx::FromRow)]
pub struct SpeakerRow {
    pub id: i64,
    pub external_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub linkedin_username: Option<String>,
    pub bluesky_username: Option<String>,
    pub country: Option<String>,
}

#[derive(sqlx::FromRow)]
pub struct TalkRow {
    pub id: i64,
    pub external_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub video_url: Option<String>,
}

impl From<TalkRow> for Talk {
    fn from(row: TalkRow) -> Self {
        Self {
            id: row.id,
            external_id: row.external_id,
            title: row.title,
            description: row.description,
            summary: row.summary,
            video_url: row.video_url,
        }
    }
}

/// Attach the talk ids from `edges` (speaker id to talk ids).
pub fn row_to_speaker(row: SpeakerRow, edges: &HashMap<i64, Vec<i64>>) -> Speaker {
    Speaker {
        talk_ids: edges.get(&row.id).cloned().unwrap_or_default(),
        id: row.id,
        external_id: row.external_id,
        first_name: row.first_name,
        last_name: row.last_name,
        company: row.company,
        bio: row.bio,
        image_url: row.image_url,
        twitter_handle: row.twitter_handle,
        linkedin_username: row.linkedin_username,
        bluesky_username: row.bluesky_username,
        country: row.country,
    }
}

/// Assemble an [`Event`] from its row and already-mapped children.
pub fn row_to_event(
    row: EventRow,
    speakers: Vec<Speaker>,
    talks: Vec<Talk>,
) -> Result<Event, RepositoryError> {
    Ok(Event {
        portal_type: parse_portal_type(&row.portal_type)?,
        id: row.id,
        portal_name: row.portal_name,
        name: row.name,
        description: row.description,
        from_date: row.from_date,
        to_date: row.to_date,
        time_zone: row.time_zone,
        website_url: row.website_url,
        flickr_url: row.flickr_url,
        youtube_url: row.youtube_url,
        cfp_opening: row.cfp_opening,
        cfp_closing: row.cfp_closing,
        speakers,
        talks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_portal_type_is_serialization_error() {
        let row = PortalRow {
            name: "devoxxuk".to_string(),
            base_url: "https://devoxxuk.cfp.dev".to_string(),
            portal_type: "PAPERCALL".to_string(),
            description: None,
        };
        let err = Portal::try_from(row).unwrap_err();
        assert!(matches!(err, RepositoryError::Serialization(_)));
    }

    #[test]
    fn test_speaker_without_edges_has_no_talks() {
        let row = SpeakerRow {
            id: 4,
            external_id: Some("42".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: None,
            company: None,
            bio: None,
            image_url: None,
            twitter_handle: None,
            linkedin_username: None,
            bluesky_username: None,
            country: None,
        };
        let edges = HashMap::from([(5, vec![9])]);
        assert!(row_to_speaker(row, &edges).talk_ids.is_empty());
    }
}
