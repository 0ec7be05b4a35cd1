//! Portal port DTOs.
//!
//! Flat, portal-agnostic shapes. Adapters fill them from whatever the remote
//! API returns; the normalization services turn them into domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event metadata as reported by a portal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalEventDetails {
    pub name: Option<String>,
    pub description: Option<String>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    /// Timezone as sent by the portal; not yet validated.
    pub time_zone: Option<String>,
    pub website_url: Option<String>,
    pub flickr_url: Option<String>,
    pub youtube_url: Option<String>,
    pub cfp_opening: Option<DateTime<Utc>>,
    pub cfp_closing: Option<DateTime<Utc>>,
}

/// A speaker as reported by a portal.
///
/// Social fields hold bare handles; adapters strip URL prefixes and `@`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSpeakerDetails {
    pub id: Option<String>,
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

/// A talk with its speakers nested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalTalkDetails {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub video_url: Option<String>,
    pub speakers: Vec<PortalSpeakerDetails>,
}
