//! Sessionize `view/All` payload.
//!
//! One document carries every session and every speaker; sessions refer to
//! speakers by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parsing::{lenient_instant, null_as_empty, string_or_number, string_or_number_list};

/// `GET /api/v2/{event}/view/All`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionizeAll {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sessions: Vec<SessionizeSession>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub speakers: Vec<SessionizeSpeaker>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionizeSession {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_instant")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_instant")]
    pub ends_at: Option<DateTime<Utc>>,
    /// Breaks, lunches and other non-talk slots.
    #[serde(default)]
    pub is_service_session: Option<bool>,
    #[serde(default)]
    pub recording_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_number_list")]
    pub speakers: Vec<String>,
}

impl SessionizeSession {
    /// A missing or `null` service flag counts as a talk.
    pub fn is_talk(&self) -> bool {
        !self.is_service_session.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionizeSpeaker {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Free-text line under the name; conventionally the company.
    #[serde(default)]
    pub tag_line: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub links: Vec<SessionizeLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionizeLink {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub link_type: Option<String>,
}
