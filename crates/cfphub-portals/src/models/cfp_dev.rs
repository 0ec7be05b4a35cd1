//! cfp.dev public API payloads. Dev2Next serves the same shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parsing::{lenient_instant, null_as_empty, string_or_number};

/// `GET /api/public/event`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfpDevEvent {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_instant")]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_instant")]
    pub to_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "timeZone")]
    pub timezone: Option<String>,
    #[serde(default, alias = "websiteURL", alias = "websiteUrl")]
    pub website: Option<String>,
    #[serde(default, rename = "flickrURL", alias = "flickrUrl")]
    pub flickr_url: Option<String>,
    #[serde(default, rename = "youTubeURL", alias = "youtubeURL", alias = "youtubeUrl")]
    pub youtube_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_instant")]
    pub cfp_opening: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_instant")]
    pub cfp_closing: Option<DateTime<Utc>>,
}

/// Speaker as nested in talks and as returned by `/api/public/speakers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfpDevSpeaker {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, alias = "imageURL")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub twitter_handle: Option<String>,
    #[serde(default, alias = "linkedinUsername")]
    pub linked_in_username: Option<String>,
    #[serde(default, alias = "blueSkyUsername")]
    pub bluesky_username: Option<String>,
    #[serde(default, alias = "countryName")]
    pub country: Option<String>,
}

/// Talk from `/api/public/talks` or `/api/public/talks/search/{keyword}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfpDevTalk {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, rename = "videoURL", alias = "videoUrl", alias = "youTubeURL")]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub speakers: Vec<CfpDevSpeaker>,
}
