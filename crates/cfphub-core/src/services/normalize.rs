//! Portal DTO to domain mappers.
//!
//! Pure functions: no I/O, no failures on missing optional fields. Every
//! string goes through [`normalize_blank`] so `""` and a missing value end up
//! identical.

use chrono_tz::Tz;
use tracing::warn;

use crate::domain::{NewEvent, NewSpeaker, NewTalk};
use crate::ports::{PortalEventDetails, PortalSpeakerDetails, PortalTalkDetails};
use crate::utils::text::normalize_blank;

/// Map event metadata. Unknown timezones are dropped with a warning.
pub fn map_event(details: &PortalEventDetails) -> NewEvent {
    NewEvent {
        name: normalize_blank(details.name.as_deref()),
        description: normalize_blank(details.description.as_deref()),
        from_date: details.from_date,
        to_date: details.to_date,
        time_zone: normalize_time_zone(details.time_zone.as_deref()),
        website_url: normalize_blank(details.website_url.as_deref()),
        flickr_url: normalize_blank(details.flickr_url.as_deref()),
        youtube_url: normalize_blank(details.youtube_url.as_deref()),
        cfp_opening: details.cfp_opening,
        cfp_closing: details.cfp_closing,
    }
}

pub fn map_speaker(details: &PortalSpeakerDetails) -> NewSpeaker {
    NewSpeaker {
        external_id: normalize_blank(details.id.as_deref()),
        first_name: normalize_blank(details.first_name.as_deref()),
        last_name: normalize_blank(details.last_name.as_deref()),
        company: normalize_blank(details.company.as_deref()),
        bio: normalize_blank(details.bio.as_deref()),
        image_url: normalize_blank(details.image_url.as_deref()),
        twitter_handle: normalize_handle(details.twitter_handle.as_deref()),
        linkedin_username: normalize_handle(details.linkedin_username.as_deref()),
        bluesky_username: normalize_handle(details.bluesky_username.as_deref()),
        country: normalize_blank(details.country.as_deref()),
    }
}

/// Map a talk without its speakers; edges are added during assembly.
pub fn map_talk(details: &PortalTalkDetails) -> NewTalk {
    NewTalk {
        external_id: normalize_blank(details.id.as_deref()),
        title: normalize_blank(details.title.as_deref()),
        description: normalize_blank(details.description.as_deref()),
        summary: normalize_blank(details.summary.as_deref()),
        video_url: normalize_blank(details.video_url.as_deref()),
    }
}

/// Canonical IANA id for `value`, or `None` if it is blank or unknown.
pub fn normalize_time_zone(value: Option<&str>) -> Option<String> {
    let value = normalize_blank(value)?;
    match value.parse::<Tz>() {
        Ok(tz) => Some(tz.name().to_string()),
        Err(_) => {
            warn!(target: "cfphub.aggregation", time_zone = %value, "Ignoring unknown timezone");
            None
        }
    }
}

fn normalize_handle(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    normalize_blank(Some(value.strip_prefix('@').unwrap_or(value)))
}
