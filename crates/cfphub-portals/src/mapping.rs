//! Wire model to port DTO conversions.
//!
//! Blank strings are already `null` by the time these run (see
//! [`decode_json`](crate::parsing::decode_json)); what remains is reshaping
//! and extracting social handles from whatever form each portal uses.

use std::collections::HashMap;

use cfphub_core::{Portal, PortalEventDetails, PortalSpeakerDetails, PortalTalkDetails};

use crate::models::cfp_dev::{CfpDevEvent, CfpDevSpeaker, CfpDevTalk};
use crate::models::sessionize::{SessionizeAll, SessionizeLink, SessionizeSpeaker};

// ============================================================================
// cfp.dev / Dev2Next
// ============================================================================

pub fn cfp_dev_event(event: CfpDevEvent) -> PortalEventDetails {
    PortalEventDetails {
        name: event.name,
        description: event.description,
        from_date: event.from_date,
        to_date: event.to_date,
        time_zone: event.timezone,
        website_url: event.website,
        flickr_url: event.flickr_url,
        youtube_url: event.youtube_url,
        cfp_opening: event.cfp_opening,
        cfp_closing: event.cfp_closing,
    }
}

pub fn cfp_dev_speaker(speaker: CfpDevSpeaker) -> PortalSpeakerDetails {
    PortalSpeakerDetails {
        id: speaker.id,
        first_name: speaker.first_name,
        last_name: speaker.last_name,
        company: speaker.company,
        bio: speaker.bio,
        image_url: speaker.image_url,
        twitter_handle: speaker
            .twitter_handle
            .as_deref()
            .and_then(|h| strip_social_prefix(h, TWITTER_PREFIXES)),
        linkedin_username: speaker
            .linked_in_username
            .as_deref()
            .and_then(|h| strip_social_prefix(h, LINKEDIN_PREFIXES)),
        bluesky_username: speaker
            .bluesky_username
            .as_deref()
            .and_then(|h| strip_social_prefix(h, BLUESKY_PREFIXES)),
        country: speaker.country,
    }
}

pub fn cfp_dev_talk(talk: CfpDevTalk) -> PortalTalkDetails {
    PortalTalkDetails {
        id: talk.id,
        title: talk.title,
        description: talk.description,
        summary: talk.summary,
        video_url: talk.video_url,
        speakers: talk.speakers.into_iter().map(cfp_dev_speaker).collect(),
    }
}

// ============================================================================
// Sessionize
// ============================================================================

/// Sessionize has no event endpoint. The name comes from the portal's
/// description (falling back to its name) and the dates span the sessions.
pub fn sessionize_event(portal: &Portal, doc: &SessionizeAll) -> PortalEventDetails {
    let talks = doc.sessions.iter().filter(|s| s.is_talk());
    let from_date = talks.clone().filter_map(|s| s.starts_at).min();
    let to_date = talks
        .filter_map(|s| s.ends_at.or(s.starts_at))
        .max();

    PortalEventDetails {
        name: portal
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .or_else(|| Some(portal.name.clone())),
        from_date,
        to_date,
        ..PortalEventDetails::default()
    }
}

pub fn sessionize_speaker(speaker: &SessionizeSpeaker) -> PortalSpeakerDetails {
    PortalSpeakerDetails {
        id: speaker.id.clone(),
        first_name: speaker.first_name.clone(),
        last_name: speaker.last_name.clone(),
        company: speaker.tag_line.clone(),
        bio: speaker.bio.clone(),
        image_url: speaker.profile_picture.clone(),
        twitter_handle: social_link(&speaker.links, &["twitter", "x"], TWITTER_PREFIXES),
        linkedin_username: social_link(&speaker.links, &["linkedin"], LINKEDIN_PREFIXES),
        bluesky_username: social_link(&speaker.links, &["bluesky"], BLUESKY_PREFIXES),
        country: None,
    }
}

/// Join sessions with their speakers by id. Service sessions are skipped;
/// unknown speaker ids are ignored.
pub fn sessionize_talks(doc: &SessionizeAll) -> Vec<PortalTalkDetails> {
    let speakers: HashMap<&str, PortalSpeakerDetails> = doc
        .speakers
        .iter()
        .filter_map(|s| s.id.as_deref().map(|id| (id, sessionize_speaker(s))))
        .collect();

    doc.sessions
        .iter()
        .filter(|session| session.is_talk())
        .map(|session| PortalTalkDetails {
            id: session.id.clone(),
            title: session.title.clone(),
            description: session.description.clone(),
            summary: None,
            video_url: session.recording_url.clone(),
            speakers: session
                .speakers
                .iter()
                .filter_map(|id| speakers.get(id.as_str()).cloned())
                .collect(),
        })
        .collect()
}

// ============================================================================
// Social handles
// ============================================================================

const TWITTER_PREFIXES: &[&str] = &["twitter.com/", "x.com/"];
const LINKEDIN_PREFIXES: &[&str] = &["linkedin.com/in/", "linkedin.com/company/"];
const BLUESKY_PREFIXES: &[&str] = &["bsky.app/profile/"];

/// Find a link by `linkType` (falling back to `title`), case-insensitively.
fn social_link(links: &[SessionizeLink], kinds: &[&str], prefixes: &[&str]) -> Option<String> {
    let matches = |value: Option<&str>| {
        value.is_some_and(|v| kinds.iter().any(|k| v.trim().eq_ignore_ascii_case(k)))
    };
    links
        .iter()
        .find(|link| matches(link.link_type.as_deref()) || matches(link.title.as_deref()))
        .and_then(|link| link.url.as_deref())
        .and_then(|url| strip_social_prefix(url, prefixes))
}

/// Reduce a profile URL or `@handle` to the bare handle.
///
/// Scheme and `www.` are optional; a trailing slash or query is dropped.
pub fn strip_social_prefix(value: &str, prefixes: &[&str]) -> Option<String> {
    let mut rest = value.trim();
    for prefix in ["https://", "http://", "www."].iter().chain(prefixes) {
        rest = strip_prefix_ignore_case(rest, prefix).unwrap_or(rest);
    }
    let rest = rest.strip_prefix('@').unwrap_or(rest);
    let rest = rest
        .split(['?', '#'])
        .next()
        .unwrap_or(rest)
        .trim_end_matches('/')
        .trim();

    (!rest.is_empty()).then(|| rest.to_string())
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    value
        .get(..prefix.len())
        .filter(|head| head.eq_ignore_ascii_case(prefix))
        .map(|_| &value[prefix.len()..])
}
