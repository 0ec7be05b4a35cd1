//! URL construction helpers for portal APIs.
//!
//! Pure functions; the base URL comes from portal configuration and may
//! carry a path prefix or a trailing slash.

use url::Url;

use crate::error::PortalHttpResult;

fn endpoint(base_url: &str, path: &str) -> PortalHttpResult<Url> {
    let base = base_url.trim().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}{path}"))?)
}

pub fn cfp_dev_event_url(base_url: &str) -> PortalHttpResult<Url> {
    endpoint(base_url, "/api/public/event")
}

pub fn cfp_dev_talks_url(base_url: &str) -> PortalHttpResult<Url> {
    endpoint(base_url, "/api/public/talks")
}

/// Server-side talk search; `keyword` is percent-encoded as a path segment.
pub fn cfp_dev_talk_search_url(base_url: &str, keyword: &str) -> PortalHttpResult<Url> {
    endpoint(
        base_url,
        &format!("/api/public/talks/search/{}", urlencoding::encode(keyword)),
    )
}

pub fn cfp_dev_speakers_url(base_url: &str) -> PortalHttpResult<Url> {
    endpoint(base_url, "/api/public/speakers")
}

pub fn cfp_dev_speaker_search_url(base_url: &str, company: &str) -> PortalHttpResult<Url> {
    endpoint(
        base_url,
        &format!("/api/public/speakers/search/{}", urlencoding::encode(company)),
    )
}

/// Sessionize `view/All` document for the event published as `portal_name`.
pub fn sessionize_all_url(base_url: &str, portal_name: &str) -> PortalHttpResult<Url> {
    endpoint(
        base_url,
        &format!("/api/v2/{}/view/All", urlencoding::encode(portal_name)),
    )
}
