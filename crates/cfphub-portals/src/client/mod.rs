//! Portal clients, one per portal type.
//!
//! Each client is generic over an HTTP backend so tests can inject canned
//! responses. Production code uses the `Default*` aliases.

mod cfp_dev;
mod dev2next;
mod sessionize;

use std::collections::HashSet;

use cfphub_core::{PortalSpeakerDetails, PortalTalkDetails};

use crate::http::ReqwestBackend;

pub use cfp_dev::CfpDevClient;
pub use dev2next::Dev2NextClient;
pub use sessionize::SessionizeClient;

// ============================================================================
// Type Aliases
// ============================================================================

pub type DefaultCfpDevClient = CfpDevClient<ReqwestBackend>;
pub type DefaultSessionizeClient = SessionizeClient<ReqwestBackend>;
pub type DefaultDev2NextClient = Dev2NextClient<ReqwestBackend>;

/// Local keyword match for portals without server-side search.
///
/// Case-insensitive substring match on title, description and summary.
pub(crate) fn talk_matches(talk: &PortalTalkDetails, keyword: &str) -> bool {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [&talk.title, &talk.description, &talk.summary]
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(&needle))
}

/// Local company match for portals without server-side speaker search.
///
/// Case-insensitive substring match, like the cfp.dev search endpoint.
pub(crate) fn speaker_matches(speaker: &PortalSpeakerDetails, company: &str) -> bool {
    let needle = company.trim().to_lowercase();
    speaker
        .company
        .as_deref()
        .is_some_and(|c| c.to_lowercase().contains(&needle))
}

/// Unique speakers across `talks`, first occurrence wins.
pub(crate) fn distinct_speakers(
    talks: Vec<PortalTalkDetails>,
) -> Vec<PortalSpeakerDetails> {
    let mut seen = HashSet::new();
    talks
        .into_iter()
        .flat_map(|talk| talk.speakers)
        .filter(|speaker| match &speaker.id {
            Some(id) => seen.insert(id.clone()),
            None => true,
        })
        .collect()
}
