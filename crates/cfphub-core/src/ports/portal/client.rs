//! Portal client port trait.

use super::error::PortalResult;
use super::types::{PortalEventDetails, PortalSpeakerDetails, PortalTalkDetails};
use async_trait::async_trait;

/// Port trait for one external CFP portal.
///
/// One implementation exists per [`PortalType`](crate::domain::PortalType).
/// Implementations return core-owned DTOs that have already been through the
/// blank-string pass, so callers never see `Some("")`.
///
/// Portals without server-side search fall back to fetching everything and
/// filtering locally; the caller cannot tell the difference.
#[async_trait]
pub trait PortalClientPort: Send + Sync {
    /// Name of the portal this client talks to.
    fn portal_name(&self) -> &str;

    /// Fetch the event metadata.
    async fn fetch_event_details(&self) -> PortalResult<PortalEventDetails>;

    /// Fetch every talk with its speakers nested.
    async fn fetch_all_talks(&self) -> PortalResult<Vec<PortalTalkDetails>>;

    /// Fetch talks matching `keyword`.
    async fn search_talks(&self, keyword: &str) -> PortalResult<Vec<PortalTalkDetails>>;

    /// Fetch every speaker of the event.
    async fn fetch_speakers(&self) -> PortalResult<Vec<PortalSpeakerDetails>>;

    /// Fetch speakers working for `company`.
    async fn search_speakers(&self, company: &str) -> PortalResult<Vec<PortalSpeakerDetails>>;
}
