//! cfp.dev client. Every endpoint is public and returns JSON.

use cfphub_core::{Portal, PortalEventDetails, PortalSpeakerDetails, PortalTalkDetails};

use crate::config::PortalClientConfig;
use crate::error::PortalHttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::mapping::{cfp_dev_event, cfp_dev_speaker, cfp_dev_talk};
use crate::models::cfp_dev::{CfpDevEvent, CfpDevSpeaker, CfpDevTalk};
use crate::url::{
    cfp_dev_event_url, cfp_dev_speaker_search_url, cfp_dev_speakers_url, cfp_dev_talk_search_url,
    cfp_dev_talks_url,
};

/// Client for a portal hosted on cfp.dev.
pub struct CfpDevClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) portal: Portal,
}

impl CfpDevClient<ReqwestBackend> {
    /// Create a client for `portal` with a reqwest backend.
    pub fn new(portal: Portal, config: &PortalClientConfig) -> PortalHttpResult<Self> {
        let backend = ReqwestBackend::new(&portal.name, config)?;
        Ok(Self { backend, portal })
    }
}

impl<B: HttpBackend> CfpDevClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(portal: Portal, backend: B) -> Self {
        Self { backend, portal }
    }

    fn base_url(&self) -> &str {
        self.portal.trimmed_base_url()
    }

    pub(crate) async fn get_event(&self) -> PortalHttpResult<PortalEventDetails> {
        let url = cfp_dev_event_url(self.base_url())?;
        let event: CfpDevEvent = self.backend.get_json(&url).await?;
        Ok(cfp_dev_event(event))
    }

    pub(crate) async fn get_talks(&self) -> PortalHttpResult<Vec<PortalTalkDetails>> {
        let url = cfp_dev_talks_url(self.base_url())?;
        self.get_talk_list(&url).await
    }

    pub(crate) async fn get_talks_matching(
        &self,
        keyword: &str,
    ) -> PortalHttpResult<Vec<PortalTalkDetails>> {
        let url = cfp_dev_talk_search_url(self.base_url(), keyword)?;
        self.get_talk_list(&url).await
    }

    pub(crate) async fn get_speakers(&self) -> PortalHttpResult<Vec<PortalSpeakerDetails>> {
        let url = cfp_dev_speakers_url(self.base_url())?;
        self.get_speaker_list(&url).await
    }

    pub(crate) async fn get_speakers_at(
        &self,
        company: &str,
    ) -> PortalHttpResult<Vec<PortalSpeakerDetails>> {
        let url = cfp_dev_speaker_search_url(self.base_url(), company)?;
        self.get_speaker_list(&url).await
    }

    // A `null` body is an empty list.
    async fn get_talk_list(&self, url: &url::Url) -> PortalHttpResult<Vec<PortalTalkDetails>> {
        let talks: Option<Vec<CfpDevTalk>> = self.backend.get_json(url).await?;
        Ok(talks.unwrap_or_default().into_iter().map(cfp_dev_talk).collect())
    }

    async fn get_speaker_list(
        &self,
        url: &url::Url,
    ) -> PortalHttpResult<Vec<PortalSpeakerDetails>> {
        let speakers: Option<Vec<CfpDevSpeaker>> = self.backend.get_json(url).await?;
        Ok(speakers
            .unwrap_or_default()
            .into_iter()
            .map(cfp_dev_speaker)
            .collect())
    }
}
