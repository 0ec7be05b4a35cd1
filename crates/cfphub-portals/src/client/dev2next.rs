//! Dev2Next client.
//!
//! Dev2Next serves cfp.dev-compatible event and talk payloads but has no
//! search or speaker endpoints.

use cfphub_core::{Portal, PortalEventDetails, PortalTalkDetails};

use super::cfp_dev::CfpDevClient;
use crate::config::PortalClientConfig;
use crate::error::PortalHttpResult;
use crate::http::{HttpBackend, ReqwestBackend};

/// Client for a Dev2Next portal.
pub struct Dev2NextClient<B: HttpBackend> {
    pub(crate) inner: CfpDevClient<B>,
}

impl Dev2NextClient<ReqwestBackend> {
    /// Create a client for `portal` with a reqwest backend.
    pub fn new(portal: Portal, config: &PortalClientConfig) -> PortalHttpResult<Self> {
        Ok(Self {
            inner: CfpDevClient::new(portal, config)?,
        })
    }
}

impl<B: HttpBackend> Dev2NextClient<B> {
    #[cfg(test)]
    pub(crate) const fn with_backend(portal: Portal, backend: B) -> Self {
        Self {
            inner: CfpDevClient::with_backend(portal, backend),
        }
    }

    pub(crate) fn portal(&self) -> &Portal {
        &self.inner.portal
    }

    pub(crate) async fn get_event(&self) -> PortalHttpResult<PortalEventDetails> {
        self.inner.get_event().await
    }

    pub(crate) async fn get_talks(&self) -> PortalHttpResult<Vec<PortalTalkDetails>> {
        self.inner.get_talks().await
    }
}
