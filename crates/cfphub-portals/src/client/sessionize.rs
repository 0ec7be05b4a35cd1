//! Sessionize client.
//!
//! The public API exposes one `view/All` document per event. Every operation
//! fetches it and works locally; there is no server-side search.

use cfphub_core::{Portal, PortalEventDetails, PortalSpeakerDetails, PortalTalkDetails};

use crate::config::PortalClientConfig;
use crate::error::PortalHttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::mapping::{sessionize_event, sessionize_speaker, sessionize_talks};
use crate::models::sessionize::SessionizeAll;
use crate::url::sessionize_all_url;

/// Client for an event published on Sessionize.
///
/// The portal name doubles as the Sessionize event id in the URL.
pub struct SessionizeClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) portal: Portal,
}

impl SessionizeClient<ReqwestBackend> {
    /// Create a client for `portal` with a reqwest backend.
    pub fn new(portal: Portal, config: &PortalClientConfig) -> PortalHttpResult<Self> {
        let backend = ReqwestBackend::new(&portal.name, config)?;
        Ok(Self { backend, portal })
    }
}

impl<B: HttpBackend> SessionizeClient<B> {
    #[cfg(test)]
    pub(crate) const fn with_backend(portal: Portal, backend: B) -> Self {
        Self { backend, portal }
    }

    async fn get_all(&self) -> PortalHttpResult<SessionizeAll> {
        let url = sessionize_all_url(self.portal.trimmed_base_url(), &self.portal.name)?;
        let doc: Option<SessionizeAll> = self.backend.get_json(&url).await?;
        Ok(doc.unwrap_or_default())
    }

    pub(crate) async fn get_event(&self) -> PortalHttpResult<PortalEventDetails> {
        let doc = self.get_all().await?;
        Ok(sessionize_event(&self.portal, &doc))
    }

    pub(crate) async fn get_talks(&self) -> PortalHttpResult<Vec<PortalTalkDetails>> {
        Ok(sessionize_talks(&self.get_all().await?))
    }

    pub(crate) async fn get_speakers(&self) -> PortalHttpResult<Vec<PortalSpeakerDetails>> {
        let doc = self.get_all().await?;
        Ok(doc.speakers.iter().map(sessionize_speaker).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use cfphub_core::PortalType;
    use serde_json::json;

    fn portal() -> Portal {
        Portal::new("jfall-2025", "https://sessionize.com", PortalType::Sessionize)
            .with_description("J-Fall 2025")
    }

    fn document() -> serde_json::Value {
        json!({
            "sessions": [
                {
                    "id": "901",
                    "title": "Records all the way down",
                    "startsAt": "2025-11-06T09:00:00",
                    "endsAt": "2025-11-06T09:50:00",
                    "speakers": ["a-1"]
                },
                {
                    "id": "902",
                    "title": "Lunch",
                    "isServiceSession": true,
                    "startsAt": "2025-11-06T12:00:00",
                    "speakers": []
                }
            ],
            "speakers": [
                {
                    "id": "a-1",
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "tagLine": "Analytical Engines Ltd",
                    "links": [
                        {"title": "X (Twitter)", "url": "https://twitter.com/ada", "linkType": "Twitter"}
                    ]
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_talks_are_joined_with_speakers() {
        let backend = FakeBackend::new().with_json("/api/v2/jfall-2025/view/All", document());
        let client = SessionizeClient::with_backend(portal(), backend);

        let talks = client.get_talks().await.unwrap();
        assert_eq!(talks.len(), 1);
        let speaker = &talks[0].speakers[0];
        assert_eq!(speaker.company.as_deref(), Some("Analytical Engines Ltd"));
        assert_eq!(speaker.twitter_handle.as_deref(), Some("ada"));
        assert_eq!(
            client.backend.requested(),
            vec!["https://sessionize.com/api/v2/jfall-2025/view/All"]
        );
    }

    #[tokio::test]
    async fn test_event_is_derived_from_document() {
        let backend = FakeBackend::new().with_json("/view/All", document());
        let client = SessionizeClient::with_backend(portal(), backend);

        let event = client.get_event().await.unwrap();
        assert_eq!(event.name.as_deref(), Some("J-Fall 2025"));
        assert_eq!(event.from_date, Some("2025-11-06T09:00:00Z".parse().unwrap()));
        assert_eq!(event.to_date, Some("2025-11-06T09:50:00Z".parse().unwrap()));
        assert_eq!(event.time_zone, None);
    }

    #[tokio::test]
    async fn test_speakers_from_document() {
        let backend = FakeBackend::new().with_json("/view/All", document());
        let client = SessionizeClient::with_backend(portal(), backend);

        let speakers = client.get_speakers().await.unwrap();
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].last_name.as_deref(), Some("Lovelace"));
    }
}
