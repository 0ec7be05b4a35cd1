//! Port trait implementations for the portal clients.
//!
//! This module implements the core-owned `PortalClientPort` trait for every
//! client type and maps internal `PortalHttpError`s to core `PortalError`s.
//! Operations a portal has no endpoint for are answered locally.

use async_trait::async_trait;
use cfphub_core::{
    PortalClientPort, PortalError, PortalEventDetails, PortalResult, PortalSpeakerDetails,
    PortalTalkDetails,
};

use crate::client::{
    distinct_speakers, speaker_matches, talk_matches, CfpDevClient, Dev2NextClient,
    SessionizeClient,
};
use crate::error::PortalHttpError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `PortalHttpError` to core `PortalError`.
fn map_error(err: PortalHttpError) -> PortalError {
    match err {
        PortalHttpError::ApiRequestFailed { status, url } => PortalError::Http { status, url },
        PortalHttpError::JsonParse(e) => PortalError::InvalidResponse {
            message: e.to_string(),
        },
        PortalHttpError::Network(e) => match e.status() {
            Some(status) => PortalError::Http {
                status: status.as_u16(),
                url: e.url().map(ToString::to_string).unwrap_or_default(),
            },
            None => PortalError::Network {
                message: e.to_string(),
            },
        },
        PortalHttpError::InvalidUrl(e) => PortalError::Configuration {
            message: e.to_string(),
        },
        PortalHttpError::ClientBuild(message) => PortalError::Configuration { message },
    }
}

fn filter_talks(talks: Vec<PortalTalkDetails>, keyword: &str) -> Vec<PortalTalkDetails> {
    talks
        .into_iter()
        .filter(|talk| talk_matches(talk, keyword))
        .collect()
}

fn filter_speakers(speakers: Vec<PortalSpeakerDetails>, company: &str) -> Vec<PortalSpeakerDetails> {
    speakers
        .into_iter()
        .filter(|speaker| speaker_matches(speaker, company))
        .collect()
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> PortalClientPort for CfpDevClient<B> {
    fn portal_name(&self) -> &str {
        &self.portal.name
    }

    async fn fetch_event_details(&self) -> PortalResult<PortalEventDetails> {
        self.get_event().await.map_err(map_error)
    }

    async fn fetch_all_talks(&self) -> PortalResult<Vec<PortalTalkDetails>> {
        self.get_talks().await.map_err(map_error)
    }

    async fn search_talks(&self, keyword: &str) -> PortalResult<Vec<PortalTalkDetails>> {
        self.get_talks_matching(keyword).await.map_err(map_error)
    }

    async fn fetch_speakers(&self) -> PortalResult<Vec<PortalSpeakerDetails>> {
        self.get_speakers().await.map_err(map_error)
    }

    async fn search_speakers(&self, company: &str) -> PortalResult<Vec<PortalSpeakerDetails>> {
        self.get_speakers_at(company).await.map_err(map_error)
    }
}

#[async_trait]
impl<B: HttpBackend + Send + Sync> PortalClientPort for SessionizeClient<B> {
    fn portal_name(&self) -> &str {
        &self.portal.name
    }

    async fn fetch_event_details(&self) -> PortalResult<PortalEventDetails> {
        self.get_event().await.map_err(map_error)
    }

    async fn fetch_all_talks(&self) -> PortalResult<Vec<PortalTalkDetails>> {
        self.get_talks().await.map_err(map_error)
    }

    async fn search_talks(&self, keyword: &str) -> PortalResult<Vec<PortalTalkDetails>> {
        let talks = self.get_talks().await.map_err(map_error)?;
        Ok(filter_talks(talks, keyword))
    }

    async fn fetch_speakers(&self) -> PortalResult<Vec<PortalSpeakerDetails>> {
        self.get_speakers().await.map_err(map_error)
    }

    async fn search_speakers(&self, company: &str) -> PortalResult<Vec<PortalSpeakerDetails>> {
        let speakers = self.get_speakers().await.map_err(map_error)?;
        Ok(filter_speakers(speakers, company))
    }
}

#[async_trait]
impl<B: HttpBackend + Send + Sync> PortalClientPort for Dev2NextClient<B> {
    fn portal_name(&self) -> &str {
        &self.portal().name
    }

    async fn fetch_event_details(&self) -> PortalResult<PortalEventDetails> {
        self.get_event().await.map_err(map_error)
    }

    async fn fetch_all_talks(&self) -> PortalResult<Vec<PortalTalkDetails>> {
        self.get_talks().await.map_err(map_error)
    }

    async fn search_talks(&self, keyword: &str) -> PortalResult<Vec<PortalTalkDetails>> {
        let talks = self.get_talks().await.map_err(map_error)?;
        Ok(filter_talks(talks, keyword))
    }

    // No speaker endpoint: speakers are collected from the talks.
    async fn fetch_speakers(&self) -> PortalResult<Vec<PortalSpeakerDetails>> {
        let talks = self.get_talks().await.map_err(map_error)?;
        Ok(distinct_speakers(talks))
    }

    async fn search_speakers(&self, company: &str) -> PortalResult<Vec<PortalSpeakerDetails>> {
        let speakers = self.fetch_speakers().await?;
        Ok(filter_speakers(speakers, company))
    }
}
