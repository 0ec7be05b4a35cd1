//! Multi-portal aggregation.
//!
//! One pipeline per portal (event details, filtered talks, normalization,
//! assembly) runs on its own task. The join is fail-fast and bounded by
//! `request_timeout × portal count`. Nothing is written unless every pipeline
//! succeeds, and then everything is written in one transaction.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use futures_util::future::try_join_all;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{Mutex, watch};
use tracing::{error, info};

use super::assembly::assemble_graph;
use super::normalize::map_event;
use super::search_filter::filter_talks;
use crate::domain::{EventGraph, Portal, TalkSearchCriteria, ValidationError};
use crate::ports::{
    EventRepository, PortalClientFactory, PortalClientPort, PortalError, PortalRepository,
    RepositoryError,
};

/// An aggregation run did not complete. The store is unchanged.
#[derive(Debug, Error)]
pub enum AggregationError {
    /// The first portal pipeline to fail.
    #[error("Portal '{portal}' failed: {source}")]
    Portal {
        portal: String,
        #[source]
        source: PortalError,
    },

    /// The run exceeded `request_timeout × portal count`.
    #[error("Aggregation of {portals} portal(s) timed out after {}s", after.as_secs_f64())]
    Timeout { portals: usize, after: Duration },

    /// An assembled graph failed its required-field checks.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Writing the graphs failed.
    #[error("Failed to persist events: {0}")]
    Storage(#[source] RepositoryError),

    /// A pipeline task panicked or was cancelled.
    #[error("Aggregation task failed: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AggregationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Invalid(invalid) => Self::Invalid(invalid),
            other => Self::Storage(other),
        }
    }
}

/// Phase of the current aggregation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregationState {
    #[default]
    Idle,
    Fetching,
    Persisting,
}

/// Per-portal counts of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSummary {
    pub portal: String,
    pub speakers: usize,
    pub talks: usize,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationSummary {
    pub portals: Vec<PortalSummary>,
    pub total_speakers: usize,
    pub total_talks: usize,
    pub duration_ms: u64,
    pub finished_at: DateTime<Utc>,
}

impl AggregationSummary {
    fn from_graphs(graphs: &[EventGraph], started: Instant) -> Self {
        let portals: Vec<PortalSummary> = graphs
            .iter()
            .map(|graph| PortalSummary {
                portal: graph.portal.name.clone(),
                speakers: graph.speakers.len(),
                talks: graph.talks.len(),
            })
            .collect();
        Self {
            total_speakers: portals.iter().map(|p| p.speakers).sum(),
            total_talks: portals.iter().map(|p| p.talks).sum(),
            portals,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            finished_at: Utc::now(),
        }
    }
}

/// Observable status: current phase plus the outcome of the last run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationStatus {
    pub state: AggregationState,
    pub last_summary: Option<AggregationSummary>,
    pub last_error: Option<String>,
}

/// Runs aggregation and owns the "one writer at a time" rule.
pub struct AggregationService {
    portals: Arc<dyn PortalRepository>,
    events: Arc<dyn EventRepository>,
    clients: Arc<dyn PortalClientFactory>,
    request_timeout: Duration,
    write_lock: Arc<Mutex<()>>,
    status: watch::Sender<AggregationStatus>,
}

impl AggregationService {
    pub fn new(
        portals: Arc<dyn PortalRepository>,
        events: Arc<dyn EventRepository>,
        clients: Arc<dyn PortalClientFactory>,
        request_timeout: Duration,
    ) -> Self {
        let (status, _) = watch::channel(AggregationStatus::default());
        Self {
            portals,
            events,
            clients,
            request_timeout,
            write_lock: Arc::new(Mutex::new(())),
            status,
        }
    }

    /// Lock held for the duration of every write run. Portal CRUD takes it
    /// too so an edit cannot land between reading and replacing the portals.
    pub(crate) fn write_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.write_lock)
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> AggregationStatus {
        self.status.borrow().clone()
    }

    /// Receiver that sees every status change.
    pub fn subscribe(&self) -> watch::Receiver<AggregationStatus> {
        self.status.subscribe()
    }

    /// Re-aggregate every stored portal with `criteria`.
    ///
    /// Existing events are replaced; the portal list itself is kept.
    pub async fn create_events(
        &self,
        criteria: &TalkSearchCriteria,
    ) -> Result<AggregationSummary, AggregationError> {
        let _guard = self.write_lock.lock().await;
        let portals = self.portals.list().await?;
        self.run(portals, criteria).await
    }

    /// Drop every stored portal and aggregate `portals` from scratch.
    ///
    /// Used by the startup reload. The delete and the inserts share one
    /// transaction, so a failed run leaves the previous data in place.
    pub async fn recreate_events(
        &self,
        portals: Vec<Portal>,
        criteria: &TalkSearchCriteria,
    ) -> Result<AggregationSummary, AggregationError> {
        let _guard = self.write_lock.lock().await;
        self.run(portals, criteria).await
    }

    async fn run(
        &self,
        portals: Vec<Portal>,
        criteria: &TalkSearchCriteria,
    ) -> Result<AggregationSummary, AggregationError> {
        let started = Instant::now();
        info!(
            target: "cfphub.aggregation",
            portals = portals.len(),
            keywords = criteria.talk_keywords().len(),
            companies = criteria.speaker_companies().len(),
            "Starting aggregation"
        );

        self.set_state(AggregationState::Fetching);
        let result = self.fetch_and_persist(&portals, criteria, started).await;

        match &result {
            Ok(summary) => {
                for portal in &summary.portals {
                    info!(
                        target: "cfphub.aggregation",
                        portal = %portal.portal,
                        speakers = portal.speakers,
                        talks = portal.talks,
                        "Portal aggregated"
                    );
                }
                info!(
                    target: "cfphub.aggregation",
                    duration_ms = summary.duration_ms,
                    speakers = summary.total_speakers,
                    talks = summary.total_talks,
                    "Aggregation finished"
                );
                let summary = summary.clone();
                self.status.send_modify(|status| {
                    status.state = AggregationState::Idle;
                    status.last_summary = Some(summary);
                    status.last_error = None;
                });
            }
            Err(e) => {
                error!(
                    target: "cfphub.aggregation",
                    error = %e,
                    duration_ms = started.elapsed().as_millis(),
                    "Aggregation aborted"
                );
                let message = e.to_string();
                self.status.send_modify(|status| {
                    status.state = AggregationState::Idle;
                    status.last_error = Some(message);
                });
            }
        }

        result
    }

    async fn fetch_and_persist(
        &self,
        portals: &[Portal],
        criteria: &TalkSearchCriteria,
        started: Instant,
    ) -> Result<AggregationSummary, AggregationError> {
        let graphs = self.fetch_all(portals, criteria).await?;

        self.set_state(AggregationState::Persisting);
        self.events.replace_all(portals, &graphs).await?;

        Ok(AggregationSummary::from_graphs(&graphs, started))
    }

    /// Fan out one task per portal and wait for all of them, or the first
    /// failure, or the deadline. Tasks still running when this returns are
    /// left to finish on their own; their results are dropped.
    async fn fetch_all(
        &self,
        portals: &[Portal],
        criteria: &TalkSearchCriteria,
    ) -> Result<Vec<EventGraph>, AggregationError> {
        if portals.is_empty() {
            return Ok(Vec::new());
        }

        let criteria = Arc::new(criteria.clone());
        let mut handles = Vec::with_capacity(portals.len());
        for portal in portals {
            let client = self
                .clients
                .client_for(portal)
                .map_err(|source| AggregationError::Portal {
                    portal: portal.name.clone(),
                    source,
                })?;
            let portal = portal.clone();
            let criteria = Arc::clone(&criteria);
            let handle = tokio::spawn(async move {
                run_pipeline(client.as_ref(), portal, &criteria).await
            });
            handles.push(handle.map(|joined| match joined {
                Ok(result) => result,
                Err(e) => Err(AggregationError::Internal(e.to_string())),
            }));
        }

        let deadline = deadline_for(self.request_timeout, portals.len());
        tokio::time::timeout(deadline, try_join_all(handles))
            .await
            .map_err(|_| AggregationError::Timeout {
                portals: portals.len(),
                after: deadline,
            })?
    }

    fn set_state(&self, state: AggregationState) {
        self.status.send_modify(|status| status.state = state);
    }
}

/// `request_timeout × portal_count`, saturating.
pub fn deadline_for(request_timeout: Duration, portal_count: usize) -> Duration {
    u32::try_from(portal_count)
        .ok()
        .and_then(|n| request_timeout.checked_mul(n))
        .unwrap_or(Duration::MAX)
}

async fn run_pipeline(
    client: &dyn PortalClientPort,
    portal: Portal,
    criteria: &TalkSearchCriteria,
) -> Result<EventGraph, AggregationError> {
    let portal_error = |source| AggregationError::Portal {
        portal: portal.name.clone(),
        source,
    };

    let details = client.fetch_event_details().await.map_err(portal_error)?;
    let talks = filter_talks(client, criteria).await.map_err(portal_error)?;

    let event = map_event(&details);
    Ok(assemble_graph(portal, event, &talks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_scales_with_portal_count() {
        assert_eq!(deadline_for(Duration::from_secs(5), 3), Duration::from_secs(15));
        assert_eq!(deadline_for(Duration::from_secs(5), 0), Duration::ZERO);
        assert_eq!(deadline_for(Duration::MAX, 2), Duration::MAX);
    }

    #[test]
    fn test_validation_error_is_not_wrapped_as_storage() {
        let err: AggregationError =
            RepositoryError::Invalid(ValidationError::new("p", "event", "name is required"))
                .into();
        assert!(matches!(err, AggregationError::Invalid(_)));

        let err: AggregationError = RepositoryError::Storage("disk full".to_string()).into();
        assert!(matches!(err, AggregationError::Storage(_)));
    }

    #[test]
    fn test_summary_totals() {
        let portal = Portal::new("p", "https://p.dev", crate::domain::PortalType::CfpDev);
        let mut graph = EventGraph::new(portal, crate::domain::NewEvent::default());
        graph.speakers = vec![Default::default(), Default::default()];
        graph.talks = vec![Default::default()];

        let summary = AggregationSummary::from_graphs(&[graph.clone(), graph], Instant::now());
        assert_eq!(summary.portals.len(), 2);
        assert_eq!(summary.total_speakers, 4);
        assert_eq!(summary.total_talks, 2);
    }
}
