//! Integration tests for the aggregation orchestrator.
//!
//! Runs the full fetch, filter, assemble, persist flow against in-memory
//! ports. The store double applies `replace_all` as one swap, mirroring the
//! transactional SQLite implementation.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cfphub_core::{
    AggregationError, AggregationState, AppCore, Event, EventGraph, EventRepository, EventSort,
    Portal, PortalClientFactory, PortalClientPort, PortalError, PortalEventDetails,
    PortalRepository, PortalResult, PortalSpeakerDetails, PortalTalkDetails, PortalType, Repos,
    RepositoryError, TalkSearchCriteria,
};

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct StoreState {
    portals: BTreeMap<String, Portal>,
    events: BTreeMap<String, Event>,
    next_id: i64,
}

#[derive(Default)]
struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    fn seed(&self, portal: Portal, event_name: &str) {
        let mut state = self.state.lock().unwrap();
        state.events.insert(
            portal.name.clone(),
            stored_event(&portal, event_name, 1_000),
        );
        state.portals.insert(portal.name.clone(), portal);
    }

    fn event_names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.events.values().map(|e| e.name.clone()).collect()
    }

    fn portal_names(&self) -> Vec<String> {
        self.state.lock().unwrap().portals.keys().cloned().collect()
    }
}

fn stored_event(portal: &Portal, name: &str, id: i64) -> Event {
    Event {
        id,
        portal_name: portal.name.clone(),
        portal_type: portal.portal_type,
        name: name.to_string(),
        description: None,
        from_date: None,
        to_date: None,
        time_zone: None,
        website_url: None,
        flickr_url: None,
        youtube_url: None,
        cfp_opening: None,
        cfp_closing: None,
        speakers: vec![],
        talks: vec![],
    }
}

#[async_trait]
impl PortalRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Portal>, RepositoryError> {
        Ok(self.state.lock().unwrap().portals.values().cloned().collect())
    }

    async fn get_by_name(&self, name: &str) -> Result<Portal, RepositoryError> {
        self.state
            .lock()
            .unwrap()
            .portals
            .get(name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.state.lock().unwrap().portals.len() as u64)
    }

    async fn upsert(&self, portal: &Portal) -> Result<Portal, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.portals.insert(portal.name.clone(), portal.clone());
        Ok(portal.clone())
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.events.remove(name);
        state
            .portals
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.portals.clear();
        state.events.clear();
        Ok(())
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Event>, RepositoryError> {
        Ok(self.state.lock().unwrap().events.values().cloned().collect())
    }

    async fn get_by_portal(&self, portal_name: &str) -> Result<Event, RepositoryError> {
        self.state
            .lock()
            .unwrap()
            .events
            .get(portal_name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(portal_name.to_string()))
    }

    async fn persist(&self, graph: &EventGraph) -> Result<Event, RepositoryError> {
        graph.validate()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let event = stored_event(
            &graph.portal,
            graph.event.name.as_deref().unwrap_or_default(),
            state.next_id,
        );
        state.events.insert(graph.portal.name.clone(), event.clone());
        Ok(event)
    }

    async fn replace_all(
        &self,
        portals: &[Portal],
        graphs: &[EventGraph],
    ) -> Result<Vec<Event>, RepositoryError> {
        for graph in graphs {
            graph.validate()?;
        }
        let mut state = self.state.lock().unwrap();
        let mut next = StoreState {
            next_id: state.next_id,
            ..StoreState::default()
        };
        for portal in portals {
            next.portals.insert(portal.name.clone(), portal.clone());
        }
        let mut events = Vec::new();
        for graph in graphs {
            next.next_id += 1;
            let mut event = stored_event(
                &graph.portal,
                graph.event.name.as_deref().unwrap_or_default(),
                next.next_id,
            );
            event.talks = graph
                .talks
                .iter()
                .enumerate()
                .map(|(i, t)| cfphub_core::Talk {
                    id: i64::try_from(i).unwrap(),
                    external_id: t.external_id.clone(),
                    title: t.title.clone().unwrap_or_default(),
                    description: None,
                    summary: None,
                    video_url: None,
                })
                .collect();
            next.events.insert(graph.portal.name.clone(), event.clone());
            events.push(event);
        }
        *state = next;
        Ok(events)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fake portal clients
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
enum Behaviour {
    Ok { event: &'static str, delay: Duration },
    Fail { status: u16, delay: Duration },
}

struct FakeClient {
    name: String,
    behaviour: Behaviour,
}

impl FakeClient {
    async fn wait(&self) -> PortalResult<()> {
        match &self.behaviour {
            Behaviour::Ok { delay, .. } => {
                tokio::time::sleep(*delay).await;
                Ok(())
            }
            Behaviour::Fail { status, delay } => {
                tokio::time::sleep(*delay).await;
                Err(PortalError::Http {
                    status: *status,
                    url: format!("https://{}.example/api/public/event", self.name),
                })
            }
        }
    }
}

#[async_trait]
impl PortalClientPort for FakeClient {
    fn portal_name(&self) -> &str {
        &self.name
    }

    async fn fetch_event_details(&self) -> PortalResult<PortalEventDetails> {
        self.wait().await?;
        let Behaviour::Ok { event, .. } = &self.behaviour else {
            unreachable!()
        };
        Ok(PortalEventDetails {
            name: Some((*event).to_string()),
            time_zone: Some("Europe/London".to_string()),
            ..Default::default()
        })
    }

    async fn fetch_all_talks(&self) -> PortalResult<Vec<PortalTalkDetails>> {
        Ok(vec![
            PortalTalkDetails {
                id: Some("t1".to_string()),
                title: Some("Loom in practice".to_string()),
                speakers: vec![PortalSpeakerDetails {
                    id: Some("s1".to_string()),
                    first_name: Some("Ada".to_string()),
                    company: Some("IBM".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            },
            PortalTalkDetails {
                id: Some("t2".to_string()),
                title: Some("Quarkus native".to_string()),
                speakers: vec![PortalSpeakerDetails {
                    id: Some("s2".to_string()),
                    first_name: Some("Linus".to_string()),
                    company: Some("Red Hat".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            },
        ])
    }

    async fn search_talks(&self, keyword: &str) -> PortalResult<Vec<PortalTalkDetails>> {
        let talks = self.fetch_all_talks().await?;
        Ok(talks
            .into_iter()
            .filter(|t| {
                t.title
                    .as_deref()
                    .is_some_and(|title| title.to_lowercase().contains(&keyword.to_lowercase()))
            })
            .collect())
    }

    async fn fetch_speakers(&self) -> PortalResult<Vec<PortalSpeakerDetails>> {
        Ok(vec![])
    }

    async fn search_speakers(&self, _company: &str) -> PortalResult<Vec<PortalSpeakerDetails>> {
        Ok(vec![])
    }
}

#[derive(Default)]
struct FakeFactory {
    behaviours: HashMap<String, Behaviour>,
}

impl FakeFactory {
    fn with(mut self, portal: &str, behaviour: Behaviour) -> Self {
        self.behaviours.insert(portal.to_string(), behaviour);
        self
    }
}

impl PortalClientFactory for FakeFactory {
    fn client_for(&self, portal: &Portal) -> Result<Arc<dyn PortalClientPort>, PortalError> {
        let behaviour = self
            .behaviours
            .get(&portal.name)
            .cloned()
            .ok_or_else(|| PortalError::Configuration {
                message: format!("unknown portal {}", portal.name),
            })?;
        Ok(Arc::new(FakeClient {
            name: portal.name.clone(),
            behaviour,
        }))
    }

    fn evict(&self, _portal_name: &str) {}
}

fn portal(name: &str) -> Portal {
    Portal::new(name, format!("https://{name}.example"), PortalType::CfpDev)
}

fn ok(event: &'static str, delay_ms: u64) -> Behaviour {
    Behaviour::Ok {
        event,
        delay: Duration::from_millis(delay_ms),
    }
}

fn core(store: &Arc<MemoryStore>, factory: FakeFactory, timeout: Duration) -> AppCore {
    let repos = Repos::new(store.clone(), store.clone());
    AppCore::new(repos, Arc::new(factory), timeout)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_recreate_events_persists_every_portal() {
    let store = Arc::new(MemoryStore::default());
    store.seed(portal("stale"), "Old Conf");
    let factory = FakeFactory::default()
        .with("devoxxuk", ok("Devoxx UK 2025", 0))
        .with("jfokus", ok("Jfokus 2025", 0));
    let core = core(&store, factory, Duration::from_secs(5));

    let summary = core
        .aggregation()
        .recreate_events(
            vec![portal("devoxxuk"), portal("jfokus")],
            &TalkSearchCriteria::none(),
        )
        .await
        .unwrap();

    assert_eq!(summary.portals.len(), 2);
    assert_eq!(summary.total_talks, 4);
    assert_eq!(summary.total_speakers, 4);
    assert_eq!(store.portal_names(), vec!["devoxxuk", "jfokus"]);
    assert_eq!(store.event_names(), vec!["Devoxx UK 2025", "Jfokus 2025"]);

    let status = core.aggregation().status();
    assert_eq!(status.state, AggregationState::Idle);
    assert_eq!(status.last_summary, Some(summary));
    assert!(status.last_error.is_none());
}

#[tokio::test]
async fn test_failing_portal_leaves_store_unchanged() {
    let store = Arc::new(MemoryStore::default());
    store.seed(portal("previous"), "Previous Conf");
    let factory = FakeFactory::default()
        .with("one", ok("One", 50))
        .with(
            "two",
            Behaviour::Fail {
                status: 500,
                delay: Duration::from_millis(10),
            },
        )
        .with("three", ok("Three", 50));
    let core = core(&store, factory, Duration::from_secs(5));

    let err = core
        .aggregation()
        .recreate_events(
            vec![portal("one"), portal("two"), portal("three")],
            &TalkSearchCriteria::none(),
        )
        .await
        .unwrap_err();

    match err {
        AggregationError::Portal { portal, source } => {
            assert_eq!(portal, "two");
            assert!(source.is_retryable());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.portal_names(), vec!["previous"]);
    assert_eq!(store.event_names(), vec!["Previous Conf"]);

    let status = core.aggregation().status();
    assert_eq!(status.state, AggregationState::Idle);
    assert!(status.last_error.unwrap().contains("two"));
}

#[tokio::test(start_paused = true)]
async fn test_first_failure_returns_without_waiting_for_siblings() {
    let store = Arc::new(MemoryStore::default());
    store.seed(portal("previous"), "Previous Conf");
    let factory = FakeFactory::default()
        .with("slow", ok("Slow", 60_000))
        .with(
            "broken",
            Behaviour::Fail {
                status: 503,
                delay: Duration::from_millis(10),
            },
        );
    let core = core(&store, factory, Duration::from_secs(120));

    let started = tokio::time::Instant::now();
    let err = core
        .aggregation()
        .recreate_events(
            vec![portal("slow"), portal("broken")],
            &TalkSearchCriteria::none(),
        )
        .await
        .unwrap_err();
    let elapsed = started.elapsed();

    assert!(
        matches!(&err, AggregationError::Portal { portal, .. } if portal == "broken"),
        "unexpected error: {err}"
    );
    assert!(elapsed < Duration::from_secs(1), "returned after {elapsed:?}");
    assert_eq!(store.event_names(), vec!["Previous Conf"]);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_is_request_timeout_times_portal_count() {
    let store = Arc::new(MemoryStore::default());
    store.seed(portal("previous"), "Previous Conf");
    let factory = FakeFactory::default()
        .with("fast", ok("Fast", 100))
        .with("slow", ok("Slow", 60_000));
    let core = core(&store, factory, Duration::from_secs(2));

    let err = core
        .aggregation()
        .recreate_events(
            vec![portal("fast"), portal("slow")],
            &TalkSearchCriteria::none(),
        )
        .await
        .unwrap_err();

    match err {
        AggregationError::Timeout { portals, after } => {
            assert_eq!(portals, 2);
            assert_eq!(after, Duration::from_secs(4));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.event_names(), vec!["Previous Conf"]);
}

#[tokio::test]
async fn test_create_events_uses_stored_portals_and_criteria() {
    let store = Arc::new(MemoryStore::default());
    store.seed(portal("devoxxuk"), "Stale");
    let factory = FakeFactory::default().with("devoxxuk", ok("Devoxx UK 2025", 0));
    let core = core(&store, factory, Duration::from_secs(5));

    let criteria = TalkSearchCriteria::builder()
        .talk_keywords(["loom", "native"])
        .speaker_company("IBM")
        .build();
    let summary = core.aggregation().create_events(&criteria).await.unwrap();

    // "loom" matches t1 (Ada, IBM); "native" matches t2 (Linus, Red Hat) which
    // the company filter then drops.
    assert_eq!(summary.total_talks, 1);
    assert_eq!(summary.total_speakers, 1);
    assert_eq!(store.portal_names(), vec!["devoxxuk"]);

    let events = core.events().list(EventSort::Name).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Devoxx UK 2025");
    assert_eq!(events[0].talks[0].title, "Loom in practice");
}

#[tokio::test]
async fn test_unbuildable_client_aborts_run() {
    let store = Arc::new(MemoryStore::default());
    let factory = FakeFactory::default().with("known", ok("Known", 0));
    let core = core(&store, factory, Duration::from_secs(5));

    let err = core
        .aggregation()
        .recreate_events(
            vec![portal("known"), portal("unknown")],
            &TalkSearchCriteria::none(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AggregationError::Portal {
            source: PortalError::Configuration { .. },
            ..
        }
    ));
    assert!(store.portal_names().is_empty());
}
