//! Aggregation runs against a real `SQLite` store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cfphub_core::{
    AppCore, EventSort, Portal, PortalClientFactory, PortalClientPort, PortalError,
    PortalEventDetails, PortalResult, PortalSpeakerDetails, PortalTalkDetails, PortalType,
    TalkSearchCriteria,
};
use cfphub_db::TestDb;

struct StaticClient {
    name: String,
    fail: bool,
}

fn speaker(id: &str, first: &str, company: &str) -> PortalSpeakerDetails {
    PortalSpeakerDetails {
        id: Some(id.to_string()),
        first_name: Some(first.to_string()),
        company: Some(company.to_string()),
        ..Default::default()
    }
}

#[async_trait]
impl PortalClientPort for StaticClient {
    fn portal_name(&self) -> &str {
        &self.name
    }

    async fn fetch_event_details(&self) -> PortalResult<PortalEventDetails> {
        if self.fail {
            return Err(PortalError::Http {
                status: 404,
                url: format!("https://{}.example/api/public/event", self.name),
            });
        }
        Ok(PortalEventDetails {
            name: Some(format!("{} 2025", self.name)),
            time_zone: Some("Europe/Brussels".to_string()),
            ..Default::default()
        })
    }

    async fn fetch_all_talks(&self) -> PortalResult<Vec<PortalTalkDetails>> {
        Ok(vec![
            PortalTalkDetails {
                id: Some("1".to_string()),
                title: Some("Pattern matching".to_string()),
                speakers: vec![speaker("a", "Ada", "IBM"), speaker("b", "Brian", "Oracle")],
                ..Default::default()
            },
            PortalTalkDetails {
                id: Some("2".to_string()),
                title: Some("Structured concurrency".to_string()),
                speakers: vec![speaker("a", "Ada", "IBM")],
                ..Default::default()
            },
        ])
    }

    async fn search_talks(&self, _keyword: &str) -> PortalResult<Vec<PortalTalkDetails>> {
        self.fetch_all_talks().await
    }

    async fn fetch_speakers(&self) -> PortalResult<Vec<PortalSpeakerDetails>> {
        Ok(vec![])
    }

    async fn search_speakers(&self, _company: &str) -> PortalResult<Vec<PortalSpeakerDetails>> {
        Ok(vec![])
    }
}

struct StaticFactory {
    failing: Option<&'static str>,
}

impl PortalClientFactory for StaticFactory {
    fn client_for(&self, portal: &Portal) -> Result<Arc<dyn PortalClientPort>, PortalError> {
        Ok(Arc::new(StaticClient {
            name: portal.name.clone(),
            fail: self.failing == Some(portal.name.as_str()),
        }))
    }

    fn evict(&self, _portal_name: &str) {}
}

fn portal(name: &str) -> Portal {
    Portal::new(name, format!("https://{name}.example"), PortalType::CfpDev)
}

fn core(db: &TestDb, failing: Option<&'static str>) -> AppCore {
    AppCore::new(
        db.repos(),
        Arc::new(StaticFactory { failing }),
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn test_company_filter_is_persisted_with_edges() {
    let db = TestDb::new().await.unwrap();
    let core = core(&db, None);
    let criteria = TalkSearchCriteria::builder().speaker_company("IBM").build();

    let summary = core
        .aggregation()
        .recreate_events(vec![portal("devoxxbe")], &criteria)
        .await
        .unwrap();
    assert_eq!(summary.total_talks, 2);
    assert_eq!(summary.total_speakers, 1);

    let event = core
        .events()
        .get_by_portal("devoxxbe")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.name, "devoxxbe 2025");
    assert_eq!(event.time_zone.as_deref(), Some("Europe/Brussels"));
    assert_eq!(event.speakers.len(), 1);
    assert_eq!(event.speakers[0].first_name.as_deref(), Some("Ada"));
    assert_eq!(event.talks_of(&event.speakers[0]).count(), 2);
}

#[tokio::test]
async fn test_failed_run_keeps_previous_data() {
    let db = TestDb::new().await.unwrap();
    core(&db, None)
        .aggregation()
        .recreate_events(vec![portal("devoxxbe")], &TalkSearchCriteria::none())
        .await
        .unwrap();

    let failing = core(&db, Some("jfokus"));
    let result = failing
        .aggregation()
        .recreate_events(
            vec![portal("devoxxfr"), portal("jfokus")],
            &TalkSearchCriteria::none(),
        )
        .await;
    assert!(result.is_err());

    let names: Vec<_> = failing
        .portals()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["devoxxbe"]);
    let events = failing.events().list(EventSort::Name).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].talks.len(), 2);
}
