//! Talk filtering by keyword and speaker company.
//!
//! The same rules apply to every portal type. Keyword matching is delegated to
//! the portal client (server-side or local); company matching always happens
//! here.

use std::collections::BTreeSet;

use crate::domain::TalkSearchCriteria;
use crate::ports::{PortalClientPort, PortalResult, PortalTalkDetails};

/// Fetch the talks of one portal that match `criteria`.
///
/// With keywords, one `search_talks` call is made per keyword (in sorted
/// keyword order) and the results are concatenated as-is; a talk matching two
/// keywords appears twice. Without keywords, `fetch_all_talks` is called once.
/// The company filter is then applied with [`retain_company_speakers`].
pub async fn filter_talks(
    client: &dyn PortalClientPort,
    criteria: &TalkSearchCriteria,
) -> PortalResult<Vec<PortalTalkDetails>> {
    let talks = if criteria.has_talk_keywords() {
        let mut talks = Vec::new();
        for keyword in criteria.talk_keywords() {
            talks.extend(client.search_talks(keyword).await?);
        }
        talks
    } else {
        client.fetch_all_talks().await?
    };

    Ok(retain_company_speakers(talks, criteria.speaker_companies()))
}

/// Keep only speakers whose stripped company is in `companies`.
///
/// Talks left without speakers are dropped. An empty `companies` set keeps
/// every talk untouched. Matching is exact and case-sensitive.
pub fn retain_company_speakers(
    talks: Vec<PortalTalkDetails>,
    companies: &BTreeSet<String>,
) -> Vec<PortalTalkDetails> {
    if companies.is_empty() {
        return talks;
    }

    talks
        .into_iter()
        .filter_map(|mut talk| {
            talk.speakers.retain(|speaker| {
                speaker
                    .company
                    .as_deref()
                    .map(str::trim)
                    .is_some_and(|company| companies.contains(company))
            });
            (!talk.speakers.is_empty()).then_some(talk)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PortalEventDetails, PortalSpeakerDetails};
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Client {}

        #[async_trait]
        impl PortalClientPort for Client {
            fn portal_name(&self) -> &str;
            async fn fetch_event_details(&self) -> PortalResult<PortalEventDetails>;
            async fn fetch_all_talks(&self) -> PortalResult<Vec<PortalTalkDetails>>;
            async fn search_talks(&self, keyword: &str) -> PortalResult<Vec<PortalTalkDetails>>;
            async fn fetch_speakers(&self) -> PortalResult<Vec<PortalSpeakerDetails>>;
            async fn search_speakers(&self, company: &str) -> PortalResult<Vec<PortalSpeakerDetails>>;
        }
    }

    fn speaker(id: &str, company: Option<&str>) -> PortalSpeakerDetails {
        PortalSpeakerDetails {
            id: Some(id.to_string()),
            first_name: Some(id.to_string()),
            company: company.map(ToString::to_string),
            ..Default::default()
        }
    }

    fn talk(id: &str, speakers: Vec<PortalSpeakerDetails>) -> PortalTalkDetails {
        PortalTalkDetails {
            id: Some(id.to_string()),
            title: Some(format!("Talk {id}")),
            speakers,
            ..Default::default()
        }
    }

    fn sample_talks() -> Vec<PortalTalkDetails> {
        vec![
            talk(
                "1",
                vec![speaker("a", Some("IBM")), speaker("b", Some("Oracle"))],
            ),
            talk("2", vec![speaker("c", Some("ibm"))]),
            talk("3", vec![speaker("d", Some(" IBM "))]),
            talk("4", vec![speaker("e", None)]),
            talk("5", vec![]),
        ]
    }

    fn companies(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_company_filter_is_exact_and_case_sensitive() {
        let filtered = retain_company_speakers(sample_talks(), &companies(&["IBM"]));

        let ids: Vec<_> = filtered.iter().filter_map(|t| t.id.as_deref()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(filtered[0].speakers.len(), 1);
        assert_eq!(filtered[0].speakers[0].id.as_deref(), Some("a"));
    }

    #[test]
    fn test_company_filter_is_idempotent() {
        let set = companies(&["IBM", "Oracle"]);
        let once = retain_company_speakers(sample_talks(), &set);
        let twice = retain_company_speakers(once.clone(), &set);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_companies_keeps_everything() {
        let talks = sample_talks();
        assert_eq!(retain_company_speakers(talks.clone(), &BTreeSet::new()), talks);
    }

    #[tokio::test]
    async fn test_keywords_fan_out_without_dedup() {
        let mut client = MockClient::new();
        client
            .expect_search_talks()
            .with(eq("ai"))
            .times(1)
            .returning(|_| Ok(vec![talk("1", vec![speaker("a", None)])]));
        client
            .expect_search_talks()
            .with(eq("java"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    talk("1", vec![speaker("a", None)]),
                    talk("2", vec![speaker("b", None)]),
                ])
            });
        client.expect_fetch_all_talks().never();

        let criteria = TalkSearchCriteria::builder()
            .talk_keywords(["java", "ai"])
            .build();
        let talks = filter_talks(&client, &criteria).await.unwrap();

        let ids: Vec<_> = talks.iter().filter_map(|t| t.id.as_deref()).collect();
        assert_eq!(ids, vec!["1", "1", "2"]);
    }

    #[tokio::test]
    async fn test_no_keywords_fetches_all_once() {
        let mut client = MockClient::new();
        client
            .expect_fetch_all_talks()
            .times(1)
            .returning(|| Ok(sample_talks()));
        client.expect_search_talks().never();

        let criteria = TalkSearchCriteria::builder().speaker_company("Oracle").build();
        let talks = filter_talks(&client, &criteria).await.unwrap();
        assert_eq!(talks.len(), 1);
        assert_eq!(talks[0].speakers[0].id.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_empty_listing_is_not_an_error() {
        let mut client = MockClient::new();
        client.expect_fetch_all_talks().returning(|| Ok(vec![]));

        let talks = filter_talks(&client, &TalkSearchCriteria::none())
            .await
            .unwrap();
        assert!(talks.is_empty());
    }

    #[tokio::test]
    async fn test_search_error_propagates() {
        let mut client = MockClient::new();
        client.expect_search_talks().returning(|_| {
            Err(crate::ports::PortalError::Http {
                status: 500,
                url: "https://x.dev".to_string(),
            })
        });

        let criteria = TalkSearchCriteria::builder().talk_keyword("java").build();
        assert!(filter_talks(&client, &criteria).await.is_err());
    }
}
