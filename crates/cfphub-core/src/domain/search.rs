//! Talk search criteria value object.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Keyword and company filter applied to every portal during aggregation.
///
/// Values are stripped on the way in and blank values are dropped, so two
/// criteria built from `["java", " java "]` and `["java"]` are equal.
/// Instances are immutable; use [`TalkSearchCriteria::builder`] or
/// [`TalkSearchCriteria::to_builder`] to derive a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TalkSearchCriteria {
    talk_keywords: BTreeSet<String>,
    speaker_companies: BTreeSet<String>,
}

impl TalkSearchCriteria {
    /// Criteria that match everything.
    pub fn none() -> Self {
        Self::default()
    }

    /// Start building criteria.
    pub fn builder() -> TalkSearchCriteriaBuilder {
        TalkSearchCriteriaBuilder::default()
    }

    /// Builder pre-filled with this criteria's values.
    pub fn to_builder(&self) -> TalkSearchCriteriaBuilder {
        TalkSearchCriteriaBuilder {
            talk_keywords: self.talk_keywords.clone(),
            speaker_companies: self.speaker_companies.clone(),
        }
    }

    pub const fn talk_keywords(&self) -> &BTreeSet<String> {
        &self.talk_keywords
    }

    pub const fn speaker_companies(&self) -> &BTreeSet<String> {
        &self.speaker_companies
    }

    pub fn has_talk_keywords(&self) -> bool {
        !self.talk_keywords.is_empty()
    }

    pub fn has_speaker_companies(&self) -> bool {
        !self.speaker_companies.is_empty()
    }
}

// Deserialize through the builder so that wire input gets the same
// stripping as programmatic input.
impl<'de> Deserialize<'de> for TalkSearchCriteria {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize, Default)]
        #[serde(rename_all = "camelCase", default)]
        struct Raw {
            #[serde(alias = "talk_keywords")]
            talk_keywords: Vec<String>,
            #[serde(alias = "speaker_companies")]
            speaker_companies: Vec<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(TalkSearchCriteria::builder()
            .talk_keywords(raw.talk_keywords)
            .speaker_companies(raw.speaker_companies)
            .build())
    }
}

/// Fluent builder for [`TalkSearchCriteria`].
#[derive(Debug, Clone, Default)]
pub struct TalkSearchCriteriaBuilder {
    talk_keywords: BTreeSet<String>,
    speaker_companies: BTreeSet<String>,
}

impl TalkSearchCriteriaBuilder {
    #[must_use]
    pub fn talk_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        insert_stripped(&mut self.talk_keywords, keyword.as_ref());
        self
    }

    #[must_use]
    pub fn talk_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            insert_stripped(&mut self.talk_keywords, keyword.as_ref());
        }
        self
    }

    #[must_use]
    pub fn speaker_company(mut self, company: impl AsRef<str>) -> Self {
        insert_stripped(&mut self.speaker_companies, company.as_ref());
        self
    }

    #[must_use]
    pub fn speaker_companies<I, S>(mut self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for company in companies {
            insert_stripped(&mut self.speaker_companies, company.as_ref());
        }
        self
    }

    pub fn build(self) -> TalkSearchCriteria {
        TalkSearchCriteria {
            talk_keywords: self.talk_keywords,
            speaker_companies: self.speaker_companies,
        }
    }
}

fn insert_stripped(set: &mut BTreeSet<String>, value: &str) {
    let stripped = value.trim();
    if !stripped.is_empty() {
        set.insert(stripped.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_strips_and_drops_blanks() {
        let criteria = TalkSearchCriteria::builder()
            .talk_keywords(["  quarkus ", "", "   ", "java"])
            .speaker_company(" Red Hat ")
            .speaker_company("")
            .build();

        let keywords: Vec<_> = criteria.talk_keywords().iter().cloned().collect();
        assert_eq!(keywords, vec!["java", "quarkus"]);
        let companies: Vec<_> = criteria.speaker_companies().iter().cloned().collect();
        assert_eq!(companies, vec!["Red Hat"]);
    }

    #[test]
    fn test_equality_is_by_content_not_order() {
        let a = TalkSearchCriteria::builder()
            .talk_keywords(["java", "quarkus"])
            .build();
        let b = TalkSearchCriteria::builder()
            .talk_keyword("quarkus")
            .talk_keyword(" java")
            .talk_keyword("java")
            .build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_none_matches_everything() {
        let criteria = TalkSearchCriteria::none();
        assert!(!criteria.has_talk_keywords());
        assert!(!criteria.has_speaker_companies());
    }

    #[test]
    fn test_to_builder_derives_new_value() {
        let base = TalkSearchCriteria::builder().talk_keyword("java").build();
        let derived = base.to_builder().speaker_company("IBM").build();
        assert!(!base.has_speaker_companies());
        assert!(derived.speaker_companies().contains("IBM"));
        assert!(derived.talk_keywords().contains("java"));
    }

    #[test]
    fn test_deserialize_applies_normalization() {
        let criteria: TalkSearchCriteria = serde_json::from_str(
            r#"{"talkKeywords": [" ai ", ""], "speakerCompanies": ["IBM", "IBM "]}"#,
        )
        .unwrap();
        assert_eq!(
            criteria,
            TalkSearchCriteria::builder()
                .talk_keyword("ai")
                .speaker_company("IBM")
                .build()
        );

        let empty: TalkSearchCriteria = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, TalkSearchCriteria::none());
    }
}
