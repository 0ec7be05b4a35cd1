//! Event, speaker and talk domain types.
//!
//! Two families of types live here:
//!
//! - `New*` types and [`EventGraph`] describe an aggregated, not yet persisted
//!   event. The graph owns flat lists of speakers and talks and keeps the
//!   many-to-many edges in a separate adjacency list, so there are no
//!   back-pointers to keep in sync.
//! - [`Event`], [`Speaker`] and [`Talk`] are the persisted read model with
//!   surrogate database ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::portal::{Portal, PortalType};

// ─────────────────────────────────────────────────────────────────────────────
// Unpersisted graph
// ─────────────────────────────────────────────────────────────────────────────

/// Event metadata as normalized from a portal, before persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: Option<String>,
    pub description: Option<String>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    /// IANA timezone id, e.g. `Europe/London`.
    pub time_zone: Option<String>,
    pub website_url: Option<String>,
    pub flickr_url: Option<String>,
    pub youtube_url: Option<String>,
    pub cfp_opening: Option<DateTime<Utc>>,
    pub cfp_closing: Option<DateTime<Utc>>,
}

/// A speaker as normalized from a portal, before persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpeaker {
    /// Portal-side id. Numeric ids are stringified; not globally unique.
    pub external_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub linkedin_username: Option<String>,
    pub bluesky_username: Option<String>,
    pub country: Option<String>,
}

impl NewSpeaker {
    /// "First Last", skipping whichever half is missing.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A talk as normalized from a portal, before persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTalk {
    pub external_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub video_url: Option<String>,
}

/// An edge between a speaker and a talk, by index into the owning graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Presentation {
    pub speaker: usize,
    pub talk: usize,
}

/// One fully assembled event for a single portal.
///
/// `speakers` and `talks` are owned flat lists; `presentations` is the only
/// place the many-to-many relation is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGraph {
    pub portal: Portal,
    pub event: NewEvent,
    pub speakers: Vec<NewSpeaker>,
    pub talks: Vec<NewTalk>,
    pub presentations: Vec<Presentation>,
}

impl EventGraph {
    /// Create a graph with no speakers or talks.
    pub const fn new(portal: Portal, event: NewEvent) -> Self {
        Self {
            portal,
            event,
            speakers: Vec::new(),
            talks: Vec::new(),
            presentations: Vec::new(),
        }
    }

    /// Talks presented by the speaker at `speaker` index.
    pub fn talks_of(&self, speaker: usize) -> impl Iterator<Item = &NewTalk> + '_ {
        self.presentations
            .iter()
            .filter(move |p| p.speaker == speaker)
            .filter_map(|p| self.talks.get(p.talk))
    }

    /// Speakers presenting the talk at `talk` index.
    pub fn speakers_of(&self, talk: usize) -> impl Iterator<Item = &NewSpeaker> + '_ {
        self.presentations
            .iter()
            .filter(move |p| p.talk == talk)
            .filter_map(|p| self.speakers.get(p.speaker))
    }

    /// Check required fields before the graph is written.
    ///
    /// An event needs a name, a talk needs a title, a speaker needs at least
    /// one name part, and every edge must point inside the graph.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let portal = &self.portal.name;

        if self.event.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(ValidationError::new(portal, "event", "name is required"));
        }

        for (index, talk) in self.talks.iter().enumerate() {
            if talk.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
                return Err(ValidationError::new(
                    portal,
                    format!("talk #{index} ({})", talk.external_id.as_deref().unwrap_or("?")),
                    "title is required",
                ));
            }
        }

        for (index, speaker) in self.speakers.iter().enumerate() {
            if speaker.full_name().trim().is_empty() {
                return Err(ValidationError::new(
                    portal,
                    format!(
                        "speaker #{index} ({})",
                        speaker.external_id.as_deref().unwrap_or("?")
                    ),
                    "first or last name is required",
                ));
            }
        }

        for edge in &self.presentations {
            if edge.speaker >= self.speakers.len() || edge.talk >= self.talks.len() {
                return Err(ValidationError::new(
                    portal,
                    "presentation",
                    format!("dangling edge {}->{}", edge.speaker, edge.talk),
                ));
            }
        }

        Ok(())
    }
}

/// A normalized entity failed its required-field checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {entity} from portal '{portal}': {message}")]
pub struct ValidationError {
    pub portal: String,
    pub entity: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        portal: impl Into<String>,
        entity: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            portal: portal.into(),
            entity: entity.into(),
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Persisted read model
// ─────────────────────────────────────────────────────────────────────────────

/// A persisted talk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Talk {
    pub id: i64,
    pub external_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub video_url: Option<String>,
}

/// A persisted speaker. `talk_ids` are ids of talks in the owning event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub id: i64,
    pub external_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub twitter_handle: Option<String>,
    pub linkedin_username: Option<String>,
    pub bluesky_username: Option<String>,
    pub country: Option<String>,
    pub talk_ids: Vec<i64>,
}

impl Speaker {
    /// First and last name joined; `"(unnamed)"` when both are missing.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            "(unnamed)".to_string()
        } else {
            name
        }
    }
}

/// A persisted event with its speakers and talks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub portal_name: String,
    pub portal_type: PortalType,
    pub name: String,
    pub description: Option<String>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    pub time_zone: Option<String>,
    pub website_url: Option<String>,
    pub flickr_url: Option<String>,
    pub youtube_url: Option<String>,
    pub cfp_opening: Option<DateTime<Utc>>,
    pub cfp_closing: Option<DateTime<Utc>>,
    pub speakers: Vec<Speaker>,
    pub talks: Vec<Talk>,
}

impl Event {
    /// Talks presented by `speaker`.
    pub fn talks_of<'a>(&'a self, speaker: &'a Speaker) -> impl Iterator<Item = &'a Talk> + 'a {
        self.talks
            .iter()
            .filter(move |talk| speaker.talk_ids.contains(&talk.id))
    }
}

/// Read-time ordering for event listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventSort {
    /// Earliest start date first; undated events last.
    #[default]
    FromDate,
    /// Alphabetical by event name.
    Name,
    /// Alphabetical by portal name.
    Portal,
}

impl EventSort {
    /// Sort `events` in place according to this ordering.
    pub fn apply(self, events: &mut [Event]) {
        match self {
            Self::FromDate => events.sort_by(|a, b| match (a.from_date, b.from_date) {
                (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.name.cmp(&b.name),
            }),
            Self::Name => events.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            Self::Portal => events.sort_by(|a, b| a.portal_name.cmp(&b.portal_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portal() -> Portal {
        Portal::new("devoxxuk", "https://devoxxuk.cfp.dev", PortalType::CfpDev)
    }

    fn named_event() -> NewEvent {
        NewEvent {
            name: Some("Devoxx UK 2025".to_string()),
            ..Default::default()
        }
    }

    fn speaker(first: &str) -> NewSpeaker {
        NewSpeaker {
            first_name: Some(first.to_string()),
            ..Default::default()
        }
    }

    fn talk(title: &str) -> NewTalk {
        NewTalk {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_graph_navigation_follows_edges() {
        let mut graph = EventGraph::new(portal(), named_event());
        graph.speakers = vec![speaker("Ada"), speaker("Linus")];
        graph.talks = vec![talk("Quarkus"), talk("Loom")];
        graph.presentations = vec![
            Presentation { speaker: 0, talk: 0 },
            Presentation { speaker: 1, talk: 0 },
            Presentation { speaker: 1, talk: 1 },
        ];

        let ada_talks: Vec<_> = graph.talks_of(0).filter_map(|t| t.title.clone()).collect();
        assert_eq!(ada_talks, vec!["Quarkus"]);

        let quarkus_speakers: Vec<_> = graph.speakers_of(0).map(NewSpeaker::full_name).collect();
        assert_eq!(quarkus_speakers, vec!["Ada", "Linus"]);
    }

    #[test]
    fn test_validate_requires_event_name() {
        let graph = EventGraph::new(portal(), NewEvent::default());
        let err = graph.validate().unwrap_err();
        assert_eq!(err.entity, "event");
        assert!(err.to_string().contains("devoxxuk"));
    }

    #[test]
    fn test_validate_rejects_blank_talk_title_and_dangling_edges() {
        let mut graph = EventGraph::new(portal(), named_event());
        graph.talks = vec![talk("  ")];
        assert!(graph.validate().is_err());

        let mut graph = EventGraph::new(portal(), named_event());
        graph.speakers = vec![speaker("Ada")];
        graph.presentations = vec![Presentation { speaker: 0, talk: 3 }];
        assert!(graph.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_graph() {
        let mut graph = EventGraph::new(portal(), named_event());
        graph.speakers = vec![speaker("Ada")];
        graph.talks = vec![talk("Quarkus")];
        graph.presentations = vec![Presentation { speaker: 0, talk: 0 }];
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_full_name_skips_missing_parts() {
        let only_last = NewSpeaker {
            last_name: Some("Lovelace".to_string()),
            ..Default::default()
        };
        assert_eq!(only_last.full_name(), "Lovelace");
        assert_eq!(NewSpeaker::default().full_name(), "");
    }

    fn stored(name: &str, portal: &str, from: Option<&str>) -> Event {
        Event {
            id: 0,
            portal_name: portal.to_string(),
            portal_type: PortalType::CfpDev,
            name: name.to_string(),
            description: None,
            from_date: from.map(|s| s.parse().unwrap()),
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

    #[test]
    fn test_event_sort_by_date_puts_undated_last() {
        let mut events = vec![
            stored("Undated", "c", None),
            stored("Later", "b", Some("2025-10-06T08:00:00Z")),
            stored("Sooner", "a", Some("2025-05-07T07:00:00Z")),
        ];
        EventSort::FromDate.apply(&mut events);
        let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Sooner", "Later", "Undated"]);

        EventSort::Portal.apply(&mut events);
        assert_eq!(events[0].portal_name, "a");
    }

    #[test]
    fn test_speaker_display_name() {
        let mut speaker = Speaker {
            id: 1,
            external_id: None,
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            company: None,
            bio: None,
            image_url: None,
            twitter_handle: None,
            linkedin_username: None,
            bluesky_username: None,
            country: None,
            talk_ids: vec![],
        };
        assert_eq!(speaker.display_name(), "Ada Lovelace");
        speaker.first_name = None;
        assert_eq!(speaker.display_name(), "Lovelace");
        speaker.last_name = None;
        assert_eq!(speaker.display_name(), "(unnamed)");
    }
}
