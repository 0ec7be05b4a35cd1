//! Event graph assembly.
//!
//! Portals describe "talks reference speakers"; the store wants "event owns
//! speakers, speakers present talks". This step flips the shape once, builds
//! the index structures, and never mutates shared objects.

use std::collections::{BTreeSet, HashMap};

use super::normalize::{map_speaker, map_talk};
use crate::domain::{EventGraph, NewEvent, Portal, Presentation};
use crate::ports::PortalTalkDetails;

/// Build one [`EventGraph`] from an event and its filtered talks.
///
/// - Speakers are merged by external id; speakers without one are kept apart.
/// - Talks are merged by external id the same way, so a talk returned by two
///   keyword searches is stored once with the union of its speakers.
/// - Talks without speakers are kept; the filter has already removed them
///   when a company filter is active.
pub fn assemble_graph(portal: Portal, event: NewEvent, talks: &[PortalTalkDetails]) -> EventGraph {
    let mut graph = EventGraph::new(portal, event);
    let mut speaker_index: HashMap<String, usize> = HashMap::new();
    let mut talk_index: HashMap<String, usize> = HashMap::new();
    let mut edges: BTreeSet<Presentation> = BTreeSet::new();

    for details in talks {
        let talk = map_talk(details);
        let talk_idx = match talk.external_id.clone() {
            Some(id) => *talk_index.entry(id).or_insert_with(|| {
                graph.talks.push(talk);
                graph.talks.len() - 1
            }),
            None => {
                graph.talks.push(talk);
                graph.talks.len() - 1
            }
        };

        for speaker_details in &details.speakers {
            let speaker = map_speaker(speaker_details);
            let speaker_idx = match speaker.external_id.clone() {
                Some(id) => *speaker_index.entry(id).or_insert_with(|| {
                    graph.speakers.push(speaker);
                    graph.speakers.len() - 1
                }),
                None => {
                    graph.speakers.push(speaker);
                    graph.speakers.len() - 1
                }
            };
            edges.insert(Presentation {
                speaker: speaker_idx,
                talk: talk_idx,
            });
        }
    }

    graph.presentations = edges.into_iter().collect();
    graph
}
