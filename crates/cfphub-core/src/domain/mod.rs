//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, HTTP, etc.).
//!
//! # Structure
//!
//! - `portal` - Portal configuration types (`Portal`, `PortalType`)
//! - `event` - Event graph (unpersisted) and the persisted read model
//! - `search` - Talk search criteria value object

pub mod event;
pub mod portal;
pub mod search;

pub use event::{
    Event, EventGraph, EventSort, NewEvent, NewSpeaker, NewTalk, Presentation, Speaker, Talk,
    ValidationError,
};
pub use portal::{Portal, PortalType, UnknownPortalType};
pub use search::{TalkSearchCriteria, TalkSearchCriteriaBuilder};
