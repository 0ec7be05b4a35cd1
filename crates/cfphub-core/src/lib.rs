//! Core domain, ports and services for cfphub.
//!
//! cfphub aggregates call-for-papers data (events, speakers, talks) from
//! several portal APIs into one store. This crate holds everything that does
//! not touch the network or the database directly:
//!
//! - [`domain`] - portals, event graphs, search criteria
//! - [`ports`] - traits implemented by `cfphub-portals` and `cfphub-db`
//! - [`services`] - filtering, normalization, aggregation, CRUD facades
//! - [`config`] - the TOML configuration model

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{AppConfig, ConfigError, PortalConfig, SearchConfig};
pub use domain::{
    Event, EventGraph, EventSort, NewEvent, NewSpeaker, NewTalk, Portal, PortalType,
    Presentation, Speaker, Talk, TalkSearchCriteria, TalkSearchCriteriaBuilder, ValidationError,
};
pub use ports::{
    CoreError, EventRepository, PortalClientFactory, PortalClientPort, PortalError,
    PortalEventDetails, PortalRepository, PortalResult, PortalSpeakerDetails, PortalTalkDetails,
    Repos, RepositoryError,
};
pub use services::{
    AggregationError, AggregationService, AggregationState, AggregationStatus,
    AggregationSummary, AppCore, EventService, ExportDocument, PortalService,
};
