//! Core services - the application's business logic layer.
//!
//! This module contains high-level service abstractions that orchestrate
//! between ports (trait interfaces) and domain logic. Services here are
//! pure orchestrators - they don't know about concrete implementations.

mod aggregation;
mod app_core;
pub mod assembly;
mod event_service;
pub mod normalize;
mod portal_service;
pub mod search_filter;

pub use aggregation::{
    AggregationError, AggregationService, AggregationState, AggregationStatus,
    AggregationSummary, PortalSummary, deadline_for,
};
pub use app_core::AppCore;
pub use event_service::{EventService, ExportDocument};
pub use portal_service::PortalService;
