//! HTTP handlers, one module per resource.

pub mod aggregation;
pub mod events;
pub mod portals;
