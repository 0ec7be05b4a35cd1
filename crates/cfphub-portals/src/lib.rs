//! HTTP adapters for CFP portals.
//!
//! Implements [`PortalClientPort`](cfphub_core::PortalClientPort) for
//! cfp.dev, Sessionize and Dev2Next, plus the
//! [`PortalClientRegistry`] that hands out one cached client per portal.
//! Everything else in this crate is an implementation detail.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod mapping;
mod models;
mod parsing;
mod port;
mod registry;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Clients
pub use client::{DefaultCfpDevClient, DefaultDev2NextClient, DefaultSessionizeClient};

// Configuration
pub use config::PortalClientConfig;

// Client cache
pub use registry::PortalClientRegistry;

// Silence unused dev-dependency warnings
#[cfg(test)]
use chrono_tz as _;
#[cfg(test)]
use proptest as _;
#[cfg(test)]
use tokio as _;
