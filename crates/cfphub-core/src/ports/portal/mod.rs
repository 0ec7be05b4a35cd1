//! Portal client port definitions.
//!
//! This module defines the port trait and DTOs for talking to external CFP
//! portals. The implementations live in `cfphub-portals`.

mod client;
mod error;
mod factory;
mod types;

pub use client::PortalClientPort;
pub use error::{PortalError, PortalResult};
pub use factory::PortalClientFactory;
pub use types::{PortalEventDetails, PortalSpeakerDetails, PortalTalkDetails};
