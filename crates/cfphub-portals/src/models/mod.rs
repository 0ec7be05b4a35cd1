//! Internal API response types for the supported portals.
//!
//! These types are internal to `cfphub-portals` and are not exposed to
//! consumers. External consumers see the port DTOs defined in `cfphub-core`.
//! Unknown fields are ignored everywhere.

pub mod cfp_dev;
pub mod sessionize;
