//! Shared CLI presentation utilities.
//!
//! Format-only helpers; domain transforms belong in core services.

pub mod tables;

pub use tables::{format_date, format_optional, print_separator, truncate_string};
