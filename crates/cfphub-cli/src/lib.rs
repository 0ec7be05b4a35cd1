//! Command-line adapter for cfphub.
//!
//! `cfphub serve` runs the REST server; the other commands run one
//! operation against the local store and exit.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, load_app_config};
pub use commands::{Commands, EventsCommand, PortalsCommand, SortArg};
pub use error::CliError;
pub use parser::Cli;
