//! Subcommands.

use std::path::PathBuf;

use cfphub_core::{EventSort, PortalType};
use clap::{Subcommand, ValueEnum};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "CFPHUB_PORT", default_value = "8080")]
        port: u16,
        /// Skip the startup reload even if the config enables it
        #[arg(long)]
        no_reload: bool,
        /// Restrict CORS to these origins (repeatable); all origins when absent
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,
    },

    /// Aggregate events from every stored portal
    ///
    /// Without --keyword or --company the configured default search is used.
    Aggregate {
        /// Talk keyword (repeatable)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,
        /// Speaker company (repeatable)
        #[arg(long = "company")]
        companies: Vec<String>,
        /// Replace the stored portals with the configured ones first
        #[arg(long)]
        reload: bool,
    },

    /// Manage portals
    #[command(subcommand)]
    Portals(PortalsCommand),

    /// Inspect aggregated events
    #[command(subcommand)]
    Events(EventsCommand),
}

#[derive(Subcommand)]
pub enum PortalsCommand {
    /// List stored portals
    List,
    /// Add or replace a portal
    Add {
        /// Portal name (for Sessionize, the event slug)
        name: String,
        /// Base URL of the portal API
        #[arg(long)]
        base_url: String,
        /// Portal type: CFP_DEV, SESSIONIZE or DEV2NEXT
        #[arg(long = "type")]
        portal_type: PortalType,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a portal and its event
    Remove { name: String },
    /// Fetch speakers live from a portal
    Speakers {
        name: String,
        /// Only speakers whose company contains this text
        #[arg(long)]
        company: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum EventsCommand {
    /// List aggregated events
    List {
        #[arg(long, value_enum, default_value_t = SortArg::Date)]
        sort: SortArg,
    },
    /// Show one event with its talks and speakers
    Show { portal: String },
    /// Write every portal and event as JSON
    Export {
        /// Output file; stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Event ordering accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Date,
    Name,
    Portal,
}

impl From<SortArg> for EventSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => Self::FromDate,
            SortArg::Name => Self::Name,
            SortArg::Portal => Self::Portal,
        }
    }
}
