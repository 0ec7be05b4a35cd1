//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the call-for-papers aggregator.
#[derive(Parser)]
#[command(name = "cfphub")]
#[command(about = "Aggregate call-for-papers data from conference portals")]
#[command(version)]
pub struct Cli {
    /// TOML configuration file (defaults to ./cfphub.toml when present)
    #[arg(short, long, env = "CFPHUB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// `SQLite` database file
    #[arg(long, env = "CFPHUB_DATABASE", global = true, default_value = "cfphub.db")]
    pub database: PathBuf,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
