//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Configuration file (via cfphub-core)
//! - Database pool and repositories (via cfphub-db)
//! - Portal client registry (via cfphub-portals)
//!
//! Command handlers receive the composed `AppCore` and delegate work to it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use cfphub_core::AppConfig;
use cfphub_core::services::AppCore;
use cfphub_db::{CoreFactory, setup_database};
use cfphub_portals::{PortalClientConfig, PortalClientRegistry};
use tracing::{info, warn};

use crate::parser::Cli;

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "cfphub.toml";

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Explicit configuration file, if any.
    pub config_path: Option<PathBuf>,
    /// `SQLite` database file.
    pub database_path: PathBuf,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config_path: cli.config.clone(),
            database_path: cli.database.clone(),
        }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// Loaded configuration.
    pub config: AppConfig,
}

impl CliContext {
    /// Access the `AppCore`.
    pub const fn app(&self) -> &AppCore {
        &self.app
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// Load the application configuration.
///
/// An explicit path must exist. Without one, `./cfphub.toml` is used when
/// present; otherwise built-in defaults apply with the startup reload turned
/// off, since reloading zero portals would empty the store.
pub fn load_app_config(explicit: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return AppConfig::load(path)
            .with_context(|| format!("cannot load configuration from {}", path.display()));
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        return Ok(AppConfig::load(fallback)?);
    }

    warn!("No configuration file found, using defaults without portals");
    Ok(AppConfig {
        reload_on_startup: false,
        ..AppConfig::default()
    })
}

/// Bootstrap the CLI application.
pub async fn bootstrap(config: &CliConfig) -> Result<CliContext> {
    let app_config = load_app_config(config.config_path.as_deref())?;
    let pool = setup_database(&config.database_path).await?;

    let clients = Arc::new(PortalClientRegistry::new(
        PortalClientConfig::from_app_config(&app_config),
    ));
    let app = CoreFactory::build_app_core(pool, clients, app_config.request_timeout());
    info!(
        database = %config.database_path.display(),
        portals = app_config.portals.len(),
        "CLI bootstrap complete"
    );

    Ok(CliContext {
        app,
        config: app_config,
    })
}
