//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use cfphub_core::services::AppCore;
use cfphub_core::{AggregationError, AggregationSummary, AppConfig};
use cfphub_db::{CoreFactory, setup_database};
use cfphub_portals::{PortalClientConfig, PortalClientRegistry};
use tracing::info;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Path to the `SQLite` database file.
    pub database_path: PathBuf,
    /// Application configuration (portals, timeouts, default search).
    pub app: AppConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 8080;

    pub fn new(app: AppConfig, database_path: impl Into<PathBuf>) -> Self {
        Self {
            port: Self::DEFAULT_PORT,
            database_path: database_path.into(),
            app,
            cors: CorsConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The core application facade.
    pub core: Arc<AppCore>,
    /// Configuration the server was started with.
    pub config: Arc<AppConfig>,
}

impl AxumContext {
    pub fn new(core: Arc<AppCore>, config: AppConfig) -> Self {
        Self {
            core,
            config: Arc::new(config),
        }
    }

    /// Replace all stored data with a fresh run over the configured portals
    /// and the configured default criteria.
    pub async fn reload(&self) -> Result<AggregationSummary, AggregationError> {
        self.core
            .aggregation()
            .recreate_events(self.config.portals(), &self.config.default_criteria())
            .await
    }
}

/// Bootstrap the Axum server with all services.
///
/// With `reload_on_startup` set, the reload runs before this returns and a
/// failed reload fails the bootstrap. The store is untouched in that case.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    info!(
        database_path = %config.database_path.display(),
        portals = config.app.portals.len(),
        "Axum bootstrap"
    );

    let pool = setup_database(&config.database_path).await?;
    let clients = Arc::new(PortalClientRegistry::new(
        PortalClientConfig::from_app_config(&config.app),
    ));
    let core = Arc::new(CoreFactory::build_app_core(
        pool,
        clients,
        config.app.request_timeout(),
    ));
    let ctx = AxumContext::new(core, config.app.clone());

    if config.app.reload_on_startup {
        let summary = ctx.reload().await.context("startup reload failed")?;
        info!(
            portals = summary.portals.len(),
            talks = summary.total_talks,
            "Startup reload complete"
        );
    }

    Ok(ctx)
}

/// Bootstrap and serve until the process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;

    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!("cfphub listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
