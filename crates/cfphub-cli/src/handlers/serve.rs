//! Serve command handler.

use std::path::Path;

use anyhow::Result;
use cfphub_axum::{ServerConfig, start_server};
use cfphub_core::AppConfig;

/// Start the REST server. Runs until the process is stopped.
pub async fn execute(
    mut config: AppConfig,
    database_path: &Path,
    port: u16,
    no_reload: bool,
    allowed_origins: Vec<String>,
) -> Result<()> {
    if no_reload {
        config.reload_on_startup = false;
    }

    let mut server = ServerConfig::new(config, database_path).with_port(port);
    if !allowed_origins.is_empty() {
        server = server.with_allowed_origins(allowed_origins);
    }

    println!("cfphub server starting on port {port}");
    start_server(server).await
}
