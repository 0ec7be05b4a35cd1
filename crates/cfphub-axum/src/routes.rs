//! Route definitions and router construction.
//!
//! Handlers delegate to the shared [`AppCore`](cfphub_core::AppCore) facade.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// All API routes without the `/api` prefix. The caller applies
/// `.with_state()` before nesting.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Portals API
        .route(
            "/portals",
            get(handlers::portals::list).post(handlers::portals::create),
        )
        .route(
            "/portals/{name}",
            get(handlers::portals::get)
                .put(handlers::portals::update)
                .delete(handlers::portals::remove),
        )
        .route(
            "/portals/{name}/speakers",
            get(handlers::portals::speakers),
        )
        // Events API
        .route("/events", get(handlers::events::list))
        .route("/events/{portal}", get(handlers::events::get))
        .route("/export", get(handlers::events::export))
        // Aggregation API
        .route("/aggregation", post(handlers::aggregation::run))
        .route("/aggregation/reload", post(handlers::aggregation::reload))
        .route("/aggregation/status", get(handlers::aggregation::status))
}

async fn health_check() -> &'static str {
    "OK"
}

/// Create the main application router.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
        .layer(TraceLayer::new_for_http())
}
