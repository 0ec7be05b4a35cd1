//! Aggregation handlers.
//!
//! A run blocks the request until it finishes; concurrent requests queue on
//! the core's write lock.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use cfphub_core::{AggregationStatus, AggregationSummary, TalkSearchCriteria};

use crate::error::HttpError;
use crate::state::AppState;

/// Aggregate every stored portal.
///
/// The body is optional criteria JSON; an empty body uses the configured
/// default search.
pub async fn run(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AggregationSummary>, HttpError> {
    let criteria = if body.iter().all(u8::is_ascii_whitespace) {
        state.config.default_criteria()
    } else {
        serde_json::from_slice::<TalkSearchCriteria>(&body)
            .map_err(|e| HttpError::BadRequest(format!("Invalid criteria: {e}")))?
    };
    Ok(Json(state.core.aggregation().create_events(&criteria).await?))
}

/// Replace all stored portals and events with the configured ones.
pub async fn reload(State(state): State<AppState>) -> Result<Json<AggregationSummary>, HttpError> {
    Ok(Json(state.reload().await?))
}

pub async fn status(State(state): State<AppState>) -> Json<AggregationStatus> {
    Json(state.core.aggregation().status())
}
