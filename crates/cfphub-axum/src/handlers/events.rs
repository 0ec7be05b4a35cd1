//! Read-only event handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use cfphub_core::{Event, EventSort, ExportDocument};
use serde::Deserialize;

use crate::error::HttpError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub sort: EventSort,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Event>>, HttpError> {
    Ok(Json(state.core.events().list(query.sort).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(portal): Path<String>,
) -> Result<Json<Event>, HttpError> {
    state
        .core
        .events()
        .get_by_portal(&portal)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound(format!("Event of portal '{portal}'")))
}

pub async fn export(State(state): State<AppState>) -> Result<Json<ExportDocument>, HttpError> {
    Ok(Json(state.core.events().export().await?))
}
