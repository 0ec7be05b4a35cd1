//! Portal CRUD handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use cfphub_core::{Portal, PortalSpeakerDetails, PortalType};
use serde::Deserialize;

use crate::error::HttpError;
use crate::state::AppState;

/// Body of `PUT /api/portals/{name}`; the name comes from the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortalRequest {
    pub base_url: String,
    pub portal_type: PortalType,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SpeakerQuery {
    pub company: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Portal>>, HttpError> {
    Ok(Json(state.core.portals().list().await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Portal>, HttpError> {
    state
        .core
        .portals()
        .get(&name)
        .await?
        .map(Json)
        .ok_or_else(|| HttpError::NotFound(format!("Portal '{name}'")))
}

pub async fn create(
    State(state): State<AppState>,
    Json(portal): Json<Portal>,
) -> Result<(StatusCode, Json<Portal>), HttpError> {
    let saved = state.core.portals().save(portal).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<UpdatePortalRequest>,
) -> Result<Json<Portal>, HttpError> {
    let portal = Portal {
        name,
        base_url: req.base_url,
        portal_type: req.portal_type,
        description: req.description,
    };
    Ok(Json(state.core.portals().save(portal).await?))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, HttpError> {
    state.core.portals().delete(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Live speaker lookup; bypasses the store.
pub async fn speakers(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<SpeakerQuery>,
) -> Result<Json<Vec<PortalSpeakerDetails>>, HttpError> {
    let speakers = state
        .core
        .portals()
        .speakers(&name, query.company.as_deref())
        .await?;
    Ok(Json(speakers))
}
