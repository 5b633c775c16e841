//! Mapping selection handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use super::super::state::{ActiveMapping, AppState};
use super::error_response;

/// Available mappings and the active one.
#[derive(Debug, Serialize)]
pub struct MappingList {
    pub available: Vec<String>,
    pub active: Option<String>,
}

/// Summary of the active mapping.
#[derive(Debug, Serialize)]
pub struct ActiveInfo {
    pub name: Option<String>,
    pub entries: usize,
    pub default_replacement: String,
}

impl From<&ActiveMapping> for ActiveInfo {
    fn from(active: &ActiveMapping) -> Self {
        Self {
            name: active.name.clone(),
            entries: active.table.len(),
            default_replacement: active.table.default_replacement().to_string(),
        }
    }
}

/// Request body for selecting a mapping. `null` selects no mapping.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// GET /api/mappings - List mapping files.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MappingList>, (StatusCode, String)> {
    let available = state.mappings.list().map_err(error_response)?;
    let active = state.active().await.name.clone();
    Ok(Json(MappingList { available, active }))
}

/// GET /api/mappings/active - Describe the active mapping.
pub async fn active(State(state): State<Arc<AppState>>) -> Json<ActiveInfo> {
    Json(ActiveInfo::from(state.active().await.as_ref()))
}

/// PUT /api/mappings/active - Switch mappings.
pub async fn set_active(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectRequest>,
) -> Result<Json<ActiveInfo>, (StatusCode, String)> {
    match state.select(req.name).await {
        Ok(active) => Ok(Json(ActiveInfo::from(active.as_ref()))),
        Err(e) => {
            warn!(error = %e, "mapping selection rejected");
            Err(error_response(e))
        }
    }
}
