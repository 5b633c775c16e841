//! Text conversion handlers.
//!
//! All of these run against a snapshot of the active mapping taken when the
//! request arrives.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::lines::{convert_all_lines, filter_unchanged_lines, transform_all_lines};
use crate::template::expand_template;

use super::super::state::AppState;

/// Request body carrying a text buffer.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Request body for the transform endpoint.
#[derive(Debug, Deserialize)]
pub struct TransformRequest {
    pub text: String,
    /// Blank or missing means pure conversion
    #[serde(default)]
    pub template: String,
}

/// Request body for expanding a single template.
#[derive(Debug, Deserialize)]
pub struct ExpandRequest {
    pub template: String,
    pub original: String,
    pub converted: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub converted: String,
}

#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub converted: String,
    pub transformed: String,
}

#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub text: String,
}

/// POST /api/convert - Convert every line to ASCII.
pub async fn convert(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Json<ConvertResponse> {
    let active = state.active().await;
    Json(ConvertResponse {
        converted: convert_all_lines(&req.text, &active.table),
    })
}

/// POST /api/transform - Convert and render every line through a template.
///
/// Returns both outputs, computed against the same mapping.
pub async fn transform(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransformRequest>,
) -> Json<TransformResponse> {
    let active = state.active().await;
    Json(TransformResponse {
        converted: convert_all_lines(&req.text, &active.table),
        transformed: transform_all_lines(&req.text, &req.template, &active.table),
    })
}

/// POST /api/expand - Expand a template for one line pair.
pub async fn expand(Json(req): Json<ExpandRequest>) -> Json<ExpandResponse> {
    Json(ExpandResponse {
        result: expand_template(&req.template, &req.original, &req.converted),
    })
}

/// POST /api/filter - Drop the lines conversion would leave unchanged.
pub async fn filter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TextRequest>,
) -> Json<FilterResponse> {
    let active = state.active().await;
    Json(FilterResponse {
        text: filter_unchanged_lines(&req.text, &active.table),
    })
}
