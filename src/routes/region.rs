//! Region selection routes.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::error::ErrorCode;
use crate::geo::{LatLng, Region, RegionError};
use crate::services::selection;
use crate::state::AppState;

/// Drawn shape: either explicit corners or the vertices of a polygon.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RegionBody {
    Corners { sw: LatLng, ne: LatLng },
    Vertices { vertices: Vec<LatLng> },
}

impl RegionBody {
    fn into_region(self) -> Result<Region, RegionError> {
        match self {
            Self::Corners { sw, ne } => Region::new(sw, ne),
            Self::Vertices { vertices } => Region::from_vertices(&vertices),
        }
    }
}

/// Request body that is not JSON or matches neither shape.
#[derive(Debug, thiserror::Error)]
#[error("invalid region body: {0}")]
pub struct RegionBodyError(String);

impl ErrorCode for RegionBodyError {
    fn error_code(&self) -> &'static str {
        "E_REGION_BODY"
    }
}

impl From<JsonRejection> for RegionBodyError {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub region: Region,
    pub replaced: bool,
}

/// `PUT /api/region` — replace the current selection.
pub async fn put_region(
    State(state): State<AppState>,
    body: Result<Json<RegionBody>, JsonRejection>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, &RegionBodyError::from(e)))?;
    let region = body
        .into_region()
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, &e))?;
    let previous = selection::select_region(&state, region).await;
    Ok(Json(SelectionResponse { region, replaced: previous.is_some() }))
}

/// `GET /api/region` — current selection.
pub async fn get_region(State(state): State<AppState>) -> Result<Json<Region>, StatusCode> {
    selection::current_region(&state)
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `DELETE /api/region` — clear the selection.
pub async fn delete_region(State(state): State<AppState>) -> StatusCode {
    selection::clear_region(&state).await;
    StatusCode::NO_CONTENT
}

#[cfg(test)]
#[path = "region_test.rs"]
mod tests;
