//! Analysis, timeline, notice and status routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use super::{ApiError, ErrorBody};
use crate::render::RenderedTimeline;
use crate::services::analysis::{self, AnalysisError, AnalysisReport};
use crate::services::notice::Notice;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub loading: bool,
    pub analysis_in_progress: bool,
    pub has_region: bool,
}

/// `POST /api/analysis` — run an analysis over the current selection.
///
/// The run is spawned so it completes (render and notices included) even if
/// the client disconnects before the response is written.
pub async fn run(State(state): State<AppState>) -> Result<Json<AnalysisReport>, ApiError> {
    let handle = tokio::spawn(async move { analysis::run_analysis(&state).await });
    match handle.await {
        Ok(result) => result
            .map(Json)
            .map_err(|e| ApiError::new(analysis_error_to_status(&e), &e)),
        Err(e) => {
            tracing::error!(error = %e, "analysis task aborted");
            Err(ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorBody { error: "E_ANALYSIS_ABORTED", message: e.to_string() },
            })
        }
    }
}

/// `GET /api/timeline` — latest rendered figure.
pub async fn timeline(State(state): State<AppState>) -> Result<Json<RenderedTimeline>, StatusCode> {
    state
        .timeline
        .latest()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `GET /api/notices` — recent notices, oldest first.
pub async fn list_notices(State(state): State<AppState>) -> Json<Vec<Notice>> {
    Json(state.notices.recent())
}

/// `DELETE /api/notices` — dismiss all notices.
pub async fn clear_notices(State(state): State<AppState>) -> StatusCode {
    state.notices.clear();
    StatusCode::NO_CONTENT
}

/// `GET /api/status` — indicator state for the page.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        loading: state.loading.is_visible(),
        analysis_in_progress: state.analysis_in_progress(),
        has_region: state.selection.read().await.is_some(),
    })
}

pub(crate) fn analysis_error_to_status(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::NoRegion => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::Busy => StatusCode::CONFLICT,
    }
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
