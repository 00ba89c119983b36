//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The map page talks to these JSON endpoints: it posts the drawn shape,
//! triggers analysis, then polls status/notices and fetches the figure to
//! hand to Plotly.

pub mod analysis;
pub mod region;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ErrorCode;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/region",
            put(region::put_region)
                .get(region::get_region)
                .delete(region::delete_region),
        )
        .route("/api/analysis", post(analysis::run))
        .route("/api/timeline", get(analysis::timeline))
        .route("/api/notices", get(analysis::list_notices).delete(analysis::clear_notices))
        .route("/api/status", get(analysis::status))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// ERROR BODY
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// JSON error response: `{ "error": <code>, "message": <text> }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, err: &impl ErrorCode) -> Self {
        Self { status, body: ErrorBody { error: err.error_code(), message: err.to_string() } }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
