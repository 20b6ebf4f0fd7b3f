//! Timeline-only ingestion endpoint

use crate::models::{ErrorResponse, TimelineResponse};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

/// Run the pipeline and return only the timeline.
#[utoipa::path(
    post,
    path = "/timeline",
    request_body(content = String, content_type = "text/plain"),
    responses(
        (status = 200, description = "Ordered incident timeline", body = TimelineResponse),
        (status = 400, description = "Empty submission", body = ErrorResponse)
    ),
    tag = "ingest"
)]
pub async fn build_timeline(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<TimelineResponse>, (StatusCode, Json<ErrorResponse>)> {
    if body.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("empty_submission", "no log text provided")),
        ));
    }

    let outcome = state.pipeline.run(&body);
    Ok(Json(TimelineResponse {
        timeline: outcome.timeline,
    }))
}
