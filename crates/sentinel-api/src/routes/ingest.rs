//! Log ingestion endpoints

use crate::models::{ErrorResponse, IngestResponse};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use sentinel_core::PipelineMetrics;
use std::sync::Arc;

/// Ingest a raw log submission through the full pipeline.
///
/// Empty submissions are rejected here; inside the pipeline empty input is
/// not an error, but the service boundary has no use for a blank upload.
#[utoipa::path(
    post,
    path = "/ingest",
    request_body(content = String, content_type = "text/plain"),
    responses(
        (status = 200, description = "Timeline and graph projection", body = IngestResponse),
        (status = 400, description = "Empty submission", body = ErrorResponse)
    ),
    tag = "ingest"
)]
pub async fn ingest(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<IngestResponse>, (StatusCode, Json<ErrorResponse>)> {
    if body.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("empty_submission", "no log text provided")),
        ));
    }

    let outcome = state.pipeline.run(&body);
    tracing::info!(
        events = outcome.timeline.events.len(),
        nodes = outcome.graph.nodes.len(),
        "ingested submission"
    );

    Ok(Json(IngestResponse {
        timeline: outcome.timeline,
        graph: outcome.graph,
    }))
}

/// Pipeline counters.
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Pipeline counter snapshot", body = Object)
    ),
    tag = "ingest"
)]
pub async fn metrics(State(state): State<Arc<AppState>>) -> Json<PipelineMetrics> {
    Json(state.pipeline.metrics())
}
