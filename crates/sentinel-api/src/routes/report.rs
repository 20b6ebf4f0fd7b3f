//! Report rendering endpoint

use crate::models::{ReportRequest, ReportResponse};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

/// Render a report from a timeline plus IOC list.
///
/// Always returns a report: the configured renderer owns its fallback
/// policy, so a broken remote generator degrades to the local table
/// rendering instead of failing the request.
#[utoipa::path(
    post,
    path = "/report",
    request_body = ReportRequest,
    responses(
        (status = 200, description = "Rendered report", body = ReportResponse)
    ),
    tag = "report"
)]
pub async fn make_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportRequest>,
) -> Json<ReportResponse> {
    let html = state.renderer.render(&request.timeline, &request.iocs).await;
    Json(ReportResponse { html })
}
