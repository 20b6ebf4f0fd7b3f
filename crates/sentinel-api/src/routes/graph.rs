//! Persisted graph endpoints

use crate::models::{ErrorResponse, GraphWriteRequest};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use sentinel_core::{Graph, GraphProjector, Timeline};
use std::sync::Arc;

/// Project the submitted events and upsert them into the graph store.
#[utoipa::path(
    post,
    path = "/graph/write",
    request_body = GraphWriteRequest,
    responses(
        (status = 200, description = "Stored graph after the write", body = Object),
        (status = 400, description = "No events provided", body = ErrorResponse),
        (status = 502, description = "Store backend failure", body = ErrorResponse)
    ),
    tag = "graph"
)]
pub async fn graph_write(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GraphWriteRequest>,
) -> Result<Json<Graph>, (StatusCode, Json<ErrorResponse>)> {
    if request.events.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("no_events", "no events provided")),
        ));
    }

    let graph = GraphProjector::new().project(&Timeline {
        events: request.events,
    });

    match state.store.upsert(&graph).await {
        Ok(stored) => Ok(Json(stored)),
        Err(err) => {
            tracing::error!(error = %err, "graph store write failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new("store_failure", err.to_string())),
            ))
        }
    }
}

/// Read the currently stored graph.
#[utoipa::path(
    get,
    path = "/graph/read",
    responses(
        (status = 200, description = "Current stored graph", body = Object),
        (status = 502, description = "Store backend failure", body = ErrorResponse)
    ),
    tag = "graph"
)]
pub async fn graph_read(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Graph>, (StatusCode, Json<ErrorResponse>)> {
    match state.store.read().await {
        Ok(graph) => Ok(Json(graph)),
        Err(err) => {
            tracing::error!(error = %err, "graph store read failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new("store_failure", err.to_string())),
            ))
        }
    }
}
