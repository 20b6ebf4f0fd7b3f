//! SentinelMind ingestion API
//!
//! Thin HTTP surface over the pipeline. All transformation logic lives in
//! `sentinel-core`; persistence and report rendering are swappable
//! collaborators picked at startup from the environment.

pub mod models;
pub mod routes;

use axum::routing::{get, post};
use axum::{Json, Router};
use sentinel_core::{IngestPipeline, PipelineConfig};
use sentinel_report::{HtmlTableRenderer, LlmConfig, LlmReportRenderer, ReportRenderer};
use sentinel_store::{CypherConfig, CypherGraphStore, GraphStore, MemoryGraphStore};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub use models::*;

/// Shared service state: one pipeline plus the two collaborators.
pub struct AppState {
    pub pipeline: IngestPipeline,
    pub store: Arc<dyn GraphStore>,
    pub renderer: Arc<dyn ReportRenderer>,
}

impl AppState {
    pub fn new(
        pipeline: IngestPipeline,
        store: Arc<dyn GraphStore>,
        renderer: Arc<dyn ReportRenderer>,
    ) -> Self {
        Self {
            pipeline,
            store,
            renderer,
        }
    }

    /// Wire collaborators from the environment. Unset or broken backends
    /// fall back to the in-process implementations so the pipeline keeps
    /// serving.
    pub fn from_env() -> Self {
        let store: Arc<dyn GraphStore> = match CypherConfig::from_env() {
            Some(config) => match CypherGraphStore::new(config) {
                Ok(store) => Arc::new(store),
                Err(err) => {
                    tracing::warn!(error = %err, "graph store unavailable, using in-memory store");
                    Arc::new(MemoryGraphStore::new())
                }
            },
            None => Arc::new(MemoryGraphStore::new()),
        };

        let renderer: Arc<dyn ReportRenderer> = match LlmConfig::from_env() {
            Some(config) => Arc::new(LlmReportRenderer::new(config)),
            None => Arc::new(HtmlTableRenderer::new()),
        };

        Self::new(IngestPipeline::new(PipelineConfig::default()), store, renderer)
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SentinelMind API",
        version = "0.1.0",
        description = "Security log ingestion - incident timelines, IOC enrichment, MITRE ATT&CK mapping, actor/asset graphs",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::ingest::ingest,
        routes::ingest::metrics,
        routes::timeline::build_timeline,
        routes::graph::graph_write,
        routes::graph::graph_read,
        routes::report::make_report,
    ),
    components(
        schemas(
            HealthResponse, ErrorResponse,
            IngestResponse, TimelineResponse,
            GraphWriteRequest, ReportRequest, ReportResponse
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "ingest", description = "Log ingestion pipeline"),
        (name = "graph", description = "Persisted actor/asset graph"),
        (name = "report", description = "Incident report rendering")
    )
)]
pub struct ApiDoc;

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/ingest", post(routes::ingest::ingest))
        .route("/metrics", get(routes::ingest::metrics))
        .route("/timeline", post(routes::timeline::build_timeline))
        .route("/graph/write", post(routes::graph::graph_write))
        .route("/graph/read", get(routes::graph::graph_read))
        .route("/report", post(routes::report::make_report))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
