//! API models

use sentinel_core::{Event, Graph, Timeline};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Full ingestion result: the timeline and its graph projection.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngestResponse {
    #[schema(value_type = Object)]
    pub timeline: Timeline,
    #[schema(value_type = Object)]
    pub graph: Graph,
}

/// Timeline-only ingestion result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TimelineResponse {
    #[schema(value_type = Object)]
    pub timeline: Timeline,
}

/// Events to persist as a graph.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GraphWriteRequest {
    #[schema(value_type = Vec<Object>)]
    pub events: Vec<Event>,
}

/// Timeline plus IOC list to render.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportRequest {
    #[schema(value_type = Object)]
    pub timeline: Timeline,
    #[serde(default)]
    pub iocs: Vec<String>,
}

/// Rendered report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    pub html: String,
}

/// Health payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}
