//! Incident report rendering
//!
//! Consumes a finished [`Timeline`](sentinel_core::Timeline) plus an IOC
//! list and returns an opaque rendered report. The pipeline has no stake in
//! the report's content; renderers own their fallback policy, so rendering
//! never fails upward.

use sentinel_core::Timeline;
use thiserror::Error;

pub mod html;
pub mod llm;

pub use html::HtmlTableRenderer;
pub use llm::{LlmConfig, LlmReportRenderer};

/// Internal renderer errors. Callers never see these: the trait contract
/// is infallible and implementations degrade to a local rendering instead.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("generator request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected generator response: {0}")]
    BadResponse(String),
}

/// Rendering contract consumed by the service layer.
#[async_trait::async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render(&self, timeline: &Timeline, iocs: &[String]) -> String;
}
