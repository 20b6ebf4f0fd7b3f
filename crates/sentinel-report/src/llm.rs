//! LLM-backed report renderer
//!
//! Posts an analyst prompt to a remote text-generation endpoint. Any
//! transport or decode failure degrades to the local HTML table renderer,
//! so the service boundary always gets a report back.

use crate::{HtmlTableRenderer, ReportError, ReportRenderer};
use sentinel_core::Timeline;
use serde_json::{json, Value};

/// Remote generator settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_new_tokens: u32,
    pub temperature: f64,
}

impl LlmConfig {
    /// Read `REPORT_LLM_ENDPOINT` / `REPORT_LLM_MODEL` / `REPORT_LLM_API_KEY`
    /// from the environment. `None` when no endpoint is set, which selects
    /// the local renderer at the service boundary.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("REPORT_LLM_ENDPOINT").ok()?;
        Some(Self {
            endpoint,
            model: std::env::var("REPORT_LLM_MODEL")
                .unwrap_or_else(|_| "granite-13b-instruct-v2".to_string()),
            api_key: std::env::var("REPORT_LLM_API_KEY").ok(),
            max_new_tokens: 800,
            temperature: 0.3,
        })
    }
}

pub struct LlmReportRenderer {
    config: LlmConfig,
    client: reqwest::Client,
    fallback: HtmlTableRenderer,
}

impl LlmReportRenderer {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            fallback: HtmlTableRenderer::new(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, ReportError> {
        let mut request = self.client.post(&self.config.endpoint).json(&json!({
            "model_id": self.config.model,
            "input": prompt,
            "parameters": {
                "max_new_tokens": self.config.max_new_tokens,
                "temperature": self.config.temperature,
            },
        }));
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let body: Value = request.send().await?.error_for_status()?.json().await?;
        body.pointer("/results/0/generated_text")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ReportError::BadResponse("missing generated_text".to_string()))
    }
}

#[async_trait::async_trait]
impl ReportRenderer for LlmReportRenderer {
    async fn render(&self, timeline: &Timeline, iocs: &[String]) -> String {
        let prompt = compose_prompt(timeline, iocs);
        match self.generate(&prompt).await {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!(error = %err, "report generator unavailable, using local renderer");
                self.fallback.render_sync(timeline, iocs)
            }
        }
    }
}

fn compose_prompt(timeline: &Timeline, iocs: &[String]) -> String {
    let events: String = timeline
        .events
        .iter()
        .map(|e| {
            format!(
                "{}. {} | {}->{} | {}/{} | {}",
                e.step_num.unwrap_or(0),
                e.time,
                e.source,
                e.target,
                e.tactic.as_deref().unwrap_or("-"),
                e.technique.as_deref().unwrap_or("-"),
                e.summary,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let ioc_list = if iocs.is_empty() {
        "None".to_string()
    } else {
        iocs.join(", ")
    };

    format!(
        "You are a cyber forensics analyst. Given this incident timeline:\n\n\
         {events}\n\n\
         IOCs: {ioc_list}\n\n\
         Generate a structured HTML report with:\n\
         - Executive Summary\n\
         - Timeline of Events (table)\n\
         - IOCs\n\
         - MITRE ATT&CK mapping\n\
         - Remediation Steps\n"
    )
}
