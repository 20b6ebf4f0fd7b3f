//! Local HTML table renderer
//!
//! Deterministic, dependency-free rendering used directly and as the
//! degradation path for the LLM-backed renderer.

use crate::ReportRenderer;
use sentinel_core::Timeline;

pub struct HtmlTableRenderer;

impl HtmlTableRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_sync(&self, timeline: &Timeline, iocs: &[String]) -> String {
        let mut out = String::from("<h1>SentinelMind Incident Report</h1>\n");

        out.push_str("<h2>Timeline</h2>\n<table>\n");
        out.push_str(
            "<tr><th>Step</th><th>Time</th><th>Source</th><th>Target</th>\
             <th>Tactic</th><th>Technique</th><th>Summary</th></tr>\n",
        );
        for event in &timeline.events {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                event.step_num.unwrap_or(0),
                escape(&event.time),
                escape(&event.source),
                escape(&event.target),
                escape(event.tactic.as_deref().unwrap_or("-")),
                escape(event.technique.as_deref().unwrap_or("-")),
                escape(&event.summary),
            ));
        }
        out.push_str("</table>\n");

        out.push_str("<h2>Indicators of Compromise</h2>\n");
        if iocs.is_empty() {
            out.push_str("<p>None observed.</p>\n");
        } else {
            out.push_str("<ul>\n");
            for ioc in iocs {
                out.push_str(&format!("<li>{}</li>\n", escape(ioc)));
            }
            out.push_str("</ul>\n");
        }

        out
    }
}

impl Default for HtmlTableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReportRenderer for HtmlTableRenderer {
    async fn render(&self, timeline: &Timeline, iocs: &[String]) -> String {
        self.render_sync(timeline, iocs)
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::{IngestPipeline, Timeline};

    fn sample_timeline() -> Timeline {
        IngestPipeline::default()
            .run("2024-01-01T10:00:00 hostA -> db01 : failed login from 203.0.113.66")
            .timeline
    }

    #[test]
    fn report_contains_one_row_per_event() {
        let timeline = sample_timeline();
        let html = HtmlTableRenderer::new().render_sync(&timeline, &[]);

        assert_eq!(html.matches("<tr><td>").count(), timeline.events.len());
        assert!(html.contains("hostA"));
        assert!(html.contains("None observed."));
    }

    #[test]
    fn iocs_are_listed() {
        let html = HtmlTableRenderer::new()
            .render_sync(&sample_timeline(), &["203.0.113.66".to_string()]);
        assert!(html.contains("<li>203.0.113.66</li>"));
    }

    #[test]
    fn summaries_are_entity_escaped() {
        let mut timeline = sample_timeline();
        timeline.events[0].summary = "<script>alert('x')</script>".into();

        let html = HtmlTableRenderer::new().render_sync(&timeline, &[]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
