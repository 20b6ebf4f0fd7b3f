//! SentinelMind incident pipeline
//!
//! Turns raw security log text into a time-ordered incident timeline
//! annotated with IOCs and MITRE ATT&CK labels, then projects the timeline
//! onto a deduplicated actor/asset graph.
//!
//! # Architecture
//! ```text
//! raw text ──▶ Parser ──▶ IOC Enricher ──▶ Rule Engine ──▶ Classifier
//!                                                              │
//!                     Graph ◀── Projector ◀── Timeline Builder ◀┘
//! ```
//!
//! Every stage consumes and returns the full event collection; the pipeline
//! is single-threaded and performs no I/O. HTTP, persistence, and report
//! rendering live in the sibling crates and only exchange the plain data
//! structures defined here.

use serde::{Deserialize, Serialize};

pub mod classify;
pub mod enrich;
pub mod graph;
pub mod parser;
pub mod pipeline;
pub mod rules;
pub mod timeline;

pub use classify::TechniqueClassifier;
pub use enrich::{IndicatorSet, IocEnricher};
pub use graph::GraphProjector;
pub use parser::LogParser;
pub use pipeline::{IngestOutcome, IngestPipeline, PipelineConfig, PipelineMetrics};
pub use rules::AnomalyRuleEngine;
pub use timeline::TimelineBuilder;

// =============================================================================
// Core Types
// =============================================================================

/// One security event flowing through the pipeline.
///
/// `time` is kept as the source's native string and compared lexically; the
/// ordering guarantee therefore only holds for ISO-8601-like inputs. This is
/// a documented format precondition, not something the pipeline checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Opaque unique identifier, assigned at parse time.
    pub id: String,
    /// Timestamp string in the source's native format.
    pub time: String,
    /// Acting entity (host, user, IP) as written in the log line.
    pub source: String,
    /// Target entity; equals `source` for undirected lines.
    pub target: String,
    /// Free-text description. Later stages append annotations to it.
    pub summary: String,
    /// Untouched original line, kept for audit and re-scanning.
    #[serde(default)]
    pub raw: RawRecord,
    /// Matched indicators of compromise, sorted and deduplicated.
    #[serde(default)]
    pub iocs: Vec<String>,
    /// MITRE ATT&CK tactic, set at most once by the classifier.
    #[serde(default)]
    pub tactic: Option<String>,
    /// MITRE ATT&CK technique, set together with `tactic`.
    #[serde(default)]
    pub technique: Option<String>,
    /// 1-based position in the built timeline; `None` before that stage.
    #[serde(rename = "stepNum", default)]
    pub step_num: Option<u32>,
}

/// Verbatim source payload carried by every event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub line: String,
}

/// The ordered, sequence-numbered event collection produced by one run.
///
/// After construction `step_num` values form a contiguous `1..=N` sequence
/// in ascending `time` order, ties broken by original parse order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    pub events: Vec<Event>,
}

/// Derived actor/asset view of a [`Timeline`].
///
/// Rebuilt from scratch on every projection; holds no independent state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// A distinct actor/asset identifier. First-seen label wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
}

/// One edge per timeline event. `id` equals the originating event id and is
/// the join key back to the timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub tactic: Option<String>,
    pub technique: Option<String>,
    #[serde(rename = "stepNum")]
    pub step_num: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_with_wire_field_names() {
        let event = Event {
            id: "e1".into(),
            time: "2024-01-01T10:00:00".into(),
            source: "hostA".into(),
            target: "db01".into(),
            summary: "failed login".into(),
            raw: RawRecord {
                line: "2024-01-01T10:00:00 hostA -> db01 : failed login".into(),
            },
            iocs: vec![],
            tactic: None,
            technique: None,
            step_num: Some(1),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["stepNum"], 1);
        assert_eq!(
            json["raw"]["line"],
            "2024-01-01T10:00:00 hostA -> db01 : failed login"
        );
    }

    #[test]
    fn event_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "e1",
            "time": "2024-01-01T10:00:00",
            "source": "hostA",
            "target": "hostA",
            "summary": "port scan"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.iocs.is_empty());
        assert!(event.tactic.is_none());
        assert!(event.step_num.is_none());
    }
}
