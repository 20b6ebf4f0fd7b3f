//! Log line parsing
//!
//! Turn raw multi-line text into provisional events, one per recognized
//! line, preserving input order.

use crate::{Event, RawRecord};
use regex::Regex;

/// Line parser for the two recognized log shapes:
///
/// - `<time> <source> -> <target> : <message>` (directed)
/// - `<time> <source> : <message>` (undirected; target = source)
///
/// Lines matching neither shape are dropped silently. Malformed input is a
/// lossy-ingestion policy here, never an error.
pub struct LogParser {
    directed: Regex,
    undirected: Regex,
}

impl LogParser {
    pub fn new() -> Self {
        Self {
            directed: Regex::new(r"^([0-9TZ:\-]+)\s+(\S+)\s*->\s*(\S+)\s*:\s*(.+)$")
                .expect("directed line pattern"),
            undirected: Regex::new(r"^([0-9TZ:\-]+)\s+(\S+)\s*:\s*(.+)$")
                .expect("undirected line pattern"),
        }
    }

    /// Parse raw text into events. Blank and unrecognized lines are skipped.
    pub fn parse(&self, text: &str) -> Vec<Event> {
        let mut events = Vec::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (time, source, target, summary) =
                if let Some(caps) = self.directed.captures(trimmed) {
                    (
                        caps[1].to_string(),
                        caps[2].to_string(),
                        caps[3].to_string(),
                        caps[4].to_string(),
                    )
                } else if let Some(caps) = self.undirected.captures(trimmed) {
                    (
                        caps[1].to_string(),
                        caps[2].to_string(),
                        caps[2].to_string(),
                        caps[3].to_string(),
                    )
                } else {
                    tracing::debug!(line, "dropping unrecognized log line");
                    continue;
                };

            events.push(Event {
                id: uuid::Uuid::new_v4().to_string(),
                time,
                source,
                target,
                summary,
                raw: RawRecord {
                    line: line.to_string(),
                },
                iocs: Vec::new(),
                tactic: None,
                technique: None,
                step_num: None,
            });
        }

        events
    }
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}
