//! IOC enrichment
//!
//! Scan raw event payloads for known-bad indicator literals and attach the
//! matches to each event.

use crate::Event;
use std::collections::{BTreeSet, HashSet};

/// A set of known-bad indicator literals (IPs, domains, hashes).
///
/// The set is injected into the enricher at construction time; this is the
/// seam for a real threat-intelligence feed. No lookups leave the process.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    values: HashSet<String>,
}

impl IndicatorSet {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a set from a newline-delimited feed body. Blank lines and
    /// `#`-prefixed comments are ignored.
    pub fn from_feed(body: &str) -> Self {
        Self::new(
            body.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#')),
        )
    }

    /// Built-in starter feed (documentation-range addresses).
    pub fn builtin() -> Self {
        Self::new(["203.0.113.66", "198.51.100.42", "192.0.2.9"])
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Enricher stage: tokenizes each event's raw line on commas/whitespace and
/// unions indicator matches into the event's `iocs` field. The stored list
/// is sorted and deduplicated so output is deterministic.
pub struct IocEnricher {
    indicators: IndicatorSet,
}

impl IocEnricher {
    pub fn new(indicators: IndicatorSet) -> Self {
        Self { indicators }
    }

    pub fn enrich(&self, mut events: Vec<Event>) -> Vec<Event> {
        for event in &mut events {
            let mut merged: BTreeSet<String> = event.iocs.iter().cloned().collect();
            let before = merged.len();

            for token in event
                .raw
                .line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
            {
                if self.indicators.contains(token) {
                    merged.insert(token.to_string());
                }
            }

            if merged.len() > before {
                tracing::debug!(event = %event.id, hits = merged.len() - before, "IOC match");
            }
            event.iocs = merged.into_iter().collect();
        }

        events
    }
}
