//! Anomaly rule engine
//!
//! Deterministic rules evaluated over the whole event collection. Rules may
//! aggregate (count across events) and only ever annotate summaries; they
//! never remove or reorder events.

use crate::Event;
use std::collections::HashMap;

/// Annotation appended by [`FailedLoginBurst`].
pub const BRUTE_FORCE_MARKER: &str = "[rule:possible brute-force]";

/// One independent anomaly rule. Each rule takes the full event set so it
/// can count across events; adding a rule never requires touching another.
pub trait AnomalyRule: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, events: Vec<Event>) -> Vec<Event>;
}

/// Frequency rule: a source producing `threshold` or more summaries
/// containing "fail" (case-insensitive) gets every such event annotated
/// with [`BRUTE_FORCE_MARKER`]. Re-application is a no-op for events that
/// already carry the marker.
pub struct FailedLoginBurst {
    threshold: usize,
}

impl FailedLoginBurst {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl Default for FailedLoginBurst {
    fn default() -> Self {
        Self::new(5)
    }
}

impl AnomalyRule for FailedLoginBurst {
    fn name(&self) -> &str {
        "failed-login-burst"
    }

    fn apply(&self, mut events: Vec<Event>) -> Vec<Event> {
        let mut failures: HashMap<&str, usize> = HashMap::new();
        for event in &events {
            if event.summary.to_lowercase().contains("fail") {
                *failures.entry(event.source.as_str()).or_insert(0) += 1;
            }
        }

        let offenders: Vec<String> = failures
            .into_iter()
            .filter(|(_, count)| *count >= self.threshold)
            .map(|(source, _)| source.to_string())
            .collect();

        for event in &mut events {
            if offenders.iter().any(|s| *s == event.source)
                && event.summary.to_lowercase().contains("fail")
                && !event.summary.contains(BRUTE_FORCE_MARKER)
            {
                event.summary.push(' ');
                event.summary.push_str(BRUTE_FORCE_MARKER);
            }
        }

        events
    }
}

/// Ordered list of rules applied in registration order.
pub struct AnomalyRuleEngine {
    rules: Vec<Box<dyn AnomalyRule>>,
}

impl AnomalyRuleEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Engine preloaded with the built-in rule set.
    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.register(Box::new(FailedLoginBurst::default()));
        engine
    }

    pub fn register(&mut self, rule: Box<dyn AnomalyRule>) {
        self.rules.push(rule);
    }

    pub fn apply(&self, mut events: Vec<Event>) -> Vec<Event> {
        for rule in &self.rules {
            tracing::debug!(rule = rule.name(), events = events.len(), "applying rule");
            events = rule.apply(events);
        }
        events
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for AnomalyRuleEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
