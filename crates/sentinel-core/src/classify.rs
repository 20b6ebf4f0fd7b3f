//! MITRE ATT&CK technique classification
//!
//! Maps free-text summaries to tactic/technique pairs via an ordered
//! keyword table. First match wins; events that already carry a tactic are
//! left alone, so the classifier only ever fills gaps.

use crate::Event;

/// Tactic assigned when no keyword matches and the event has none.
pub const DEFAULT_TACTIC: &str = "Discovery";

/// One row of the classification table.
#[derive(Debug, Clone)]
pub struct KeywordMapping {
    /// Lowercase keyword searched for in the lowered summary.
    pub keyword: String,
    pub tactic: String,
    pub technique: String,
}

impl KeywordMapping {
    pub fn new(keyword: &str, tactic: &str, technique: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            tactic: tactic.to_string(),
            technique: technique.to_string(),
        }
    }
}

/// Ordered keyword classifier. The table is data, not code: swap in a
/// different table (or a smarter classifier behind the same contract)
/// without touching the pipeline.
pub struct TechniqueClassifier {
    table: Vec<KeywordMapping>,
}

impl TechniqueClassifier {
    pub fn new(table: Vec<KeywordMapping>) -> Self {
        Self { table }
    }

    /// Classifier preloaded with the built-in keyword table.
    pub fn with_default_table() -> Self {
        Self::new(vec![
            KeywordMapping::new("ssh", "Credential Access", "T1110 Brute Force"),
            KeywordMapping::new("brute", "Credential Access", "T1110 Brute Force"),
            KeywordMapping::new("rdp", "Lateral Movement", "T1021 Remote Services"),
            KeywordMapping::new("lateral", "Lateral Movement", "T1021 Remote Services"),
            KeywordMapping::new("exfil", "Exfiltration", "T1041 Exfiltration Over C2"),
            KeywordMapping::new("scp", "Exfiltration", "T1048 Exfiltration Over Alt Protocol"),
        ])
    }

    pub fn classify(&self, mut events: Vec<Event>) -> Vec<Event> {
        for event in &mut events {
            if event.tactic.is_some() {
                continue;
            }

            let text = event.summary.to_lowercase();
            match self.table.iter().find(|m| text.contains(&m.keyword)) {
                Some(mapping) => {
                    event.tactic = Some(mapping.tactic.clone());
                    event.technique = Some(mapping.technique.clone());
                }
                None => {
                    event.tactic = Some(DEFAULT_TACTIC.to_string());
                    event.technique = Some(String::new());
                }
            }
        }

        events
    }

    pub fn table_len(&self) -> usize {
        self.table.len()
    }
}

impl Default for TechniqueClassifier {
    fn default() -> Self {
        Self::with_default_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogParser;

    fn classify_one(line: &str) -> Event {
        let events = LogParser::new().parse(line);
        TechniqueClassifier::with_default_table()
            .classify(events)
            .remove(0)
    }

    #[test]
    fn keyword_match_assigns_tactic_and_technique() {
        let event = classify_one("2024-01-01T10:00:00 hostA : SSH login burst");
        assert_eq!(event.tactic.as_deref(), Some("Credential Access"));
        assert_eq!(event.technique.as_deref(), Some("T1110 Brute Force"));
    }

    #[test]
    fn first_matching_row_wins() {
        // "ssh" precedes "exfil" in the table, so both present resolves to ssh.
        let event = classify_one("2024-01-01T10:00:00 hostA : ssh then exfil attempt");
        assert_eq!(event.tactic.as_deref(), Some("Credential Access"));
    }

    #[test]
    fn miss_falls_back_to_default_tactic() {
        let event = classify_one("2024-01-01T10:00:00 hostA : routine heartbeat");
        assert_eq!(event.tactic.as_deref(), Some(DEFAULT_TACTIC));
        assert_eq!(event.technique.as_deref(), Some(""));
    }

    #[test]
    fn existing_tactic_is_never_overwritten() {
        let mut events = LogParser::new().parse("2024-01-01T10:00:00 hostA : rdp session");
        events[0].tactic = Some("Persistence".into());
        events[0].technique = Some("T1098 Account Manipulation".into());

        let events = TechniqueClassifier::with_default_table().classify(events);
        assert_eq!(events[0].tactic.as_deref(), Some("Persistence"));
        assert_eq!(
            events[0].technique.as_deref(),
            Some("T1098 Account Manipulation")
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let event = classify_one("2024-01-01T10:00:00 hostA : LATERAL movement to db01");
        assert_eq!(event.tactic.as_deref(), Some("Lateral Movement"));
    }
}
