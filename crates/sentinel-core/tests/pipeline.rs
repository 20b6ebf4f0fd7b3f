//! End-to-end pipeline properties over full log submissions.

use sentinel_core::rules::BRUTE_FORCE_MARKER;
use sentinel_core::{IngestPipeline, LogParser};
use std::collections::HashSet;

fn brute_force_submission() -> String {
    let mut lines: Vec<String> = (0..5)
        .map(|i| format!("2024-01-01T10:00:{:02} hostA -> db01 : failed login", i))
        .collect();
    lines.push("2024-01-01T10:01:00 hostA -> db01 : failed login again".to_string());
    lines.join("\n")
}

#[test]
fn parsed_event_count_never_exceeds_line_count() {
    let text = "2024-01-01T10:00:00 hostA : ok\n\
                garbage line\n\
                2024-01-01T10:01:00 hostB -> db01 : read\n\
                another malformed entry";
    let events = LogParser::new().parse(text);

    assert!(events.len() <= text.lines().count());
    assert_eq!(events.len(), 2);
}

#[test]
fn one_malformed_line_out_of_three_drops_exactly_one_event() {
    let text = "2024-01-01T10:00:00 hostA : ok\n\
                no recognizable shape here\n\
                2024-01-01T10:01:00 hostB : also ok";
    let outcome = IngestPipeline::default().run(text);

    assert_eq!(outcome.timeline.events.len(), 2);
}

#[test]
fn brute_force_example_annotates_once_and_projects_two_nodes_six_edges() {
    let outcome = IngestPipeline::default().run(&brute_force_submission());

    for event in &outcome.timeline.events {
        assert_eq!(event.summary.matches(BRUTE_FORCE_MARKER).count(), 1);
    }

    assert_eq!(outcome.graph.nodes.len(), 2);
    assert_eq!(outcome.graph.edges.len(), 6);
    let node_ids: Vec<&str> = outcome.graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids, vec!["hostA", "db01"]);
}

#[test]
fn step_numbers_form_a_contiguous_range_in_time_order() {
    let text = "2024-01-01T10:05:00 c : later\n\
                2024-01-01T10:00:00 a : earliest\n\
                2024-01-01T10:02:00 b : middle";
    let outcome = IngestPipeline::default().run(text);

    let steps: Vec<u32> = outcome
        .timeline
        .events
        .iter()
        .filter_map(|e| e.step_num)
        .collect();
    assert_eq!(steps, vec![1, 2, 3]);

    for pair in outcome.timeline.events.windows(2) {
        assert!(pair[0].time <= pair[1].time);
    }
}

#[test]
fn node_count_equals_distinct_identifiers_and_is_bounded() {
    let text = "2024-01-01T10:00:00 hostA -> db01 : read\n\
                2024-01-01T10:01:00 hostA -> fw01 : probe\n\
                2024-01-01T10:02:00 db01 -> fw01 : sync";
    let outcome = IngestPipeline::default().run(text);

    let mut distinct: HashSet<&str> = HashSet::new();
    for event in &outcome.timeline.events {
        distinct.insert(&event.source);
        distinct.insert(&event.target);
    }

    assert_eq!(outcome.graph.nodes.len(), distinct.len());
    assert!(outcome.graph.nodes.len() <= 2 * outcome.timeline.events.len());
}

#[test]
fn every_edge_joins_to_exactly_one_timeline_event() {
    let outcome = IngestPipeline::default().run(&brute_force_submission());

    for edge in &outcome.graph.edges {
        let matches = outcome
            .timeline
            .events
            .iter()
            .filter(|e| e.id == edge.id)
            .count();
        assert_eq!(matches, 1);
    }
}

#[test]
fn classifier_labels_survive_into_the_graph() {
    let outcome =
        IngestPipeline::default().run("2024-01-01T10:00:00 hostA -> dmz01 : exfil staging");

    assert_eq!(
        outcome.graph.edges[0].tactic.as_deref(),
        Some("Exfiltration")
    );
    assert_eq!(
        outcome.graph.edges[0].technique.as_deref(),
        Some("T1041 Exfiltration Over C2")
    );
}

#[test]
fn rerunning_the_pipeline_over_its_own_output_text_is_stable() {
    // Annotated summaries contain "brute", but marker dedup keeps the
    // second pass from stacking annotations.
    let pipeline = IngestPipeline::default();
    let first = pipeline.run(&brute_force_submission());

    let replay: String = first
        .timeline
        .events
        .iter()
        .map(|e| format!("{} {} -> {} : {}", e.time, e.source, e.target, e.summary))
        .collect::<Vec<_>>()
        .join("\n");
    let second = pipeline.run(&replay);

    for event in &second.timeline.events {
        assert_eq!(event.summary.matches(BRUTE_FORCE_MARKER).count(), 1);
    }
}
