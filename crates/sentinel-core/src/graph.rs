//! Graph projection
//!
//! Fold a timeline into a node/edge graph with deduplicated actors/assets.

use crate::{Graph, GraphEdge, GraphNode, Timeline};
use std::collections::HashSet;

/// Edge labels are the event summary truncated to this many characters, cut
/// on a char boundary with no ellipsis marker.
pub const MAX_EDGE_LABEL_CHARS: usize = 120;

/// Projector stage: walks the timeline in step order, inserting `source`
/// and `target` nodes on first sight and appending one edge per event.
///
/// Node dedup is exact string identity of the identifier: case-sensitive,
/// no trimming. `"HostA"` and `"hosta"` are distinct nodes, and an actor's
/// label is fixed by its earliest appearance.
pub struct GraphProjector;

impl GraphProjector {
    pub fn new() -> Self {
        Self
    }

    pub fn project(&self, timeline: &Timeline) -> Graph {
        let mut seen: HashSet<String> = HashSet::new();
        let mut nodes = Vec::new();
        let mut edges = Vec::with_capacity(timeline.events.len());

        for event in &timeline.events {
            for id in [&event.source, &event.target] {
                if seen.insert(id.clone()) {
                    nodes.push(GraphNode {
                        id: id.clone(),
                        label: id.clone(),
                    });
                }
            }

            edges.push(GraphEdge {
                id: event.id.clone(),
                source: event.source.clone(),
                target: event.target.clone(),
                label: truncate_label(&event.summary),
                tactic: event.tactic.clone(),
                technique: event.technique.clone(),
                step_num: event.step_num.unwrap_or(0),
            });
        }

        Graph { nodes, edges }
    }
}

impl Default for GraphProjector {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_label(summary: &str) -> String {
    summary.chars().take(MAX_EDGE_LABEL_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogParser, TimelineBuilder};

    fn project(text: &str) -> Graph {
        let events = LogParser::new().parse(text);
        let timeline = TimelineBuilder::new().build(events);
        GraphProjector::new().project(&timeline)
    }

    #[test]
    fn nodes_are_deduplicated_across_events() {
        let graph = project(
            "2024-01-01T10:00:00 hostA -> db01 : read\n\
             2024-01-01T10:01:00 hostA -> db01 : write\n\
             2024-01-01T10:02:00 db01 -> backup01 : sync",
        );

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["hostA", "db01", "backup01"]);
        assert_eq!(graph.edges.len(), 3);
    }

    #[test]
    fn node_dedup_is_case_sensitive() {
        let graph = project(
            "2024-01-01T10:00:00 HostA : one\n\
             2024-01-01T10:01:00 hosta : two",
        );

        assert_eq!(graph.nodes.len(), 2);
    }

    #[test]
    fn edge_ids_join_back_to_events() {
        let events = LogParser::new().parse(
            "2024-01-01T10:00:00 hostA -> db01 : read\n\
             2024-01-01T10:01:00 hostB -> db01 : write",
        );
        let timeline = TimelineBuilder::new().build(events);
        let graph = GraphProjector::new().project(&timeline);

        for edge in &graph.edges {
            assert_eq!(
                timeline.events.iter().filter(|e| e.id == edge.id).count(),
                1
            );
        }
    }

    #[test]
    fn edge_labels_are_capped_at_120_chars() {
        let long = "x".repeat(200);
        let graph = project(&format!("2024-01-01T10:00:00 hostA : {long}"));

        assert_eq!(graph.edges[0].label.chars().count(), MAX_EDGE_LABEL_CHARS);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let summary = "é".repeat(130);
        let label = truncate_label(&summary);
        assert_eq!(label.chars().count(), MAX_EDGE_LABEL_CHARS);
    }

    #[test]
    fn undirected_events_project_self_edges_on_one_node() {
        let graph = project("2024-01-01T10:00:00 hostA : local scan");
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.edges[0].source, graph.edges[0].target);
    }
}
