//! openCypher HTTP graph store
//!
//! Persists graphs to an openCypher-over-HTTP endpoint (Amazon Neptune and
//! compatible databases). Writes are wrapped in BEGIN/COMMIT with ROLLBACK
//! on any failure, so a partial write never becomes visible.

use crate::{GraphStore, StoreError};
use sentinel_core::{Graph, GraphEdge, GraphNode};
use serde_json::{json, Value};

/// Connection settings for the openCypher endpoint.
#[derive(Debug, Clone)]
pub struct CypherConfig {
    pub endpoint: String,
    pub port: u16,
    /// Managed graph databases commonly front the endpoint with
    /// certificates the client cannot verify; opt in explicitly.
    pub accept_invalid_certs: bool,
}

impl CypherConfig {
    /// Read `GRAPH_DB_ENDPOINT` / `GRAPH_DB_PORT` from the environment.
    /// Returns `None` when no endpoint is set, which selects the in-memory
    /// store at the service boundary.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("GRAPH_DB_ENDPOINT").ok()?;
        let port = std::env::var("GRAPH_DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8182);
        Some(Self {
            endpoint,
            port,
            accept_invalid_certs: true,
        })
    }
}

pub struct CypherGraphStore {
    base: String,
    client: reqwest::Client,
}

impl CypherGraphStore {
    pub fn new(config: CypherConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;
        Ok(Self {
            base: format!("https://{}:{}/openCypher", config.endpoint, config.port),
            client,
        })
    }

    async fn run(&self, query: &str) -> Result<Value, StoreError> {
        let response = self
            .client
            .post(&self.base)
            .json(&json!({ "query": query }))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn write_all(&self, graph: &Graph) -> Result<(), StoreError> {
        self.run("BEGIN").await?;

        let result = async {
            for node in &graph.nodes {
                self.run(&merge_node_query(node)).await?;
            }
            for edge in &graph.edges {
                self.run(&merge_edge_query(edge)).await?;
            }
            Ok::<(), StoreError>(())
        }
        .await;

        match result {
            Ok(()) => {
                self.run("COMMIT").await?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "graph write failed, rolling back");
                // Best effort; the original error is the one worth surfacing.
                let _ = self.run("ROLLBACK").await;
                Err(err)
            }
        }
    }
}

#[async_trait::async_trait]
impl GraphStore for CypherGraphStore {
    async fn upsert(&self, graph: &Graph) -> Result<Graph, StoreError> {
        self.write_all(graph).await?;
        self.read().await
    }

    async fn read(&self) -> Result<Graph, StoreError> {
        let nodes_response = self
            .run("MATCH (n:Node) RETURN n.id AS id, n.label AS label")
            .await?;
        let edges_response = self
            .run(
                "MATCH (a:Node)-[r:STEP]->(b:Node) \
                 RETURN r.id, a.id, b.id, r.label, r.tactic, r.technique, r.stepNum \
                 ORDER BY r.stepNum",
            )
            .await?;

        let nodes = rows(&nodes_response)?
            .into_iter()
            .map(|row| GraphNode {
                id: row_str(row, 0),
                label: row_str(row, 1),
            })
            .collect();

        let edges = rows(&edges_response)?
            .into_iter()
            .map(|row| GraphEdge {
                id: row_str(row, 0),
                source: row_str(row, 1),
                target: row_str(row, 2),
                label: row_str(row, 3),
                tactic: row_opt_str(row, 4),
                technique: row_opt_str(row, 5),
                step_num: row_u32(row, 6),
            })
            .collect();

        Ok(Graph { nodes, edges })
    }
}

fn merge_node_query(node: &GraphNode) -> String {
    format!(
        "MERGE (n:Node {{id:'{id}'}}) SET n.label='{label}'",
        id = escape(&node.id),
        label = escape(&node.label),
    )
}

fn merge_edge_query(edge: &GraphEdge) -> String {
    format!(
        "MATCH (s:Node {{id:'{src}'}}),(t:Node {{id:'{dst}'}}) \
         MERGE (s)-[r:STEP {{id:'{id}'}}]->(t) \
         SET r.label='{label}', r.tactic='{tactic}', r.technique='{technique}', r.stepNum={step}",
        src = escape(&edge.source),
        dst = escape(&edge.target),
        id = escape(&edge.id),
        label = escape(&edge.label),
        tactic = escape(edge.tactic.as_deref().unwrap_or("")),
        technique = escape(edge.technique.as_deref().unwrap_or("")),
        step = edge.step_num,
    )
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Pull `results[0].data[*].row` out of an openCypher response body.
fn rows(response: &Value) -> Result<Vec<&Value>, StoreError> {
    response
        .pointer("/results/0/data")
        .and_then(Value::as_array)
        .map(|data| data.iter().filter_map(|d| d.get("row")).collect())
        .ok_or_else(|| StoreError::BadResponse("missing results[0].data".to_string()))
}

fn row_str(row: &Value, index: usize) -> String {
    row.get(index)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn row_opt_str(row: &Value, index: usize) -> Option<String> {
    match row.get(index).and_then(Value::as_str) {
        Some("") | None => None,
        Some(s) => Some(s.to_string()),
    }
}

fn row_u32(row: &Value, index: usize) -> u32 {
    let value = row.get(index);
    value
        .and_then(Value::as_u64)
        .or_else(|| value.and_then(Value::as_str).and_then(|s| s.parse().ok()))
        .unwrap_or(0) as u32
}
