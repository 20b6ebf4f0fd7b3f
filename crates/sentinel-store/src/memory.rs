//! In-memory graph store
//!
//! Default store when no graph database is configured. Merge-by-id
//! semantics, suitable for demos and tests.

use crate::{GraphStore, StoreError};
use parking_lot::RwLock;
use sentinel_core::Graph;

pub struct MemoryGraphStore {
    inner: RwLock<Graph>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Graph::default()),
        }
    }
}

impl Default for MemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GraphStore for MemoryGraphStore {
    async fn upsert(&self, graph: &Graph) -> Result<Graph, StoreError> {
        let mut stored = self.inner.write();

        for node in &graph.nodes {
            match stored.nodes.iter_mut().find(|n| n.id == node.id) {
                Some(existing) => existing.label = node.label.clone(),
                None => stored.nodes.push(node.clone()),
            }
        }

        for edge in &graph.edges {
            match stored.edges.iter_mut().find(|e| e.id == edge.id) {
                Some(existing) => *existing = edge.clone(),
                None => stored.edges.push(edge.clone()),
            }
        }

        tracing::debug!(
            nodes = stored.nodes.len(),
            edges = stored.edges.len(),
            "memory store upsert"
        );
        Ok(stored.clone())
    }

    async fn read(&self) -> Result<Graph, StoreError> {
        Ok(self.inner.read().clone())
    }
}
