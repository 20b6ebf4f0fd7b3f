//! Graph persistence for SentinelMind
//!
//! The core pipeline hands a finished [`Graph`](sentinel_core::Graph) to a
//! store behind the narrow [`GraphStore`] contract: upsert nodes and edges,
//! return the current graph; read the current graph. Transactional
//! semantics are the store's responsibility, never the pipeline's, and a
//! store failure never touches the in-memory pipeline result.

use sentinel_core::Graph;
use thiserror::Error;

pub mod cypher;
pub mod memory;

pub use cypher::{CypherConfig, CypherGraphStore};
pub use memory::MemoryGraphStore;

/// Store errors. Surfaced to the caller; the pipeline's artifacts remain
/// valid regardless.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store not configured: {0}")]
    NotConfigured(String),

    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected backend response: {0}")]
    BadResponse(String),
}

/// Persistence contract consumed by the service layer.
#[async_trait::async_trait]
pub trait GraphStore: Send + Sync {
    /// Merge the given graph into the store by node/edge id and return the
    /// stored graph after the write.
    async fn upsert(&self, graph: &Graph) -> Result<Graph, StoreError>;

    /// Read the currently stored graph.
    async fn read(&self) -> Result<Graph, StoreError>;
}
