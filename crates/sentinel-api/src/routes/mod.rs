//! Route handlers

pub mod graph;
pub mod health;
pub mod ingest;
pub mod report;
pub mod timeline;
