//! Graph storage layer
//!
//! Provides the adjacency-list graph representation and the text loader
//! for the one-line-per-vertex input format.

pub mod adjacency;
pub mod text;

pub use adjacency::{AdjacencyGraph, VertexId};
pub use text::{parse_adjacency, read_adjacency};
