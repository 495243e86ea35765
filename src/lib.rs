//! distrank: distributed PageRank over a fixed worker cluster
//!
//! # Overview
//!
//! distrank computes the PageRank of a directed graph with a fixed set of
//! cooperating workers. Each worker owns the `vertex % workers` partition
//! of the adjacency list, computes its partial rank contributions every
//! round, and joins a blocking all-reduce that hands every worker the
//! identical next rank vector. The loop repeats until the largest
//! per-vertex change drops below a configured delta.
//!
//! # Quick Start
//!
//! ```no_run
//! use distrank::{read_adjacency, run, write_report, PageRankOptions};
//!
//! # async fn example() -> distrank::Result<()> {
//! let graph = read_adjacency("graph.txt").await?;
//!
//! let options = PageRankOptions { workers: 4, ..PageRankOptions::default() };
//! let ranks = run(&graph, &options)?;
//!
//! write_report("ranks.txt", &ranks).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Storage**: adjacency-list graph, loaded once by the coordinator
//! - **Cluster**: modulo partitioner, length-then-payload framed
//!   distribution, gather-broadcast all-reduce
//! - **Engine**: per-round local pass + synchronized round loop
//! - **Report**: descending ranking with top-10 summary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cluster;
pub mod engine;
pub mod report;
pub mod storage;

// Re-export core types
pub use cluster::{owned_vertices, owner, Partition, ProtocolError};
pub use engine::{run, PageRankOptions};
pub use report::{ranking, render_report, top, write_report};
pub use storage::{parse_adjacency, read_adjacency, AdjacencyGraph, VertexId};

// Error type
pub use anyhow::{Error, Result};
