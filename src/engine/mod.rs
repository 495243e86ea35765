//! Rank computation engine
//!
//! The per-round local pass and the synchronized multi-worker runner that
//! drives it to convergence.

pub mod rank;
pub mod runner;

pub use rank::{local_pass, max_delta, next_ranks};
pub use runner::{run, PageRankOptions};
