//! Synchronized multi-worker PageRank runner
//!
//! One OS thread per worker, fixed for the lifetime of the run. Worker 0
//! is the coordinator: it distributes the graph, then executes the same
//! replicated round loop as everyone else. The blocking all-reduce is the
//! only synchronization point; because every worker applies the identical
//! convergence test to identical inputs, they all stop on the same round
//! with no extra termination message.
//!
//! There is no timeout or partial-result fallback: a stalled worker stalls
//! the run. A worker that *fails* (wire-contract violation) is observed
//! through its closed channels and aborts the whole computation.

use crate::cluster::{collective, distribute, receive_partition, Collective, Partition};
use crate::engine::rank::{local_pass, max_delta, next_ranks};
use crate::storage::AdjacencyGraph;
use anyhow::{anyhow, bail, Context, Result};
use crossbeam_channel::unbounded;
use log::{debug, info, warn};
use std::thread;

/// Tunables for one PageRank run
#[derive(Debug, Clone)]
pub struct PageRankOptions {
    /// Number of workers (fixed for the run, >= 1)
    pub workers: usize,
    /// Damping factor `d`, strictly between 0 and 1
    pub damping: f64,
    /// Convergence threshold on the max per-vertex change
    pub delta: f64,
    /// Optional round cap; `None` iterates until convergence
    pub max_rounds: Option<usize>,
}

impl Default for PageRankOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            damping: 0.85,
            delta: 0.001,
            max_rounds: None,
        }
    }
}

impl PageRankOptions {
    fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            bail!("worker count must be at least 1");
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            bail!("damping factor must lie strictly between 0 and 1, got {}", self.damping);
        }
        if !(self.delta > 0.0) {
            bail!("convergence delta must be positive, got {}", self.delta);
        }
        if self.max_rounds == Some(0) {
            bail!("round cap must be at least 1");
        }
        Ok(())
    }
}

/// Run distributed PageRank to convergence
///
/// Returns the final rank vector (index = vertex id, entries summing to
/// ~1.0). The result is independent of the worker count up to floating-
/// point tolerance: partitioning only decides which thread computes which
/// partial sums.
///
/// # Errors
///
/// Returns an error on invalid options, or on any wire-contract violation
/// or worker failure (all fatal, never retried).
///
/// # Example
///
/// ```
/// use distrank::{run, AdjacencyGraph, PageRankOptions};
///
/// let graph = AdjacencyGraph::from_entries(vec![
///     (0, vec![1]),
///     (1, vec![2]),
///     (2, vec![0]),
/// ]).unwrap();
///
/// let ranks = run(&graph, &PageRankOptions::default()).unwrap();
/// assert!((ranks.iter().sum::<f64>() - 1.0).abs() < 1e-6);
/// ```
pub fn run(graph: &AdjacencyGraph, options: &PageRankOptions) -> Result<Vec<f64>> {
    options.validate()?;

    let total = graph.num_vertices();
    if total == 0 {
        return Ok(Vec::new());
    }
    let workers = options.workers;

    let mut handles = collective(workers, total);
    let root = handles.remove(0);

    let mut mailboxes = Vec::with_capacity(workers - 1);
    let mut inboxes = Vec::with_capacity(workers - 1);
    for _ in 1..workers {
        let (tx, rx) = unbounded();
        mailboxes.push(tx);
        inboxes.push(rx);
    }

    thread::scope(|scope| {
        let joins: Vec<_> = handles
            .into_iter()
            .zip(inboxes)
            .enumerate()
            .map(|(i, (handle, inbox))| {
                let worker = i + 1;
                scope.spawn(move || -> Result<()> {
                    let partition = receive_partition(worker, workers, total, &inbox)?;
                    round_loop(worker, &partition, &handle, total, options)?;
                    Ok(())
                })
            })
            .collect();

        let own = distribute(graph, workers, &mailboxes)?;
        drop(mailboxes);

        let ranks = round_loop(0, &own, &root, total, options);
        // Hanging up the root's channels unblocks any worker still inside
        // a collective call after a coordinator-side failure.
        drop(root);

        for (i, join) in joins.into_iter().enumerate() {
            join.join()
                .map_err(|_| anyhow!("worker {} panicked", i + 1))?
                .with_context(|| format!("worker {} failed", i + 1))?;
        }
        ranks
    })
}

/// The replicated per-worker round loop
#[allow(clippy::cast_precision_loss)]
fn round_loop(
    worker: usize,
    partition: &Partition,
    handle: &Collective,
    total: usize,
    options: &PageRankOptions,
) -> Result<Vec<f64>> {
    let mut ranks = vec![1.0 / total as f64; total];
    let mut round = 0_usize;

    loop {
        round += 1;
        let update = local_pass(partition, &ranks, options.damping);
        let reduced = handle.all_reduce(update)?;
        let next = next_ranks(&reduced, options.damping);
        let delta = max_delta(&ranks, &next);
        ranks = next;

        if delta <= options.delta {
            if worker == 0 {
                info!("converged after {round} rounds (max delta {delta:.3e})");
            }
            return Ok(ranks);
        }
        if worker == 0 {
            debug!("round {round}: max delta {delta:.3e}");
        }
        // Replicated decision: every worker shares the same round counter.
        if options.max_rounds.is_some_and(|cap| round >= cap) {
            if worker == 0 {
                warn!(
                    "stopping after {round} rounds without convergence \
                     (max delta {delta:.3e} > {})",
                    options.delta
                );
            }
            return Ok(ranks);
        }
    }
}
