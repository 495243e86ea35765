//! Blocking all-reduce over per-round partial results
//!
//! Every worker contributes a [`RoundUpdate`] and every worker receives
//! the identical [`Reduced`] sum before any of them proceeds, giving the
//! round loop its global synchronization barrier. The implementation is a
//! rank-0 gather followed by a broadcast, which has the same observable
//! semantics as a true all-reduce for a commutative reduction.
//!
//! Summation happens in gather-arrival order, which is unspecified across
//! workers; callers may rely on the converged numeric result within
//! floating-point tolerance, never on bit-exact reproducibility.

use super::ProtocolError;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;

/// One worker's output for one round
#[derive(Debug, Clone)]
pub struct RoundUpdate {
    /// Damped rank contributions to every vertex (length = total vertices),
    /// nonzero only where this worker's vertices link
    pub contributions: Vec<f64>,
    /// Damped rank mass of this worker's dangling vertices, already
    /// divided by the total vertex count
    pub dangling: f64,
}

/// Element-wise sum of every worker's round update
#[derive(Debug, Clone)]
pub struct Reduced {
    /// Summed contribution vector
    pub contributions: Vec<f64>,
    /// Summed dangling mass
    pub dangling: f64,
}

/// One worker's handle on the collective
///
/// Exactly one handle is the root (index 0); it performs the reduction.
/// All handles expose the same blocking [`Collective::all_reduce`].
#[derive(Debug)]
pub enum Collective {
    /// Reducing side: gathers every update, sums, broadcasts
    Root {
        /// Number of workers in the cluster
        workers: usize,
        /// Expected contribution-vector length (total vertex count)
        total_vertices: usize,
        /// Incoming updates from workers 1..k
        gather: Receiver<(usize, RoundUpdate)>,
        /// Outgoing reduced results to workers 1..k
        results: Vec<Sender<Arc<Reduced>>>,
    },
    /// Contributing side: sends its update, waits for the reduction
    Member {
        /// This worker's index (1..k)
        worker: usize,
        /// Update channel to the root
        gather: Sender<(usize, RoundUpdate)>,
        /// Reduced result from the root
        results: Receiver<Arc<Reduced>>,
    },
}

/// Build the collective for a cluster of `workers`
///
/// Returns one handle per worker, index 0 first (the root).
///
/// # Panics
///
/// Panics if `workers` is 0.
#[must_use]
pub fn collective(workers: usize, total_vertices: usize) -> Vec<Collective> {
    assert!(workers >= 1, "cluster must have at least one worker");

    let (gather_tx, gather_rx) = unbounded();
    let mut result_txs = Vec::with_capacity(workers - 1);
    let mut handles = Vec::with_capacity(workers);

    for worker in 1..workers {
        let (result_tx, result_rx) = unbounded();
        result_txs.push(result_tx);
        handles.push(Collective::Member {
            worker,
            gather: gather_tx.clone(),
            results: result_rx,
        });
    }

    handles.insert(
        0,
        Collective::Root {
            workers,
            total_vertices,
            gather: gather_rx,
            results: result_txs,
        },
    );
    handles
}

impl Collective {
    /// Contribute one round's update and block until every worker has
    ///
    /// Every caller receives the identical reduced value. No worker can
    /// return from this call before all `workers` updates are in.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::PartialLengthMismatch`] if any partial
    /// vector's length differs from the total vertex count, or
    /// [`ProtocolError::Disconnected`] if a peer hung up mid-round.
    pub fn all_reduce(&self, update: RoundUpdate) -> Result<Arc<Reduced>, ProtocolError> {
        match self {
            Collective::Root {
                workers,
                total_vertices,
                gather,
                results,
            } => {
                Self::check_length(0, *total_vertices, &update)?;
                let mut sum = update.contributions;
                let mut dangling = update.dangling;

                for _ in 1..*workers {
                    let (worker, partial) = gather.recv()?;
                    Self::check_length(worker, *total_vertices, &partial)?;
                    for (acc, value) in sum.iter_mut().zip(&partial.contributions) {
                        *acc += value;
                    }
                    dangling += partial.dangling;
                }

                let reduced = Arc::new(Reduced {
                    contributions: sum,
                    dangling,
                });
                for result in results {
                    result.send(Arc::clone(&reduced))?;
                }
                Ok(reduced)
            }
            Collective::Member {
                worker,
                gather,
                results,
            } => {
                gather.send((*worker, update))?;
                Ok(results.recv()?)
            }
        }
    }

    fn check_length(
        worker: usize,
        expected: usize,
        update: &RoundUpdate,
    ) -> Result<(), ProtocolError> {
        if update.contributions.len() == expected {
            Ok(())
        } else {
            Err(ProtocolError::PartialLengthMismatch {
                worker,
                expected,
                actual: update.contributions.len(),
            })
        }
    }
}
