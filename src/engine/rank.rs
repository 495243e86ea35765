//! Per-round local rank computation
//!
//! Each worker runs [`local_pass`] over its immutable partition against
//! the current global rank vector, producing the damped contributions of
//! its own vertices plus a dangling-mass scalar. Dangling mass stays a
//! scalar here so the local pass is O(edges owned); the uniform
//! redistribution is folded in after the reduction, where an O(n) sweep
//! happens anyway.
//!
//! No clamping or renormalization anywhere in this module: the global
//! sum-to-one invariant is restored entirely by the `(1-d)/n` teleport
//! term applied in [`next_ranks`].

use crate::cluster::{Partition, Reduced, RoundUpdate};

/// Compute one worker's partial contributions for one round
///
/// For each owned vertex `v` with rank `r = ranks[v]`:
/// - dangling (`no outbound links`): `dangling += d * r / n`
/// - otherwise each listed neighbor receives `d * r / out_degree(v)`,
///   once per occurrence (duplicate neighbors count twice).
#[must_use]
#[allow(clippy::cast_precision_loss)] // vertex counts fit f64 exactly
pub fn local_pass(partition: &Partition, ranks: &[f64], damping: f64) -> RoundUpdate {
    let n = ranks.len();
    let mut contributions = vec![0.0; n];
    let mut dangling = 0.0;

    for (vertex, neighbors) in partition.iter() {
        let rank = ranks[vertex as usize];
        if neighbors.is_empty() {
            dangling += damping * rank / n as f64;
        } else {
            let share = damping * rank / neighbors.len() as f64;
            for &neighbor in neighbors {
                contributions[neighbor as usize] += share;
            }
        }
    }

    RoundUpdate {
        contributions,
        dangling,
    }
}

/// Fold the reduced sums into the next global rank vector
///
/// `next[i] = summed[i] + total_dangling + (1 - d) / n`: the dangling mass
/// of the whole cluster lands uniformly on every vertex, and the teleport
/// term restores the probability mass that damping withheld.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn next_ranks(reduced: &Reduced, damping: f64) -> Vec<f64> {
    let n = reduced.contributions.len();
    let teleport = (1.0 - damping) / n as f64;
    reduced
        .contributions
        .iter()
        .map(|&summed| summed + reduced.dangling + teleport)
        .collect()
}

/// Largest absolute per-vertex change between two rank vectors
#[must_use]
pub fn max_delta(previous: &[f64], next: &[f64]) -> f64 {
    previous
        .iter()
        .zip(next)
        .fold(0.0, |max, (p, n)| f64::max(max, (p - n).abs()))
}
