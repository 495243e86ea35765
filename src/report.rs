//! Result formatting
//!
//! Turns the converged rank vector into the report file (sum of ranks,
//! every vertex in descending rank order, a separator after the top 10)
//! and the console top-10 summary.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

/// How many leading entries the report sets apart
const TOP_ENTRIES: usize = 10;

/// Vertices paired with their ranks, highest rank first
///
/// Ties break toward the lower vertex id so the ordering is deterministic.
#[must_use]
pub fn ranking(ranks: &[f64]) -> Vec<(u32, f64)> {
    #[allow(clippy::cast_possible_truncation)] // dense ids fit u32
    let mut ranked: Vec<(u32, f64)> = ranks
        .iter()
        .enumerate()
        .map(|(v, &r)| (v as u32, r))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// The `k` highest-ranked vertices
#[must_use]
pub fn top(ranks: &[f64], k: usize) -> Vec<(u32, f64)> {
    let mut ranked = ranking(ranks);
    ranked.truncate(k);
    ranked
}

/// Render the full report
///
/// First line is the sum of all ranks (expected ~1.0), then one
/// `[id: rank]` line per vertex in descending rank order, with a dashed
/// separator after exactly the top 10 entries.
#[must_use]
pub fn render_report(ranks: &[f64]) -> String {
    let sum: f64 = ranks.iter().sum();
    let ranked = ranking(ranks);

    let mut out = String::new();
    let _ = writeln!(out, "Sum of pageranks: {sum}");
    for (position, (vertex, rank)) in ranked.iter().enumerate() {
        if position == TOP_ENTRIES {
            out.push_str("----------------------------------------------------\n");
        }
        let _ = writeln!(out, "[{vertex}: {rank}]");
    }
    out
}

/// Write the report to `path`
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub async fn write_report<P: AsRef<Path>>(path: P, ranks: &[f64]) -> Result<()> {
    let path = path.as_ref();
    tokio::fs::write(path, render_report(ranks))
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
