//! distrank CLI: load a graph, run the worker cluster, report the ranks.

use anyhow::Result;
use clap::Parser;
use distrank::{read_adjacency, run, top, write_report, PageRankOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "distrank", version, about = "Distributed PageRank over an adjacency-list file")]
struct Args {
    /// Input file: one line per vertex, `<id> [neighbor...]`
    input: PathBuf,

    /// Output file for the full ranking
    output: PathBuf,

    /// Convergence threshold on the max per-vertex change
    #[arg(long, default_value_t = 0.001)]
    delta: f64,

    /// Damping factor (probability of following a link)
    #[arg(long, default_value_t = 0.85)]
    damping: f64,

    /// Number of workers (defaults to the number of CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Stop after this many rounds even if not converged
    #[arg(long)]
    max_rounds: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let options = PageRankOptions {
        workers: args.workers.unwrap_or_else(num_cpus::get).max(1),
        damping: args.damping,
        delta: args.delta,
        max_rounds: args.max_rounds,
    };

    let graph = read_adjacency(&args.input).await?;
    log::info!(
        "loaded {} vertices / {} edges, running {} workers",
        graph.num_vertices(),
        graph.num_edges(),
        options.workers
    );

    let ranks = run(&graph, &options)?;
    write_report(&args.output, &ranks).await?;

    let sum: f64 = ranks.iter().sum();
    println!("Total of all pageranks: {sum}");
    println!("These are the top 10 pageranks:");
    for (vertex, rank) in top(&ranks, 10) {
        println!("[{vertex}: {rank}]");
    }
    Ok(())
}
