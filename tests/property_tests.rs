//! Property-based tests for distrank
//!
//! Verifies the partitioning, reduction, and convergence invariants hold
//! for arbitrary graphs.

use distrank::cluster::{collective, owned_vertices, owner, Partition, RoundUpdate};
use distrank::engine::{local_pass, next_ranks};
use distrank::{run, AdjacencyGraph, PageRankOptions};
use proptest::prelude::*;

/// Arbitrary dense graph: for each vertex, an arbitrary (possibly empty,
/// possibly duplicated) neighbor list inside the id range.
fn prop_graph(max_vertices: usize) -> impl Strategy<Value = AdjacencyGraph> {
    (1..=max_vertices).prop_flat_map(|n| {
        proptest::collection::vec(
            proptest::collection::vec(0..n as u32, 0..8),
            n,
        )
        .prop_map(|lists| {
            let entries = lists
                .into_iter()
                .enumerate()
                .map(|(v, neighbors)| (v as u32, neighbors))
                .collect();
            AdjacencyGraph::from_entries(entries).unwrap()
        })
    })
}

// Property: every vertex has exactly one owner, and it is v mod k
proptest! {
    #[test]
    fn prop_owner_is_modulo_and_unique(vertex in 0..100_000_u32, workers in 1..64_usize) {
        prop_assert_eq!(owner(vertex, workers), vertex as usize % workers);

        let owners: Vec<usize> = (0..workers)
            .filter(|&w| owned_vertices(w, workers, vertex as usize + 1).any(|v| v == vertex))
            .collect();
        prop_assert_eq!(owners.len(), 1);
        prop_assert_eq!(owners[0], owner(vertex, workers));
    }
}

// Property: dangling vertices contribute only to the dangling scalar
proptest! {
    #[test]
    fn prop_dangling_rank_never_enters_contributions(n in 1..40_usize, damping in 0.05..0.95_f64) {
        let mut partition = Partition::new();
        for v in 0..n as u32 {
            partition.insert(v, Vec::new());
        }
        let ranks = vec![1.0 / n as f64; n];

        let update = local_pass(&partition, &ranks, damping);

        prop_assert!(update.contributions.iter().all(|&c| c == 0.0));
        prop_assert!((update.dangling - damping / n as f64).abs() < 1e-12);
    }
}

// Property: the reduction is order-independent within tolerance
proptest! {
    #[test]
    fn prop_reduction_order_independent(
        partials in proptest::collection::vec(
            (proptest::collection::vec(0.0..1.0_f64, 5), 0.0..0.2_f64),
            1..6,
        )
    ) {
        let reduce = |order: &[usize]| {
            let mut sum = vec![0.0_f64; 5];
            let mut dangling = 0.0;
            for &i in order {
                for (acc, value) in sum.iter_mut().zip(&partials[i].0) {
                    *acc += value;
                }
                dangling += partials[i].1;
            }
            (sum, dangling)
        };

        let forward: Vec<usize> = (0..partials.len()).collect();
        let reverse: Vec<usize> = (0..partials.len()).rev().collect();
        let (sum_fwd, dangling_fwd) = reduce(&forward);
        let (sum_rev, dangling_rev) = reduce(&reverse);

        for (a, b) in sum_fwd.iter().zip(&sum_rev) {
            prop_assert!((a - b).abs() < 1e-12);
        }
        prop_assert!((dangling_fwd - dangling_rev).abs() < 1e-12);
    }
}

// Property: one aggregated round preserves sum-to-one
proptest! {
    #[test]
    fn prop_single_round_preserves_probability_mass(graph in prop_graph(30), damping in 0.05..0.95_f64) {
        let n = graph.num_vertices();
        let ranks = vec![1.0 / n as f64; n];

        let mut partition = Partition::new();
        for (v, neighbors) in graph.iter() {
            partition.insert(v, neighbors.to_vec());
        }

        let update = local_pass(&partition, &ranks, damping);
        let handles = collective(1, n);
        let reduced = handles[0]
            .all_reduce(RoundUpdate {
                contributions: update.contributions,
                dangling: update.dangling,
            })
            .unwrap();
        let next = next_ranks(&reduced, damping);

        prop_assert!((next.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }
}

// Property: converged result sums to one and ignores worker count
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn prop_result_independent_of_worker_count(graph in prop_graph(20), workers in 2..6_usize) {
        let baseline = run(&graph, &PageRankOptions::default()).unwrap();
        prop_assert!((baseline.iter().sum::<f64>() - 1.0).abs() < 1e-6);

        let options = PageRankOptions { workers, ..PageRankOptions::default() };
        let ranks = run(&graph, &options).unwrap();

        prop_assert_eq!(ranks.len(), baseline.len());
        for (a, b) in baseline.iter().zip(&ranks) {
            prop_assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }
}
