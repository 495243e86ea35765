//! Static modulo partitioning of vertices across workers
//!
//! The assignment is a pure function of `(vertex id, worker count)`, so
//! the coordinator and every worker compute identical membership without
//! exchanging partition state.

/// Worker that owns `vertex` in a cluster of `workers`
///
/// # Panics
///
/// Panics if `workers` is 0 (a cluster always has at least one worker).
#[must_use]
pub fn owner(vertex: u32, workers: usize) -> usize {
    assert!(workers >= 1, "cluster must have at least one worker");
    vertex as usize % workers
}

/// Ascending iterator over the vertex ids `worker` owns
///
/// This is how a receiving worker knows, without negotiation, exactly
/// which entries the distributor will send it and in what order.
#[allow(clippy::cast_possible_truncation)] // vertex ids are u32 by construction
pub fn owned_vertices(
    worker: usize,
    workers: usize,
    total_vertices: usize,
) -> impl Iterator<Item = u32> {
    assert!(workers >= 1, "cluster must have at least one worker");
    assert!(worker < workers, "worker index out of range");
    (worker..total_vertices).step_by(workers).map(|v| v as u32)
}

/// One worker's exclusively-owned slice of the graph
///
/// Holds `(vertex id, neighbors)` entries in ascending vertex order.
/// Created once during distribution and immutable for the rest of the run.
#[derive(Debug, Clone, Default)]
pub struct Partition {
    entries: Vec<(u32, Vec<u32>)>,
}

impl Partition {
    /// Empty partition
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an adjacency entry
    pub fn insert(&mut self, vertex: u32, neighbors: Vec<u32>) {
        self.entries.push((vertex, neighbors));
    }

    /// Number of owned vertices
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the partition owns no vertices
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate owned `(vertex id, neighbors)` entries
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[u32])> {
        self.entries.iter().map(|(v, n)| (*v, n.as_slice()))
    }
}
