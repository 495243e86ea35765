//! In-memory adjacency-list graph representation
//!
//! The coordinator builds one [`AdjacencyGraph`] from the input file and
//! never mutates it afterwards; workers only ever see the slice of it that
//! the distributor ships to them.
//!
//! Vertex ids are dense: a graph of `n` vertices uses exactly the ids
//! `0..n`, and every id that appears anywhere (including as a neighbor)
//! must have its own adjacency entry.

use anyhow::{bail, Result};

/// Vertex identifier (zero-indexed, dense)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

/// Directed graph as an ordered adjacency list
///
/// Outbound neighbor sequences keep their input order and may contain
/// duplicates. A vertex with an empty neighbor sequence is *dangling*: its
/// rank mass is redistributed uniformly instead of flowing along edges.
///
/// # Example
///
/// ```
/// use distrank::{AdjacencyGraph, VertexId};
///
/// let graph = AdjacencyGraph::from_entries(vec![
///     (0, vec![1, 2]),
///     (1, vec![2]),
///     (2, vec![]),
/// ]).unwrap();
///
/// assert_eq!(graph.num_vertices(), 3);
/// assert_eq!(graph.neighbors(VertexId(0)).unwrap(), &[1, 2]);
/// assert!(graph.is_dangling(VertexId(2)));
/// ```
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    /// lists[v] = outbound neighbors of vertex v
    lists: Vec<Vec<u32>>,
    /// Total number of directed edges
    num_edges: usize,
}

impl AdjacencyGraph {
    /// Build a graph from `(vertex id, neighbors)` entries
    ///
    /// Entries may arrive in any order but must cover exactly the dense id
    /// range `0..entries.len()`, once each, with every neighbor id inside
    /// that range. A neighbor without its own entry means the input claims
    /// a vertex that has no adjacency line, which is unrecoverable input
    /// corruption.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate, missing, or out-of-range vertex ids,
    /// or on a neighbor id with no entry of its own.
    pub fn from_entries(entries: Vec<(u32, Vec<u32>)>) -> Result<Self> {
        let n = entries.len();
        let mut lists: Vec<Option<Vec<u32>>> = vec![None; n];
        let mut num_edges = 0;

        for (id, neighbors) in entries {
            let slot = id as usize;
            if slot >= n {
                bail!("vertex {id} is out of range for a graph of {n} vertices (ids must be dense 0..{n})");
            }
            if lists[slot].is_some() {
                bail!("duplicate adjacency entry for vertex {id}");
            }
            for &neighbor in &neighbors {
                if neighbor as usize >= n {
                    bail!("vertex {id} links to {neighbor}, which has no adjacency entry of its own");
                }
            }
            num_edges += neighbors.len();
            lists[slot] = Some(neighbors);
        }

        // n entries, no duplicates, none out of range: every slot is filled.
        let lists = lists.into_iter().flatten().collect::<Vec<_>>();
        debug_assert_eq!(lists.len(), n);

        Ok(Self { lists, num_edges })
    }

    /// Number of vertices
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.lists.len()
    }

    /// Number of directed edges
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Outbound neighbors of `vertex`, in input order
    ///
    /// # Errors
    ///
    /// Returns an error if `vertex` is not in the graph.
    pub fn neighbors(&self, vertex: VertexId) -> Result<&[u32]> {
        match self.lists.get(vertex.0 as usize) {
            Some(list) => Ok(list),
            None => bail!(
                "vertex {} not in graph ({} vertices)",
                vertex.0,
                self.lists.len()
            ),
        }
    }

    /// Outbound degree of `vertex`, or 0 if it is not in the graph
    #[must_use]
    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.lists
            .get(vertex.0 as usize)
            .map_or(0, std::vec::Vec::len)
    }

    /// Whether `vertex` has no outbound links
    #[must_use]
    pub fn is_dangling(&self, vertex: VertexId) -> bool {
        self.out_degree(vertex) == 0
    }

    /// Iterate `(vertex id, neighbors)` in ascending id order
    #[allow(clippy::cast_possible_truncation)] // ids originate from u32
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[u32])> {
        self.lists
            .iter()
            .enumerate()
            .map(|(v, list)| (v as u32, list.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_out_of_order() {
        let graph = AdjacencyGraph::from_entries(vec![
            (2, vec![0]),
            (0, vec![1, 1, 2]),
            (1, vec![]),
        ])
        .unwrap();

        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 4);
        // Duplicate neighbors are preserved
        assert_eq!(graph.neighbors(VertexId(0)).unwrap(), &[1, 1, 2]);
        assert!(graph.is_dangling(VertexId(1)));
        assert!(!graph.is_dangling(VertexId(2)));
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let err = AdjacencyGraph::from_entries(vec![(0, vec![]), (0, vec![1])]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_missing_line_rejected() {
        // Vertex 5 appears as a neighbor but has no line of its own
        let err = AdjacencyGraph::from_entries(vec![(0, vec![5]), (1, vec![])]).unwrap_err();
        assert!(err.to_string().contains("no adjacency entry"));
    }

    #[test]
    fn test_sparse_ids_rejected() {
        // Ids 0 and 2 with no 1: not dense
        let err = AdjacencyGraph::from_entries(vec![(0, vec![]), (2, vec![])]).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_empty_graph() {
        let graph = AdjacencyGraph::from_entries(Vec::new()).unwrap();
        assert_eq!(graph.num_vertices(), 0);
        assert_eq!(graph.num_edges(), 0);
        assert!(graph.neighbors(VertexId(0)).is_err());
    }

    #[test]
    fn test_iter_ascending() {
        let graph =
            AdjacencyGraph::from_entries(vec![(1, vec![0]), (0, vec![1])]).unwrap();
        let ids: Vec<u32> = graph.iter().map(|(v, _)| v).collect();
        assert_eq!(ids, vec![0, 1]);
    }
}
