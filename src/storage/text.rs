//! Adjacency-list text format
//!
//! One line per vertex: whitespace-separated integers where the first is
//! the vertex id and the rest (possibly none) are its outbound neighbor
//! ids. A line with only a vertex id marks a dangling vertex.
//!
//! ```text
//! 0
//! 1 2
//! 2 1
//! 3 0 1
//! ```

use super::AdjacencyGraph;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Parse the adjacency-list text format into a graph
///
/// Blank lines are ignored. Any non-integer token is fatal: the loader
/// aborts before any distribution happens rather than guessing at intent.
///
/// # Errors
///
/// Returns an error on non-integer tokens or on any of the density
/// violations [`AdjacencyGraph::from_entries`] rejects.
pub fn parse_adjacency(text: &str) -> Result<AdjacencyGraph> {
    let mut entries = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        let id: u32 = first
            .parse()
            .with_context(|| format!("line {}: invalid vertex id {first:?}", line_no + 1))?;
        let neighbors = tokens
            .map(|tok| {
                tok.parse().with_context(|| {
                    format!("line {}: invalid neighbor id {tok:?} for vertex {id}", line_no + 1)
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        entries.push((id, neighbors));
    }

    AdjacencyGraph::from_entries(entries)
}

/// Load a graph from an adjacency-list file
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to parse.
pub async fn read_adjacency<P: AsRef<Path>>(path: P) -> Result<AdjacencyGraph> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    if text.trim().is_empty() {
        bail!("{} contains no adjacency lines", path.display());
    }
    parse_adjacency(&text).with_context(|| format!("malformed graph in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::VertexId;
    use tempfile::tempdir;

    #[test]
    fn test_parse_basic() {
        let graph = parse_adjacency("0\n1 2\n2 1\n3 0 1\n").unwrap();
        assert_eq!(graph.num_vertices(), 4);
        assert!(graph.is_dangling(VertexId(0)));
        assert_eq!(graph.neighbors(VertexId(3)).unwrap(), &[0, 1]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let graph = parse_adjacency("0 1\n\n1 0\n\n").unwrap();
        assert_eq!(graph.num_vertices(), 2);
    }

    #[test]
    fn test_parse_rejects_non_integer() {
        let err = parse_adjacency("0 1\n1 x\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err:#}");
    }

    #[test]
    fn test_parse_rejects_missing_line() {
        let err = parse_adjacency("0 1 7\n1 0\n").unwrap_err();
        assert!(format!("{err:#}").contains('7'));
    }

    #[tokio::test]
    async fn test_read_adjacency_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.txt");
        tokio::fs::write(&path, "0 1\n1 0\n").await.unwrap();

        let graph = read_adjacency(&path).await.unwrap();
        assert_eq!(graph.num_vertices(), 2);
        assert_eq!(graph.num_edges(), 2);
    }

    #[tokio::test]
    async fn test_read_adjacency_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_adjacency(dir.path().join("nope.txt")).await.unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }

    #[tokio::test]
    async fn test_read_adjacency_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        tokio::fs::write(&path, "\n").await.unwrap();
        assert!(read_adjacency(&path).await.is_err());
    }
}
