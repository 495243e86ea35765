//! Framed distribution of adjacency entries to their owning workers
//!
//! Entries travel as two-phase messages: a length frame first, then the
//! payload of exactly that length, laid out as `[vertex_id, neighbor0,
//! neighbor1, ...]`. The receiver learns the allocation size before the
//! data arrives and can reject anything out of order. Frames to a given
//! worker are FIFO; the coordinator walks vertex ids in ascending order,
//! so each worker receives its owned vertices in ascending order too.

use super::partition::{owned_vertices, owner, Partition};
use super::ProtocolError;
use crate::storage::{AdjacencyGraph, VertexId};
use anyhow::Result;
use crossbeam_channel::{Receiver, Sender};

/// One message of the two-phase entry transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Announces the length of the next `Entry` payload
    Len(usize),
    /// Entry payload: `[vertex_id, neighbor0, neighbor1, ...]`
    Entry(Vec<u32>),
}

/// Coordinator-side distribution of the full graph
///
/// Walks every vertex in ascending order; entries the coordinator itself
/// owns (worker 0) go straight into the returned [`Partition`], all others
/// are framed onto `mailboxes[owner - 1]`.
///
/// # Errors
///
/// Returns an error if a vertex is somehow missing from the graph (input
/// corruption that survived loading) or if a worker mailbox has closed.
#[allow(clippy::cast_possible_truncation)] // dense ids fit u32 by construction
pub fn distribute(
    graph: &AdjacencyGraph,
    workers: usize,
    mailboxes: &[Sender<Frame>],
) -> Result<Partition> {
    debug_assert_eq!(mailboxes.len(), workers - 1);

    let mut own = Partition::new();

    for vertex in 0..graph.num_vertices() as u32 {
        let neighbors = graph.neighbors(VertexId(vertex))?;
        match owner(vertex, workers) {
            0 => own.insert(vertex, neighbors.to_vec()),
            w => {
                let mut payload = Vec::with_capacity(1 + neighbors.len());
                payload.push(vertex);
                payload.extend_from_slice(neighbors);

                let mailbox = &mailboxes[w - 1];
                mailbox
                    .send(Frame::Len(payload.len()))
                    .map_err(ProtocolError::from)?;
                mailbox
                    .send(Frame::Entry(payload))
                    .map_err(ProtocolError::from)?;
            }
        }
    }

    Ok(own)
}

/// Worker-side receive of one partition
///
/// Blocks until every owned entry has arrived. The worker derives its own
/// expected vertex sequence from `(worker, workers, total_vertices)`, so a
/// misrouted or reordered entry is detected immediately.
///
/// # Errors
///
/// Returns a [`ProtocolError`] if frames arrive out of order, a payload
/// does not match its announced length, an entry lands at the wrong
/// worker, or the coordinator hangs up early.
pub fn receive_partition(
    worker: usize,
    workers: usize,
    total_vertices: usize,
    mailbox: &Receiver<Frame>,
) -> Result<Partition, ProtocolError> {
    let mut partition = Partition::new();

    for expected in owned_vertices(worker, workers, total_vertices) {
        let announced = match mailbox.recv()? {
            Frame::Len(len) => len,
            Frame::Entry(_) => return Err(ProtocolError::PayloadBeforeLength),
        };
        let payload = match mailbox.recv()? {
            Frame::Entry(payload) => payload,
            Frame::Len(_) => return Err(ProtocolError::MissingPayload),
        };
        if payload.len() != announced {
            return Err(ProtocolError::FrameLengthMismatch {
                announced,
                actual: payload.len(),
            });
        }
        // Payload always carries at least the vertex id
        let Some((&vertex, neighbors)) = payload.split_first() else {
            return Err(ProtocolError::FrameLengthMismatch {
                announced,
                actual: 0,
            });
        };
        if vertex != expected {
            return Err(ProtocolError::MisroutedEntry {
                worker,
                vertex,
                expected,
            });
        }
        partition.insert(vertex, neighbors.to_vec());
    }

    Ok(partition)
}
