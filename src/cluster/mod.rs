//! Worker-cluster plumbing
//!
//! Everything the workers need to agree on without negotiation: the pure
//! modulo partitioner, the framed point-to-point distribution of adjacency
//! entries, and the blocking all-reduce collective that merges per-round
//! partial results.
//!
//! All wire-contract failures are [`ProtocolError`]s and are fatal: the
//! workers' state is interdependent by design, so no single exchange can
//! be retried without desynchronizing the global vector.

pub mod collective;
pub mod distribute;
pub mod partition;

pub use collective::{collective, Collective, Reduced, RoundUpdate};
pub use distribute::{distribute, receive_partition, Frame};
pub use partition::{owned_vertices, owner, Partition};

use thiserror::Error;

/// Violations of the inter-worker wire contract
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Entry payload arrived before its length announcement
    #[error("received entry payload before its length frame")]
    PayloadBeforeLength,

    /// Length announcement arrived where a payload was expected
    #[error("received a length frame where the entry payload was expected")]
    MissingPayload,

    /// Payload does not match its announced length
    #[error("entry payload has {actual} values but {announced} were announced")]
    FrameLengthMismatch {
        /// Length declared by the preceding length frame
        announced: usize,
        /// Length actually received
        actual: usize,
    },

    /// An adjacency entry reached a worker that does not own its vertex
    #[error("worker {worker} received entry for vertex {vertex}, expected vertex {expected}")]
    MisroutedEntry {
        /// Receiving worker index
        worker: usize,
        /// Vertex id carried by the payload
        vertex: u32,
        /// Vertex id the worker was waiting for
        expected: u32,
    },

    /// A partial contribution vector has the wrong length
    #[error("worker {worker} contributed a partial vector of length {actual}, expected {expected}")]
    PartialLengthMismatch {
        /// Contributing worker index
        worker: usize,
        /// Expected length (total vertex count)
        expected: usize,
        /// Length actually contributed
        actual: usize,
    },

    /// A peer hung up mid-computation
    #[error("cluster channel closed unexpectedly")]
    Disconnected,
}

impl From<crossbeam_channel::RecvError> for ProtocolError {
    fn from(_: crossbeam_channel::RecvError) -> Self {
        ProtocolError::Disconnected
    }
}

impl<T> From<crossbeam_channel::SendError<T>> for ProtocolError {
    fn from(_: crossbeam_channel::SendError<T>) -> Self {
        ProtocolError::Disconnected
    }
}
