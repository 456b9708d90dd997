//! Error types for the replication layer.

use ringcore::ServerId;
use thiserror::Error;

/// Errors reported by placement checks.
///
/// Only the opt-in distinct-guarantee check produces errors; the strategies
/// themselves mirror the ring's sentinel discipline and return empty results
/// on an empty ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// The ring has no servers to place replicas on.
    #[error("ring has no servers")]
    EmptyRing,
    /// Two replica slots resolved to the same physical server.
    #[error("replica slots {slot_a} and {slot_b} both resolve to server {server}")]
    DuplicatePlacement {
        slot_a: u32,
        slot_b: u32,
        server: ServerId,
    },
}
