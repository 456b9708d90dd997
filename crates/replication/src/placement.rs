//! Per-key replica placement report.
//!
//! Inspects where each replica slot of a key lands and surfaces slot pairs
//! that share a physical server. Whether such collisions are acceptable is a
//! caller decision; the ring itself never deduplicates.

use ringcore::{HashRing, ServerId};

use crate::error::ReplicationError;

/// Resolved placement of one key across its replica slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaPlacement {
    assignments: Vec<(u32, ServerId)>,
}

impl ReplicaPlacement {
    /// Resolve slots `0..factor` of `key` against the ring.
    ///
    /// On an empty ring the report has no assignments.
    pub fn inspect(ring: &HashRing, key: &str, factor: u32) -> Self {
        let assignments = (0..factor)
            .filter_map(|slot| {
                ring.lookup_replica(key, slot)
                    .map(|server| (slot, server.clone()))
            })
            .collect();
        Self { assignments }
    }

    /// Slot-to-server assignments in slot order.
    pub fn assignments(&self) -> &[(u32, ServerId)] {
        &self.assignments
    }

    /// Distinct servers holding at least one slot, in first-seen order.
    pub fn distinct_servers(&self) -> Vec<&ServerId> {
        let mut distinct: Vec<&ServerId> = Vec::new();
        for (_, server) in &self.assignments {
            if !distinct.contains(&server) {
                distinct.push(server);
            }
        }
        distinct
    }

    /// Slot pairs that resolved to the same server.
    pub fn collisions(&self) -> Vec<(u32, u32)> {
        let mut pairs = Vec::new();
        for (i, (slot_a, server_a)) in self.assignments.iter().enumerate() {
            for (slot_b, server_b) in &self.assignments[i + 1..] {
                if server_a == server_b {
                    pairs.push((*slot_a, *slot_b));
                }
            }
        }
        pairs
    }

    /// True when every slot landed on its own server.
    pub fn is_fully_distinct(&self) -> bool {
        self.collisions().is_empty()
    }

    /// Enforce distinct-server placement.
    ///
    /// Errors with the first colliding slot pair, or [`ReplicationError::EmptyRing`]
    /// when nothing was placed at all.
    pub fn require_distinct(&self) -> Result<(), ReplicationError> {
        if self.assignments.is_empty() {
            return Err(ReplicationError::EmptyRing);
        }
        match self.collisions().first() {
            None => Ok(()),
            Some((slot_a, slot_b)) => {
                let server = self
                    .assignments
                    .iter()
                    .find(|(slot, _)| slot == slot_a)
                    .map(|(_, server)| server.clone())
                    .expect("colliding slot is present in assignments");
                Err(ReplicationError::DuplicatePlacement {
                    slot_a: *slot_a,
                    slot_b: *slot_b,
                    server,
                })
            }
        }
    }
}
