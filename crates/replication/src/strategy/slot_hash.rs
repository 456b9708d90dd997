//! Independent-slot replication strategy.
//!
//! Each replica slot r in `0..factor` is resolved by hashing (key, r) and
//! looking the position up on the ring. Slots are independent projections,
//! so two slots can legitimately resolve to the same physical server; this
//! strategy reports placements as they are and leaves collision handling to
//! [`ReplicaPlacement`](crate::placement::ReplicaPlacement).

use ringcore::{HashRing, ServerId};

use crate::strategy::ReplicationStrategy;

/// One independent hash projection per replica slot.
#[derive(Debug, Clone)]
pub struct SlotStrategy {
    factor: u32,
}

impl SlotStrategy {
    /// Create a strategy resolving `factor` replica slots per key.
    pub fn new(factor: u32) -> Self {
        Self { factor }
    }
}

impl ReplicationStrategy for SlotStrategy {
    fn replication_factor(&self) -> u32 {
        self.factor
    }

    fn replicas_for_key(&self, ring: &HashRing, key: &str) -> Vec<ServerId> {
        (0..self.factor)
            .filter_map(|slot| ring.lookup_replica(key, slot).cloned())
            .collect()
    }

    fn name(&self) -> &'static str {
        "SlotStrategy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringcore::{HashRing, RingConfig};

    fn fixture() -> HashRing {
        let mut ring = HashRing::new(RingConfig {
            ring_size: 1024,
            vnodes: 5,
            replicas: 3,
            ..Default::default()
        })
        .unwrap();
        for server in ["server1", "server2", "server3", "server4", "server5"] {
            ring.add_server(server);
        }
        ring
    }

    #[test]
    fn test_slot_placements() {
        let strategy = SlotStrategy::new(3);
        let replicas = strategy.replicas_for_key(&fixture(), "key101");

        assert_eq!(
            replicas,
            vec![
                ServerId::from("server1"),
                ServerId::from("server5"),
                ServerId::from("server2"),
            ]
        );
    }

    #[test]
    fn test_duplicates_are_reported_as_is() {
        // "key0" resolves slots 0 and 2 to the same server on this fixture.
        let strategy = SlotStrategy::new(3);
        let replicas = strategy.replicas_for_key(&fixture(), "key0");

        assert_eq!(replicas.len(), 3);
        assert_eq!(replicas[0], replicas[2]);
    }

    #[test]
    fn test_empty_ring_yields_no_placements() {
        let ring = HashRing::with_defaults();
        let strategy = SlotStrategy::new(3);
        assert!(strategy.replicas_for_key(&ring, "key101").is_empty());
    }
}
