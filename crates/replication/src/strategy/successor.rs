//! Distinct-successor replication strategy.
//!
//! Walks clockwise from the key's primary position collecting distinct
//! physical servers. Unlike the independent-slot projection this guarantees
//! distinct servers (capped at the number registered), at the cost of not
//! matching the ring's native per-slot placement.

use ringcore::{HashRing, ServerId};

use crate::strategy::ReplicationStrategy;

/// Clockwise walk over distinct servers, primary first.
#[derive(Debug, Clone)]
pub struct DistinctSuccessorStrategy {
    factor: u32,
}

impl DistinctSuccessorStrategy {
    /// Create a strategy collecting up to `factor` distinct servers.
    pub fn new(factor: u32) -> Self {
        Self { factor }
    }
}

impl ReplicationStrategy for DistinctSuccessorStrategy {
    fn replication_factor(&self) -> u32 {
        self.factor
    }

    fn replicas_for_key(&self, ring: &HashRing, key: &str) -> Vec<ServerId> {
        if self.factor == 0 || ring.is_empty() {
            return Vec::new();
        }

        let entries: Vec<(ringcore::RingPosition, &ServerId)> = ring.entries().collect();
        let target = ring.key_position(key, 0);
        // First occupied position at or after the key, else wrap to index 0.
        let start = entries
            .iter()
            .position(|(pos, _)| *pos >= target)
            .unwrap_or(0);

        let wanted = (self.factor as usize).min(ring.server_count());
        let mut replicas: Vec<ServerId> = Vec::with_capacity(wanted);

        for offset in 0..entries.len() {
            let (_, server) = entries[(start + offset) % entries.len()];
            if !replicas.contains(server) {
                replicas.push(server.clone());
                if replicas.len() == wanted {
                    break;
                }
            }
        }

        replicas
    }

    fn name(&self) -> &'static str {
        "DistinctSuccessorStrategy"
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
    fn test_distinct_walk_order() {
        let strategy = DistinctSuccessorStrategy::new(3);
        let replicas = strategy.replicas_for_key(&fixture(), "key101");

        assert_eq!(
            replicas,
            vec![
                ServerId::from("server1"),
                ServerId::from("server3"),
                ServerId::from("server5"),
            ]
        );
    }

    #[test]
    fn test_primary_agrees_with_ring_lookup() {
        let ring = fixture();
        let strategy = DistinctSuccessorStrategy::new(3);

        for key in ["key0", "key101", "another-key"] {
            let replicas = strategy.replicas_for_key(&ring, key);
            assert_eq!(Some(&replicas[0]), ring.lookup(key));
        }
    }

    #[test]
    fn test_always_distinct() {
        let ring = fixture();
        let strategy = DistinctSuccessorStrategy::new(4);

        for n in 0..50 {
            let replicas = strategy.replicas_for_key(&ring, &format!("key{n}"));
            let mut unique = replicas.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), replicas.len());
            assert_eq!(replicas.len(), 4);
        }
    }

    #[test]
    fn test_factor_exceeding_server_count_is_capped() {
        let strategy = DistinctSuccessorStrategy::new(9);
        let replicas = strategy.replicas_for_key(&fixture(), "key101");
        assert_eq!(replicas.len(), 5);
    }

    #[test]
    fn test_empty_ring_yields_no_placements() {
        let ring = HashRing::with_defaults();
        let strategy = DistinctSuccessorStrategy::new(3);
        assert!(strategy.replicas_for_key(&ring, "key101").is_empty());
    }
}
