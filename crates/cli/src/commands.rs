//! Ring subcommands and their printable results.

use std::collections::HashMap;
use std::fmt;

use clap::Subcommand;
use serde::Serialize;

use replication::{DistinctSuccessorStrategy, ReplicaPlacement, ReplicationStrategy};
use ringcore::{HashRing, RingConfig, RingPosition, ServerId};

/// Keys looked up by the demo walk-through.
const DEMO_KEYS: [&str; 5] = ["key1", "testkey1", "key100", "key5000", "key67890"];

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk through the classic four-server demo: add server1..server4,
    /// look up five keys, remove server3, look them up again.
    Demo,

    /// Map keys to their responsible servers.
    Lookup {
        /// Servers to place on the ring (comma separated).
        #[arg(long, value_delimiter = ',', required = true)]
        servers: Vec<String>,
        /// Keys to resolve.
        #[arg(required = true)]
        keys: Vec<String>,
        /// Replica slot to query.
        #[arg(long, default_value_t = 0)]
        slot: u32,
    },

    /// Sampled key distribution and exact ownership share per server.
    Distribution {
        /// Servers to place on the ring (comma separated).
        #[arg(long, value_delimiter = ',', required = true)]
        servers: Vec<String>,
        /// Number of sample keys.
        #[arg(long, default_value_t = 10_000)]
        samples: u32,
    },

    /// Replica placement report for one key.
    Placement {
        /// Servers to place on the ring (comma separated).
        #[arg(long, value_delimiter = ',', required = true)]
        servers: Vec<String>,
        /// Key to inspect.
        key: String,
        /// Number of replica slots to inspect.
        #[arg(long, default_value_t = 3)]
        factor: u32,
        /// Also show the distinct-successor walk.
        #[arg(long)]
        distinct: bool,
    },
}

impl Command {
    /// Execute against a ring built from `config`.
    pub fn execute(self, config: RingConfig) -> anyhow::Result<CommandResult> {
        match self {
            Command::Demo => run_demo(config),
            Command::Lookup { servers, keys, slot } => run_lookup(config, &servers, &keys, slot),
            Command::Distribution { servers, samples } => {
                run_distribution(config, &servers, samples)
            }
            Command::Placement {
                servers,
                key,
                factor,
                distinct,
            } => run_placement(config, &servers, key, factor, distinct),
        }
    }
}

/// Printable/serializable result of one command.
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Demo {
        removed: String,
        lookups: Vec<DemoLookup>,
    },
    Lookup {
        slot: u32,
        assignments: Vec<KeyAssignment>,
    },
    Distribution {
        samples: u32,
        servers: Vec<ServerShare>,
    },
    Placement {
        key: String,
        slots: Vec<SlotAssignment>,
        distinct_servers: Vec<String>,
        collisions: Vec<(u32, u32)>,
        successor_walk: Option<Vec<String>>,
    },
}

#[derive(Debug, Serialize)]
pub struct DemoLookup {
    pub stage: &'static str,
    pub key: String,
    pub server: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct KeyAssignment {
    pub key: String,
    pub server: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ServerShare {
    pub server: String,
    pub vnodes: usize,
    pub sampled_keys: u32,
    /// Fraction of ring positions whose lookups land on this server.
    pub ownership: f64,
}

#[derive(Debug, Serialize)]
pub struct SlotAssignment {
    pub slot: u32,
    pub server: String,
}

fn build_ring(config: RingConfig, servers: &[String]) -> anyhow::Result<HashRing> {
    let mut ring = HashRing::new(config)?;
    for server in servers {
        ring.add_server(server.as_str());
    }
    Ok(ring)
}

fn run_demo(config: RingConfig) -> anyhow::Result<CommandResult> {
    let mut ring = HashRing::new(config)?;
    for server in ["server1", "server2", "server3", "server4"] {
        ring.add_server(server);
    }

    let mut lookups = Vec::with_capacity(DEMO_KEYS.len() * 2);
    for key in DEMO_KEYS {
        lookups.push(DemoLookup {
            stage: "initial",
            key: key.to_owned(),
            server: ring.lookup(key).map(ToString::to_string),
        });
    }

    let removed = ServerId::from("server3");
    ring.remove_server(&removed);
    for key in DEMO_KEYS {
        lookups.push(DemoLookup {
            stage: "after-remove",
            key: key.to_owned(),
            server: ring.lookup(key).map(ToString::to_string),
        });
    }

    Ok(CommandResult::Demo {
        removed: removed.to_string(),
        lookups,
    })
}

fn run_lookup(
    config: RingConfig,
    servers: &[String],
    keys: &[String],
    slot: u32,
) -> anyhow::Result<CommandResult> {
    let ring = build_ring(config, servers)?;
    let assignments = keys
        .iter()
        .map(|key| KeyAssignment {
            key: key.clone(),
            server: ring.lookup_replica(key, slot).map(ToString::to_string),
        })
        .collect();
    Ok(CommandResult::Lookup { slot, assignments })
}

fn run_distribution(
    config: RingConfig,
    servers: &[String],
    samples: u32,
) -> anyhow::Result<CommandResult> {
    let ring = build_ring(config, servers)?;

    let mut sampled: HashMap<String, u32> = HashMap::new();
    for n in 0..samples {
        if let Some(owner) = ring.lookup(&format!("key{n}")) {
            *sampled.entry(owner.to_string()).or_default() += 1;
        }
    }

    // Exact ownership: each occupied position owns the arc back to its
    // predecessor, so the per-server arc sums cover the whole ring.
    let entries: Vec<(RingPosition, ServerId)> =
        ring.entries().map(|(pos, server)| (pos, server.clone())).collect();
    let ring_size = ring.config().ring_size;
    let mut owned: HashMap<String, u64> = HashMap::new();
    if entries.len() == 1 {
        owned.insert(entries[0].1.to_string(), ring_size);
    } else {
        for (i, (pos, server)) in entries.iter().enumerate() {
            let prev = if i == 0 {
                entries[entries.len() - 1].0
            } else {
                entries[i - 1].0
            };
            *owned.entry(server.to_string()).or_default() += prev.distance_to(*pos, ring_size);
        }
    }

    let mut rows: Vec<ServerShare> = servers
        .iter()
        .map(|server| ServerShare {
            server: server.clone(),
            vnodes: entries
                .iter()
                .filter(|(_, owner)| owner.as_str() == server)
                .count(),
            sampled_keys: sampled.get(server).copied().unwrap_or(0),
            ownership: owned.get(server).copied().unwrap_or(0) as f64 / ring_size as f64,
        })
        .collect();
    rows.sort_by(|a, b| a.server.cmp(&b.server));

    Ok(CommandResult::Distribution {
        samples,
        servers: rows,
    })
}

fn run_placement(
    config: RingConfig,
    servers: &[String],
    key: String,
    factor: u32,
    distinct: bool,
) -> anyhow::Result<CommandResult> {
    let ring = build_ring(config, servers)?;
    let placement = ReplicaPlacement::inspect(&ring, &key, factor);

    let slots = placement
        .assignments()
        .iter()
        .map(|(slot, server)| SlotAssignment {
            slot: *slot,
            server: server.to_string(),
        })
        .collect();
    let distinct_servers = placement
        .distinct_servers()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let successor_walk = distinct.then(|| {
        DistinctSuccessorStrategy::new(factor)
            .replicas_for_key(&ring, &key)
            .into_iter()
            .map(|server| server.to_string())
            .collect::<Vec<_>>()
    });

    Ok(CommandResult::Placement {
        key,
        slots,
        distinct_servers,
        collisions: placement.collisions(),
        successor_walk,
    })
}

fn server_or_sentinel(server: &Option<String>) -> &str {
    server.as_deref().unwrap_or("(no server)")
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Demo { removed, lookups } => {
                for lookup in lookups.iter().filter(|l| l.stage == "initial") {
                    writeln!(
                        f,
                        "{}: is present on server: {}",
                        lookup.key,
                        server_or_sentinel(&lookup.server)
                    )?;
                }
                writeln!(f, "After removing {removed}")?;
                for lookup in lookups.iter().filter(|l| l.stage == "after-remove") {
                    writeln!(
                        f,
                        "{}: is present on server: {}",
                        lookup.key,
                        server_or_sentinel(&lookup.server)
                    )?;
                }
                Ok(())
            }
            CommandResult::Lookup { slot, assignments } => {
                for assignment in assignments {
                    writeln!(
                        f,
                        "{} -> {} (slot {slot})",
                        assignment.key,
                        server_or_sentinel(&assignment.server)
                    )?;
                }
                Ok(())
            }
            CommandResult::Distribution { samples, servers } => {
                writeln!(f, "sampled {samples} keys:")?;
                for row in servers {
                    writeln!(
                        f,
                        "{}: vnodes={} keys={} ({:.1}%) ownership={:.1}%",
                        row.server,
                        row.vnodes,
                        row.sampled_keys,
                        100.0 * f64::from(row.sampled_keys) / f64::from(*samples),
                        100.0 * row.ownership,
                    )?;
                }
                Ok(())
            }
            CommandResult::Placement {
                key,
                slots,
                distinct_servers,
                collisions,
                successor_walk,
            } => {
                for slot in slots {
                    writeln!(f, "{key} slot {}: {}", slot.slot, slot.server)?;
                }
                writeln!(f, "distinct servers: {}/{}", distinct_servers.len(), slots.len())?;
                for (slot_a, slot_b) in collisions {
                    writeln!(f, "collision: slots {slot_a} and {slot_b} share a server")?;
                }
                if let Some(walk) = successor_walk {
                    writeln!(f, "successor walk: {}", walk.join(" -> "))?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> RingConfig {
        RingConfig::default()
    }

    #[test]
    fn test_demo_matches_walkthrough() {
        let result = Command::Demo.execute(default_config()).unwrap();
        let CommandResult::Demo { removed, lookups } = result else {
            panic!("expected demo result");
        };

        assert_eq!(removed, "server3");
        assert_eq!(lookups.len(), 10);

        let initial: Vec<&str> = lookups
            .iter()
            .filter(|l| l.stage == "initial")
            .map(|l| l.server.as_deref().unwrap())
            .collect();
        assert_eq!(
            initial,
            vec!["server3", "server1", "server2", "server2", "server3"]
        );

        let after: Vec<&str> = lookups
            .iter()
            .filter(|l| l.stage == "after-remove")
            .map(|l| l.server.as_deref().unwrap())
            .collect();
        assert_eq!(
            after,
            vec!["server1", "server1", "server2", "server2", "server1"]
        );
    }

    #[test]
    fn test_distribution_ownership_sums_to_one() {
        let result = Command::Distribution {
            servers: vec!["server1".into(), "server2".into(), "server3".into()],
            samples: 1000,
        }
        .execute(default_config())
        .unwrap();

        let CommandResult::Distribution { servers, .. } = result else {
            panic!("expected distribution result");
        };
        let total: f64 = servers.iter().map(|row| row.ownership).sum();
        assert!((total - 1.0).abs() < 1e-9);
        let keys: u32 = servers.iter().map(|row| row.sampled_keys).sum();
        assert_eq!(keys, 1000);
    }

    #[test]
    fn test_lookup_empty_server_list_is_rejected_by_clap() {
        // `--servers` is required; an empty ring is unreachable from the CLI.
        use clap::Parser;
        let err = crate::CliConfig::try_parse_from(["ringctl", "lookup", "key1"]);
        assert!(err.is_err());
    }

    #[test]
    fn test_placement_reports_collisions() {
        let result = Command::Placement {
            servers: (1..=5).map(|n| format!("server{n}")).collect(),
            key: "key0".into(),
            factor: 3,
            distinct: true,
        }
        .execute(RingConfig {
            ring_size: 1024,
            vnodes: 5,
            replicas: 3,
            ..Default::default()
        })
        .unwrap();

        let CommandResult::Placement {
            slots,
            collisions,
            successor_walk,
            ..
        } = result
        else {
            panic!("expected placement result");
        };
        assert_eq!(slots.len(), 3);
        assert_eq!(collisions, vec![(0, 2)]);
        let walk = successor_walk.unwrap();
        assert_eq!(walk.len(), 3);
    }
}
