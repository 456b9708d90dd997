//! Consistent hash ring implementation.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::config::RingConfig;
use crate::error::Result;
use crate::hasher::{HashAlgorithm, PositionHasher};
use crate::position::RingPosition;
use crate::server::ServerId;

/// A ring entry: the occupying server plus the bucket of keys stored at this
/// position.
#[derive(Debug, Clone)]
struct Vnode {
    server: ServerId,
    bucket: Vec<String>,
}

/// Consistent hashing ring mapping keys to servers.
///
/// Each server is represented by `vnodes x replicas` positions on a bounded
/// ring of `ring_size` slots. Key lookup finds the nearest occupied position
/// at or after the key's hash, wrapping to the smallest occupied position
/// past the end. Replica slots are independent hash projections of the same
/// key, not a clockwise walk from the primary, so two slots can resolve to
/// the same physical server.
///
/// The ring is an owned value; callers embedding it in a concurrent service
/// should wrap it in [`SharedRing`](crate::shared::SharedRing) or an
/// equivalent single reader/writer guard.
#[derive(Debug, Clone)]
pub struct HashRing {
    /// Occupied positions in ring order.
    entries: BTreeMap<RingPosition, Vnode>,
    /// Currently registered servers.
    servers: HashSet<ServerId>,
    config: RingConfig,
    hasher: Arc<dyn PositionHasher>,
}

impl HashRing {
    /// Create an empty ring with the given configuration.
    pub fn new(config: RingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: BTreeMap::new(),
            servers: HashSet::new(),
            hasher: config.algorithm.hasher(),
            config,
        })
    }

    /// Create an empty ring with the default configuration (ring size 256,
    /// 3 vnodes, 1 replica slot, md5).
    pub fn with_defaults() -> Self {
        Self::new(RingConfig::default()).expect("default configuration is valid")
    }

    /// The fixed configuration this ring was built with.
    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// Name of the position hash algorithm in use.
    pub fn hasher_name(&self) -> &'static str {
        self.hasher.name()
    }

    /// Register a server: inserts one position per (vnode, replica slot)
    /// pair, each with a fresh empty bucket.
    ///
    /// A position collision with another server's vnode overwrites the
    /// earlier entry; this is accepted skew, logged at debug. Re-adding a
    /// server that is already present recomputes the same positions and
    /// resets the buckets stored there.
    pub fn add_server(&mut self, server: impl Into<ServerId>) {
        let server = server.into();
        for vnode in 0..self.config.vnodes {
            for slot in 0..self.config.replicas {
                let pos = self.vnode_position(&server, vnode, slot);
                let entry = Vnode {
                    server: server.clone(),
                    bucket: Vec::new(),
                };
                if let Some(prev) = self.entries.insert(pos, entry) {
                    if prev.server != server {
                        debug!(%pos, old = %prev.server, new = %server, "vnode position collision, overwriting");
                    }
                }
            }
        }
        debug!(%server, vnodes = self.config.vnodes, replicas = self.config.replicas, "added server to ring");
        self.servers.insert(server);
    }

    /// Deregister a server and delete its positions.
    ///
    /// Deletion is owner-checked: a position this server once claimed but
    /// that was later overwritten by another server's colliding vnode stays
    /// with its current occupant. Buckets at deleted positions are discarded;
    /// re-homing that data beforehand is the caller's responsibility.
    ///
    /// Returns `false` if the server was not registered.
    pub fn remove_server(&mut self, server: &ServerId) -> bool {
        if !self.servers.remove(server) {
            return false;
        }
        for vnode in 0..self.config.vnodes {
            for slot in 0..self.config.replicas {
                let pos = self.vnode_position(server, vnode, slot);
                if self.entries.get(&pos).is_some_and(|v| v.server == *server) {
                    self.entries.remove(&pos);
                }
            }
        }
        debug!(%server, "removed server from ring");
        true
    }

    /// Server responsible for `key` (replica slot 0), or `None` on an empty
    /// ring.
    pub fn lookup(&self, key: &str) -> Option<&ServerId> {
        self.lookup_replica(key, 0)
    }

    /// Server responsible for `key` under the given replica slot, or `None`
    /// on an empty ring.
    ///
    /// `slot` is not bounds-checked against the configured replica count;
    /// any slot id yields a valid independent projection.
    pub fn lookup_replica(&self, key: &str, slot: u32) -> Option<&ServerId> {
        let pos = self.resolve(self.key_position(key, slot))?;
        self.entries.get(&pos).map(|v| &v.server)
    }

    /// Append `key` to the bucket at its resolved position for `slot`.
    ///
    /// No dedup: storing the same key twice appends it twice. Returns `false`
    /// only when the ring is empty.
    pub fn add_data(&mut self, key: &str, slot: u32) -> bool {
        let Some(pos) = self.resolve(self.key_position(key, slot)) else {
            return false;
        };
        if let Some(vnode) = self.entries.get_mut(&pos) {
            vnode.bucket.push(key.to_owned());
            true
        } else {
            false
        }
    }

    /// Whether `key` is present in the bucket at its resolved position for
    /// `slot`.
    pub fn contains_data(&self, key: &str, slot: u32) -> bool {
        self.data(key, slot)
            .is_some_and(|bucket| bucket.iter().any(|stored| stored == key))
    }

    /// The whole bucket at the position `key` resolves to for `slot`, or
    /// `None` on an empty ring.
    pub fn data(&self, key: &str, slot: u32) -> Option<&[String]> {
        let pos = self.resolve(self.key_position(key, slot))?;
        self.entries.get(&pos).map(|v| v.bucket.as_slice())
    }

    /// Ring position a key hashes to for the given replica slot.
    pub fn key_position(&self, key: &str, slot: u32) -> RingPosition {
        self.position(&query_key(key, slot))
    }

    /// Number of registered servers.
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    /// Number of occupied positions.
    pub fn vnode_count(&self) -> usize {
        self.entries.len()
    }

    /// True if no positions are occupied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered servers, in no particular order.
    pub fn servers(&self) -> impl Iterator<Item = &ServerId> {
        self.servers.iter()
    }

    /// Occupied positions and their occupants, in ring order.
    pub fn entries(&self) -> impl Iterator<Item = (RingPosition, &ServerId)> {
        self.entries.iter().map(|(pos, vnode)| (*pos, &vnode.server))
    }

    /// Successor-with-wraparound: smallest occupied position at or after
    /// `pos`, else the smallest occupied position overall.
    fn resolve(&self, pos: RingPosition) -> Option<RingPosition> {
        self.entries
            .range(pos..)
            .next()
            .or_else(|| self.entries.iter().next())
            .map(|(occupied, _)| *occupied)
    }

    fn vnode_position(&self, server: &ServerId, vnode: u32, slot: u32) -> RingPosition {
        self.position(&vnode_key(server, vnode, slot))
    }

    fn position(&self, input: &str) -> RingPosition {
        RingPosition(u64::from(self.hasher.digest32(input.as_bytes())) % self.config.ring_size)
    }
}

/// Fluent builder for a [`HashRing`] with optional pre-registered servers.
#[derive(Debug, Clone)]
pub struct RingBuilder {
    config: RingConfig,
    servers: Vec<ServerId>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self {
            config: RingConfig::default(),
            servers: Vec::new(),
        }
    }

    /// Number of positions on the ring.
    pub fn ring_size(mut self, ring_size: u64) -> Self {
        self.config.ring_size = ring_size;
        self
    }

    /// Virtual nodes per server per replica slot.
    pub fn vnodes(mut self, vnodes: u32) -> Self {
        self.config.vnodes = vnodes;
        self
    }

    /// Replica slots per key.
    pub fn replicas(mut self, replicas: u32) -> Self {
        self.config.replicas = replicas;
        self
    }

    /// Position hash algorithm.
    pub fn algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    /// Queue a server to be added when the ring is built.
    pub fn add_server(mut self, server: impl Into<ServerId>) -> Self {
        self.servers.push(server.into());
        self
    }

    /// Build the ring, validating the configuration.
    pub fn build(self) -> Result<HashRing> {
        let mut ring = HashRing::new(self.config)?;
        for server in self.servers {
            ring.add_server(server);
        }
        Ok(ring)
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Placement input for one of a server's vnode positions.
fn vnode_key(server: &ServerId, vnode: u32, slot: u32) -> String {
    format!("{server}:{vnode}:{slot}")
}

/// Query input for a key under a replica slot.
fn query_key(key: &str, slot: u32) -> String {
    format!("{key}:{slot}")
}
