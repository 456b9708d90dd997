//! Shared ring handle for concurrent embedding.
//!
//! The core ring is a plain owned value. When several threads need it, the
//! whole structure (position map plus buckets) goes behind one reader/writer
//! lock: lookups run concurrently, any mutation excludes everything else.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::ring::HashRing;
use crate::server::ServerId;

/// Cheap-to-clone handle to a lock-guarded [`HashRing`].
///
/// Convenience methods clone results out so no guard escapes; use
/// [`read`](Self::read)/[`write`](Self::write) for batched access.
#[derive(Debug, Clone)]
pub struct SharedRing {
    inner: Arc<RwLock<HashRing>>,
}

impl SharedRing {
    /// Wrap an owned ring.
    pub fn new(ring: HashRing) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ring)),
        }
    }

    /// Acquire the read lock.
    pub fn read(&self) -> RwLockReadGuard<'_, HashRing> {
        self.inner.read()
    }

    /// Acquire the write lock.
    pub fn write(&self) -> RwLockWriteGuard<'_, HashRing> {
        self.inner.write()
    }

    /// See [`HashRing::lookup`].
    pub fn lookup(&self, key: &str) -> Option<ServerId> {
        self.inner.read().lookup(key).cloned()
    }

    /// See [`HashRing::lookup_replica`].
    pub fn lookup_replica(&self, key: &str, slot: u32) -> Option<ServerId> {
        self.inner.read().lookup_replica(key, slot).cloned()
    }

    /// See [`HashRing::add_server`].
    pub fn add_server(&self, server: impl Into<ServerId>) {
        self.inner.write().add_server(server);
    }

    /// See [`HashRing::remove_server`].
    pub fn remove_server(&self, server: &ServerId) -> bool {
        self.inner.write().remove_server(server)
    }

    /// See [`HashRing::add_data`].
    pub fn add_data(&self, key: &str, slot: u32) -> bool {
        self.inner.write().add_data(key, slot)
    }

    /// See [`HashRing::contains_data`].
    pub fn contains_data(&self, key: &str, slot: u32) -> bool {
        self.inner.read().contains_data(key, slot)
    }

    /// See [`HashRing::data`]; the bucket is cloned out.
    pub fn data(&self, key: &str, slot: u32) -> Option<Vec<String>> {
        self.inner.read().data(key, slot).map(<[String]>::to_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let shared = SharedRing::new(HashRing::with_defaults());
        let other = shared.clone();

        shared.add_server("server1");
        assert_eq!(other.read().server_count(), 1);
        assert!(other.lookup("some-key").is_some());
    }

    #[test]
    fn test_concurrent_readers() {
        let shared = SharedRing::new(HashRing::with_defaults());
        shared.add_server("server1");

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ring = shared.clone();
                std::thread::spawn(move || ring.lookup(&format!("key{i}")).is_some())
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
