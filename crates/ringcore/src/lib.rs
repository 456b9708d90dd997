//! Core library for the consistent hash ring.
//!
//! This crate provides the ring data structure and its algorithms:
//! - Position hashing with pluggable algorithms
//! - Virtual-node placement for servers
//! - Primary and per-replica-slot lookup
//! - Membership mutation (add/remove server)
//! - In-memory data buckets attached to ring positions
//! - A lock-guarded shared handle for concurrent embedding

pub mod config;
pub mod error;
pub mod hasher;
pub mod position;
pub mod ring;
pub mod server;
pub mod shared;

pub use config::RingConfig;
pub use error::{Error, Result};
pub use hasher::{HashAlgorithm, PositionHasher};
pub use position::RingPosition;
pub use ring::{HashRing, RingBuilder};
pub use server::ServerId;
pub use shared::SharedRing;
