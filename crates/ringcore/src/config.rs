//! Ring configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hasher::HashAlgorithm;

/// Fixed configuration of a [`HashRing`](crate::ring::HashRing).
///
/// All fields are set at construction and never change over the ring's
/// lifetime. The ring size should comfortably exceed `servers x vnodes x
/// replicas` to keep the position-collision rate low.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct RingConfig {
    /// Number of positions on the ring; positions are in `[0, ring_size)`.
    pub ring_size: u64,
    /// Virtual nodes per server per replica slot.
    pub vnodes: u32,
    /// Replica slots per key (1 = primary only).
    pub replicas: u32,
    /// Position hash algorithm.
    pub algorithm: HashAlgorithm,
}

impl RingConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.ring_size == 0 {
            return Err(Error::InvalidConfig("ring_size must be at least 1".into()));
        }
        if self.vnodes == 0 {
            return Err(Error::InvalidConfig("vnodes must be at least 1".into()));
        }
        if self.replicas == 0 {
            return Err(Error::InvalidConfig("replicas must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            ring_size: 256,
            vnodes: 3,
            replicas: 1,
            algorithm: HashAlgorithm::Md5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_fields_rejected() {
        for cfg in [
            RingConfig {
                ring_size: 0,
                ..Default::default()
            },
            RingConfig {
                vnodes: 0,
                ..Default::default()
            },
            RingConfig {
                replicas: 0,
                ..Default::default()
            },
        ] {
            assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
        }
    }
}
