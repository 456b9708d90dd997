//! Ring position type.
//!
//! Positions live in the bounded interval `[0, ring_size)` and order totally;
//! the circular behavior comes from the successor-with-wraparound lookup, not
//! from the type itself.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position on the consistent hash ring.
///
/// Newtype over `u64` so positions are cheap to compare and hash. The value is
/// always less than the ring size of the ring that produced it.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub struct RingPosition(pub u64);

impl RingPosition {
    /// Clockwise distance from `self` to `other` on a ring of `ring_size`
    /// positions.
    ///
    /// Wraps past zero, so the distance from the largest occupied position to
    /// the smallest is the short way around the ring.
    pub fn distance_to(&self, other: RingPosition, ring_size: u64) -> u64 {
        if other.0 >= self.0 {
            other.0 - self.0
        } else {
            (ring_size - self.0) + other.0
        }
    }
}

impl fmt::Display for RingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_distance() {
        let a = RingPosition(10);
        let b = RingPosition(200);
        assert_eq!(a.distance_to(b, 256), 190);
    }

    #[test]
    fn test_wrapping_distance() {
        let a = RingPosition(200);
        let b = RingPosition(10);
        assert_eq!(a.distance_to(b, 256), 66);
    }

    #[test]
    fn test_zero_distance() {
        let a = RingPosition(42);
        assert_eq!(a.distance_to(a, 256), 0);
    }
}
