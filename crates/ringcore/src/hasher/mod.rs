//! Position hashing for the ring.
//!
//! Hashers convert identity strings into 32-bit words that the ring reduces
//! modulo its size. The algorithm is selected at construction; an unknown
//! name is a fatal configuration error.

pub mod md5;
pub mod sip13;
pub mod traits;
pub mod xxh3;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub use md5::Md5Hasher;
pub use sip13::Sip13Hasher;
pub use traits::PositionHasher;
pub use xxh3::Xxh3Hasher;

/// Selects the position hash algorithm for a ring.
///
/// `Md5` is the default and matches the classic ketama-style derivation
/// (first four digest bytes, little-endian). The others are fast
/// non-cryptographic alternatives with equally uniform output.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Xxh3,
    Sip13,
}

impl HashAlgorithm {
    /// Instantiate the hasher for this algorithm.
    pub fn hasher(self) -> Arc<dyn PositionHasher> {
        match self {
            HashAlgorithm::Md5 => Arc::new(Md5Hasher),
            HashAlgorithm::Xxh3 => Arc::new(Xxh3Hasher),
            HashAlgorithm::Sip13 => Arc::new(Sip13Hasher),
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Xxh3 => "xxh3",
            HashAlgorithm::Sip13 => "sip13",
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md5" => Ok(HashAlgorithm::Md5),
            "xxh3" => Ok(HashAlgorithm::Xxh3),
            "sip13" => Ok(HashAlgorithm::Sip13),
            other => Err(Error::UnknownAlgorithm(other.to_owned())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_algorithms() {
        assert_eq!("md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert_eq!("xxh3".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Xxh3);
        assert_eq!(
            "sip13".parse::<HashAlgorithm>().unwrap(),
            HashAlgorithm::Sip13
        );
    }

    #[test]
    fn test_parse_unknown_algorithm_fails() {
        let err = "sha256".parse::<HashAlgorithm>().unwrap_err();
        assert_eq!(err, Error::UnknownAlgorithm("sha256".to_owned()));
    }

    #[test]
    fn test_display_round_trips() {
        for algo in [HashAlgorithm::Md5, HashAlgorithm::Xxh3, HashAlgorithm::Sip13] {
            assert_eq!(algo.to_string().parse::<HashAlgorithm>().unwrap(), algo);
        }
    }
}
