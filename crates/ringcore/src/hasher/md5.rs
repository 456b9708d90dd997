//! MD5 position hasher.
//!
//! The classic derivation used by ketama-style rings: hash the input with
//! MD5 and assemble the first four digest bytes little-endian (byte 0 is the
//! least significant). Only 4 of the 16 digest bytes are used, which keeps
//! positions in a small traceable space; cryptographic strength is not a goal
//! here, only distribution.

use md5::{Digest, Md5};

use crate::hasher::traits::PositionHasher;

/// MD5 position hasher (default).
#[derive(Clone, Copy, Debug)]
pub struct Md5Hasher;

impl PositionHasher for Md5Hasher {
    fn digest32(&self, input: &[u8]) -> u32 {
        let digest = Md5::digest(input);
        u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
    }

    fn name(&self) -> &'static str {
        "md5"
    }
}
