//! XXH3 position hasher.

use xxhash_rust::xxh3::xxh3_64;

use crate::hasher::traits::PositionHasher;

/// XXH3 position hasher; takes the low 32 bits of the 64-bit hash.
#[derive(Clone, Copy, Debug)]
pub struct Xxh3Hasher;

impl PositionHasher for Xxh3Hasher {
    fn digest32(&self, input: &[u8]) -> u32 {
        xxh3_64(input) as u32
    }

    fn name(&self) -> &'static str {
        "xxh3"
    }
}
