//! SipHash-1-3 position hasher.

use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use crate::hasher::traits::PositionHasher;

/// SipHash-1-3 position hasher; takes the low 32 bits of the 64-bit hash.
#[derive(Clone, Copy, Debug)]
pub struct Sip13Hasher;

impl PositionHasher for Sip13Hasher {
    fn digest32(&self, input: &[u8]) -> u32 {
        let mut hasher = SipHasher13::new();
        hasher.write(input);
        hasher.finish() as u32
    }

    fn name(&self) -> &'static str {
        "sip13"
    }
}
