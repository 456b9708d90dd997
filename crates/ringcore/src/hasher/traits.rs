//! Core position hasher trait definition.

use std::fmt::Debug;

/// A position hasher converts identity bytes into a 32-bit word.
///
/// The ring reduces the word modulo its configured size to obtain the final
/// position, so implementations only need uniform 32-bit output. Hashers are
/// stateless and thread-safe, allowing concurrent position generation
/// without synchronization.
pub trait PositionHasher: Send + Sync + Debug + 'static {
    /// Hash `input` to a 32-bit word.
    fn digest32(&self, input: &[u8]) -> u32;

    /// Returns the name of this hasher.
    fn name(&self) -> &'static str;
}
