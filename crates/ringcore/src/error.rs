//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Both variants are construction-time configuration failures. Lookups on a
/// running ring never produce an `Error`; an empty ring is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The configured hash algorithm name is not recognized.
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),
    /// Ring configuration rejected at construction.
    #[error("invalid ring configuration: {0}")]
    InvalidConfig(String),
}
