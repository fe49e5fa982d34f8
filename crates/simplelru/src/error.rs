//! Error types for simplelru

use std::fmt;

/// Result type alias for cache configuration
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by cache construction and resizing
///
/// A lookup that finds nothing is not an error; it comes back as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Capacity must be a positive integer
    InvalidCapacity(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(n) => {
                write!(f, "Invalid argument: capacity must be at least 1 (got {})", n)
            }
        }
    }
}

impl std::error::Error for Error {}
