//! Error types for chainmap

use std::fmt;

/// Result type alias for chainmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for map construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bucket table must hold at least one bucket
    ZeroBuckets,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroBuckets => write!(f, "Bucket count must be at least 1"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::ZeroBuckets.to_string(), "Bucket count must be at least 1");
    }
}
