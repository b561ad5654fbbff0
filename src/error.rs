//! Unified error handling for the migration-paths library.
//!
//! The geometry functions in this crate never fail; they signal "no data"
//! with sentinel values (`None`, `0`, empty vectors). Errors are reserved for
//! the processing boundary, where malformed input must not leak into time
//! arithmetic.

use std::fmt;

/// Unified error type for path-processing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// A sample timestamp could not be parsed as RFC 3339
    MalformedTimestamp {
        sample_id: String,
        timestamp: String,
    },
    /// A time window with out-of-range or inverted percentage bounds
    InvalidWindow { start: f64, end: f64 },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::MalformedTimestamp {
                sample_id,
                timestamp,
            } => {
                write!(
                    f,
                    "Sample '{}' has unparseable timestamp '{}'",
                    sample_id, timestamp
                )
            }
            PathError::InvalidWindow { start, end } => {
                write!(
                    f,
                    "Time window [{}, {}] is not a valid percentage range",
                    start, end
                )
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Result type alias for path-processing operations.
pub type Result<T> = std::result::Result<T, PathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PathError::MalformedTimestamp {
            sample_id: "s1".to_string(),
            timestamp: "yesterday".to_string(),
        };
        assert!(err.to_string().contains("s1"));
        assert!(err.to_string().contains("yesterday"));

        let err = PathError::InvalidWindow {
            start: 75.0,
            end: 25.0,
        };
        assert!(err.to_string().contains("75"));
        assert!(err.to_string().contains("25"));
    }
}
