//! Error types for time-left estimation.

use thiserror::Error;

/// Result type for time-left operations.
pub type TimeLeftResult<T> = Result<T, TimeLeftError>;

/// Errors that can occur while building a time-left calculator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeLeftError {
    #[error("Invalid argument `{name}`: {message}")]
    InvalidArgument { name: &'static str, message: String },
}

impl TimeLeftError {
    /// Create an invalid argument error.
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = TimeLeftError::invalid_argument("frame_count", "must be >= 0, got -1");
        assert_eq!(
            err.to_string(),
            "Invalid argument `frame_count`: must be >= 0, got -1"
        );
    }
}
