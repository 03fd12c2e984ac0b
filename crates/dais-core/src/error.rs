//! Error types for Dais

use thiserror::Error;

/// Main error type for Dais operations
///
/// Page behaviors never fail once attached; these only surface while a page
/// is being configured.
#[derive(Error, Debug)]
pub enum DaisError {
    /// Countdown target is not a valid RFC 3339 timestamp
    #[error("Invalid countdown target '{value}': {source}")]
    InvalidTarget {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using DaisError
pub type DaisResult<T> = Result<T, DaisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DaisError::InvalidConfig("press delay must be positive".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid configuration: press delay must be positive"
        );
    }

    #[test]
    fn test_invalid_target_display() {
        let source = chrono::DateTime::parse_from_rfc3339("tomorrow").unwrap_err();
        let err = DaisError::InvalidTarget {
            value: "tomorrow".to_string(),
            source,
        };
        assert!(format!("{}", err).starts_with("Invalid countdown target 'tomorrow'"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DaisError = io_err.into();
        assert!(matches!(err, DaisError::Io(_)));
    }
}
