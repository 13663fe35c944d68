//! Error types for the taxon engine.

use thiserror::Error;

/// Result type alias using taxon's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for taxon operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configured pattern could not be activated.
    #[error("Invalid pattern '{pattern}' in taxonomy '{taxonomy}': {reason}")]
    InvalidPattern {
        taxonomy: String,
        pattern: String,
        reason: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("test resource".to_string());
        assert_eq!(err.to_string(), "Not found: test resource");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing taxonomy name".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing taxonomy name");
    }

    #[test]
    fn test_error_display_invalid_pattern() {
        let err = Error::InvalidPattern {
            taxonomy: "tags".to_string(),
            pattern: "hashtag".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid pattern 'hashtag' in taxonomy 'tags': unclosed group"
        );
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("empty location".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty location");
    }

    #[test]
    fn test_error_display_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::Io(io_err);
        assert!(err.to_string().contains("I/O error:"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => {
                assert!(!msg.is_empty());
            }
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<Vec<i32>>("{ not: [a list");
        assert!(yaml_err.is_err());

        let err: Error = yaml_err.unwrap_err().into();
        assert!(err.to_string().contains("Serialization error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }
}
