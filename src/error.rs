//! Error types for the client directory.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! The mapper and the search engine never fail on irregular data; these errors belong
//! to the storage collaborators, the service layer, and configuration loading.

use thiserror::Error;

/// Errors that can occur when loading companies or their clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// Reading an export failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Company or export not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Loading a company's clients took too long
    #[error("Timed out loading clients for {0}")]
    Timeout(String),

    /// Invalid request from the caller
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic directory error with context
    #[error("Directory error: {0}")]
    Other(String),
}

impl From<std::io::Error> for DirectoryError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => DirectoryError::NotFound(err.to_string()),
            _ => DirectoryError::Io(err.to_string()),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Convenience type alias for Results with DirectoryError
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DirectoryError::NotFound("acme".to_string());
        assert_eq!(err.to_string(), "Not found: acme");

        let err = DirectoryError::Timeout("acme".to_string());
        assert_eq!(err.to_string(), "Timed out loading clients for acme");

        let err = ConfigError::MissingVar("CLIENTS_CSV_DIR".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: CLIENTS_CSV_DIR"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            DirectoryError::from(missing),
            DirectoryError::NotFound(_)
        ));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(DirectoryError::from(denied), DirectoryError::Io(_)));
    }
}
