//! Error handling module for the dqlc CLI.
//!
//! This module provides a custom error type using `thiserror` for structured
//! error handling throughout the application.

use thiserror::Error;

/// Main error type for the dqlc CLI application.
#[derive(Error, Debug)]
pub enum DqlcCliError {
    /// Error when a required configuration is missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when reading the input record file fails.
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// Error raised by the filter clause compiler or its argument
    /// validation.
    #[error("Filter error: {0}")]
    Filter(#[from] dqlc::FilterError),

    /// Error raised by the sort clause compiler or its argument
    /// validation.
    #[error("Sort error: {0}")]
    Sort(#[from] dqlc::SortingError),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization/deserialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using `DqlcCliError`.
pub type Result<T> = std::result::Result<T, DqlcCliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = DqlcCliError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: DqlcCliError = io_err.into();
        assert!(matches!(cli_err, DqlcCliError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let cli_err: DqlcCliError = json_err.into();
        assert!(matches!(cli_err, DqlcCliError::Json(_)));
    }
}
