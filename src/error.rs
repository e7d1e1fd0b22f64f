//! Error types for boardctl
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for boardctl operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, credential storage, request dispatch, and
/// API interactions.
#[derive(Error, Debug)]
pub enum BoardctlError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client-side input validation errors (bad email, weak password, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The backend rejected a request with a non-recoverable status code
    #[error("API error: HTTP {status}: {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Response body or a short description of the failure
        message: String,
    },

    /// The backend returned 403; the caller must re-authenticate
    #[error("Login required: {0}")]
    LoginRequired(String),

    /// The refresh exchange failed or no refresh credential was available;
    /// the stored credentials have been cleared
    #[error("Session expired, please sign in again")]
    SessionExpired,

    /// Credential store errors that are not plain keyring failures
    #[error("Credential store error: {0}")]
    CredentialStore(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for boardctl operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = BoardctlError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_validation_error_display() {
        let error = BoardctlError::Validation("invalid email".to_string());
        assert_eq!(error.to_string(), "Validation error: invalid email");
    }

    #[test]
    fn test_api_error_display() {
        let error = BoardctlError::Api {
            status: 500,
            message: "internal server error".to_string(),
        };
        assert!(error.to_string().contains("HTTP 500"));
        assert!(error.to_string().contains("internal server error"));
    }

    #[test]
    fn test_login_required_error_display() {
        let error = BoardctlError::LoginRequired("boards".to_string());
        assert_eq!(error.to_string(), "Login required: boards");
    }

    #[test]
    fn test_session_expired_error_display() {
        let error = BoardctlError::SessionExpired;
        assert_eq!(error.to_string(), "Session expired, please sign in again");
    }

    #[test]
    fn test_credential_store_error_display() {
        let error = BoardctlError::CredentialStore("partial pair".to_string());
        assert_eq!(error.to_string(), "Credential store error: partial pair");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: BoardctlError = io_error.into();
        assert!(matches!(error, BoardctlError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: BoardctlError = json_error.into();
        assert!(matches!(error, BoardctlError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: BoardctlError = yaml_error.into();
        assert!(matches!(error, BoardctlError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BoardctlError>();
    }
}
