//! Connector state and error definitions.

use thiserror::Error;

use crate::config::{ConfigError, ValidationIssue};

/// Message carried by construction failures caused by absent service values.
pub const MISSING_URL_OR_KEY: &str = "Missing URL or key";

/// Whether a connector currently holds a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorState {
    /// No handle cached; the next request starts a construction sequence.
    Uninitialized,
    /// A handle is cached and returned to every caller.
    Ready,
}

/// Errors that can occur while obtaining or using a backend handle.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Configuration rejected under strict policy.
    #[error("Configuration invalid: {}", join_issues(.0))]
    ConfigurationInvalid(Vec<ValidationIssue>),

    /// A single construction attempt failed.
    #[error("Construction failed: {0}")]
    ConstructionFailed(String),

    /// Every construction attempt failed.
    #[error(
        "Failed to initialize backend client after {attempts} attempts; \
         check the service URL and anon key configuration: {source}"
    )]
    InitializationExhausted {
        attempts: u32,
        #[source]
        source: Box<ConnectorError>,
    },

    /// Process-wide connector was already set up.
    #[error("Global connector already installed")]
    AlreadyInstalled,

    /// Configuration file could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Request issued through a handle failed.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Result type for connector operations.
pub type ConnectorResult<T> = Result<T, ConnectorError>;

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConnectorError::ConstructionFailed(MISSING_URL_OR_KEY.to_string());
        assert_eq!(err.to_string(), "Construction failed: Missing URL or key");

        let err = ConnectorError::InitializationExhausted {
            attempts: 3,
            source: Box::new(err),
        };
        let msg = err.to_string();
        assert!(msg.contains("after 3 attempts"));
        assert!(msg.contains("configuration"));
        assert!(msg.contains(MISSING_URL_OR_KEY));
    }

    #[test]
    fn test_exhausted_exposes_source() {
        use std::error::Error;

        let err = ConnectorError::InitializationExhausted {
            attempts: 3,
            source: Box::new(ConnectorError::ConstructionFailed("boom".into())),
        };
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("Construction failed: boom"));
    }

    #[test]
    fn test_configuration_invalid_lists_issues() {
        let err = ConnectorError::ConfigurationInvalid(vec![
            ValidationIssue::MissingUrl,
            ValidationIssue::MissingAnonKey,
        ]);
        assert_eq!(
            err.to_string(),
            "Configuration invalid: service url is empty, anon key is empty"
        );
    }
}
