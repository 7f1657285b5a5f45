//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the service URL and anon key look usable
//! - Validate value ranges (attempts >= 1, storage key present)
//!
//! # Design Decisions
//! - Returns all validation issues, not just first
//! - Validation is a pure function: &ConnectorConfig → ConfigValidation
//! - The caller picks the policy: log and continue, or reject

use std::fmt;

use crate::config::schema::ConnectorConfig;
use crate::connector::types::ConnectorError;

/// Minimum accepted anon key length.
pub const MIN_ANON_KEY_LEN: usize = 16;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingUrl,
    InvalidUrl(String),
    UnsupportedScheme(String),
    MissingAnonKey,
    AnonKeyTooShort { len: usize },
    AnonKeyWhitespace,
    ZeroAttempts,
    EmptyStorageKey,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUrl => write!(f, "service url is empty"),
            Self::InvalidUrl(e) => write!(f, "service url is not a valid URL: {}", e),
            Self::UnsupportedScheme(s) => {
                write!(f, "service url scheme '{}' is not http or https", s)
            }
            Self::MissingAnonKey => write!(f, "anon key is empty"),
            Self::AnonKeyTooShort { len } => write!(
                f,
                "anon key is {} characters, expected at least {}",
                len, MIN_ANON_KEY_LEN
            ),
            Self::AnonKeyWhitespace => write!(f, "anon key contains whitespace"),
            Self::ZeroAttempts => write!(f, "retries.max_attempts must be at least 1"),
            Self::EmptyStorageKey => write!(f, "auth.storage_key is empty"),
        }
    }
}

/// Outcome of validating a configuration record.
#[derive(Debug, Clone)]
pub struct ConfigValidation {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ConfigValidation {
    /// Emit one warning per issue.
    pub fn log_warnings(&self) {
        for issue in &self.issues {
            tracing::warn!(issue = %issue, "Connector configuration is invalid, continuing with supplied values");
        }
    }

    /// Strict policy: reject the configuration when any issue was found.
    pub fn into_result(self) -> Result<(), ConnectorError> {
        if self.valid {
            Ok(())
        } else {
            Err(ConnectorError::ConfigurationInvalid(self.issues))
        }
    }
}

/// Validate a configuration record.
pub fn validate_config(config: &ConnectorConfig) -> ConfigValidation {
    let mut issues = Vec::new();

    let raw_url = config.service.url.trim();
    if raw_url.is_empty() {
        issues.push(ValidationIssue::MissingUrl);
    } else {
        match url::Url::parse(raw_url) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
            Ok(parsed) => issues.push(ValidationIssue::UnsupportedScheme(parsed.scheme().to_string())),
            Err(e) => issues.push(ValidationIssue::InvalidUrl(e.to_string())),
        }
    }

    let key = config.service.anon_key.trim();
    if key.is_empty() {
        issues.push(ValidationIssue::MissingAnonKey);
    } else {
        if key.chars().count() < MIN_ANON_KEY_LEN {
            issues.push(ValidationIssue::AnonKeyTooShort {
                len: key.chars().count(),
            });
        }
        if key.chars().any(char::is_whitespace) {
            issues.push(ValidationIssue::AnonKeyWhitespace);
        }
    }

    if config.retries.max_attempts == 0 {
        issues.push(ValidationIssue::ZeroAttempts);
    }

    if config.auth.storage_key.trim().is_empty() {
        issues.push(ValidationIssue::EmptyStorageKey);
    }

    ConfigValidation {
        valid: issues.is_empty(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ConnectorConfig::with_service("https://x.supabase.co", "validlookingkey1234");
        let result = validate_config(&config);
        assert!(result.valid);
        assert!(result.issues.is_empty());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_empty_values_report_all_issues() {
        let config = ConnectorConfig::with_service("", "");
        let result = validate_config(&config);
        assert!(!result.valid);
        assert_eq!(
            result.issues,
            vec![ValidationIssue::MissingUrl, ValidationIssue::MissingAnonKey]
        );
    }

    #[test]
    fn test_bad_url_and_short_key() {
        let config = ConnectorConfig::with_service("not a url", "short");
        let result = validate_config(&config);
        assert!(matches!(result.issues[0], ValidationIssue::InvalidUrl(_)));
        assert_eq!(result.issues[1], ValidationIssue::AnonKeyTooShort { len: 5 });
    }

    #[test]
    fn test_unsupported_scheme() {
        let config = ConnectorConfig::with_service("ftp://x.supabase.co", "validlookingkey1234");
        let result = validate_config(&config);
        assert_eq!(
            result.issues,
            vec![ValidationIssue::UnsupportedScheme("ftp".to_string())]
        );
    }

    #[test]
    fn test_whitespace_key_and_zero_attempts() {
        let mut config = ConnectorConfig::with_service("https://x.supabase.co", "valid looking key 1234");
        config.retries.max_attempts = 0;
        config.auth.storage_key = " ".to_string();
        let result = validate_config(&config);
        assert_eq!(
            result.issues,
            vec![
                ValidationIssue::AnonKeyWhitespace,
                ValidationIssue::ZeroAttempts,
                ValidationIssue::EmptyStorageKey,
            ]
        );
    }

    #[test]
    fn test_whitespace_only_key_is_missing() {
        let config = ConnectorConfig::with_service("https://x.supabase.co", "   \t ");
        let result = validate_config(&config);
        assert_eq!(result.issues, vec![ValidationIssue::MissingAnonKey]);
    }

    #[test]
    fn test_strict_policy_rejects() {
        let config = ConnectorConfig::with_service("", "validlookingkey1234");
        let err = validate_config(&config).into_result().unwrap_err();
        assert!(err.to_string().contains("service url is empty"));
    }
}
