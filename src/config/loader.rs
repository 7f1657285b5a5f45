//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ConnectorConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

/// Parse a configuration from TOML text without touching the environment.
pub fn parse_config(content: &str) -> Result<ConnectorConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::Parse)
}

/// Load configuration from a TOML file, then overlay environment values.
///
/// Semantic validation is left to the caller; see [`crate::config::validate_config`].
pub fn load_config(path: &Path) -> Result<ConnectorConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut config = parse_config(&content)?;
    config.apply_env();

    tracing::debug!(path = ?path, url = %config.service.url, "Configuration file loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            guard_initialization = false

            [auth]
            storage_key = "custom-key"

            [observability]
            log_level = "debug"
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert!(!config.guard_initialization);
        assert_eq!(config.auth.storage_key, "custom-key");
        assert!(config.auth.persist_session);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[service\nurl = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
