//! Configuration schema definitions.
//!
//! This module defines the configuration record read by the connector.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Environment variable holding the backend endpoint URL.
pub const URL_ENV_VAR: &str = "BACKEND_URL";

/// Environment variable holding the backend anon key.
pub const ANON_KEY_ENV_VAR: &str = "BACKEND_ANON_KEY";

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV_VAR: &str = "CONNECTOR_LOG_LEVEL";

/// Endpoint used when `BACKEND_URL` is absent.
pub const DEFAULT_SERVICE_URL: &str = "https://project-ref.supabase.co";

/// Anon key used when `BACKEND_ANON_KEY` is absent.
// WARNING: development placeholder, never valid against a real project.
pub const DEFAULT_ANON_KEY: &str = "public-anon-key-placeholder";

/// Storage key under which the session is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "app-auth-session";

/// Root configuration for the connector.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Backend endpoint and credential.
    pub service: ServiceConfig,

    /// Session behaviour of the produced handle.
    pub auth: AuthOptions,

    /// Construction retry settings.
    pub retries: RetryConfig,

    /// Timeouts applied to the handle's HTTP client.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Serialize construction so racing callers share one attempt sequence.
    pub guard_initialization: bool,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            auth: AuthOptions::default(),
            retries: RetryConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            guard_initialization: true,
        }
    }
}

impl ConnectorConfig {
    /// Build a configuration from the process environment.
    ///
    /// Absent or empty variables fall back to the embedded defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overlay environment-provided values onto this configuration.
    ///
    /// Only variables that are set and non-empty replace existing values.
    pub fn apply_env(&mut self) {
        if let Some(url) = non_empty_env(URL_ENV_VAR) {
            self.service.url = url;
        }
        if let Some(key) = non_empty_env(ANON_KEY_ENV_VAR) {
            self.service.anon_key = key;
        }
        if let Some(level) = non_empty_env(LOG_LEVEL_ENV_VAR) {
            self.observability.log_level = level;
        }
    }

    /// Shorthand for a configuration with explicit service values.
    pub fn with_service(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            service: ServiceConfig {
                url: url.into(),
                anon_key: anon_key.into(),
            },
            ..Self::default()
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Backend endpoint and credential.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the backend project (e.g., "https://x.supabase.co").
    pub url: String,

    /// Public anon key sent with every request.
    pub anon_key: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVICE_URL.to_string(),
            anon_key: DEFAULT_ANON_KEY.to_string(),
        }
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}

/// Session options attached to every handle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthOptions {
    /// Keep the session in persistent storage.
    pub persist_session: bool,

    /// Refresh the access token before it expires.
    pub auto_refresh_token: bool,

    /// Name of the storage slot holding the session.
    pub storage_key: String,

    /// Pick up a session delivered in the redirect URL.
    pub detect_session_in_url: bool,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            persist_session: true,
            auto_refresh_token: true,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            detect_session_in_url: true,
        }
    }
}

/// Retry configuration for handle construction.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of construction attempts.
    pub max_attempts: u32,

    /// Base delay for exponential backoff in milliseconds (0 = retry immediately).
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 0,
            max_delay_ms: 2000,
        }
    }
}

/// Timeout configuration for the handle's HTTP client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
