//! Backend connector subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (BACKEND_URL, BACKEND_ANON_KEY)
//!     → config (fallback defaults, validation warnings)
//!     → singleton.rs (memoized slot, bounded construction retries)
//!     → client.rs (reqwest client with apikey/bearer headers)
//!     → callers share one Arc<ServiceClient>
//! ```
//!
//! # Security Constraints
//! - The anon key is never logged or printed by Debug impls
//! - A call yields a fully built handle or an error, never a partial handle

pub mod client;
pub mod singleton;
pub mod types;

use std::sync::{Arc, OnceLock};

use crate::config::ConnectorConfig;

pub use client::ServiceClient;
pub use singleton::{ClientFactory, HttpClientFactory, SingletonConnector};
pub use types::{ConnectorError, ConnectorResult, ConnectorState, MISSING_URL_OR_KEY};

static GLOBAL: OnceLock<SingletonConnector> = OnceLock::new();

/// Process-wide connector, configured from the environment on first access.
pub fn global() -> &'static SingletonConnector {
    GLOBAL.get_or_init(|| SingletonConnector::new(ConnectorConfig::from_env()))
}

/// Install the process-wide connector with an explicit configuration.
///
/// Fails if [`global`] was already initialized.
pub fn install_global(config: ConnectorConfig) -> ConnectorResult<&'static SingletonConnector> {
    GLOBAL
        .set(SingletonConnector::new(config))
        .map_err(|_| ConnectorError::AlreadyInstalled)?;
    Ok(global())
}

/// Shared handle from the process-wide connector.
pub async fn get_handle() -> ConnectorResult<Arc<ServiceClient>> {
    global().get_handle().await
}
