//! Lazily constructed, memoized backend handle.
//!
//! # State Transitions
//! ```text
//! Uninitialized → (attempt 1..N) → Ready    handle cached, returned forever
//! Uninitialized → (attempt 1..N) → Failed   error returned, nothing cached
//! Failed → Uninitialized                    next caller starts a fresh sequence
//! ```
//!
//! # Design Decisions
//! - An invalid configuration is logged and construction still runs
//! - Nothing invalidates a cached handle except an explicit `reset`
//! - With `guard_initialization` a mutex serializes construction; without it
//!   racing callers may both construct and the last store wins

use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::{validate_config, ConnectorConfig};
use crate::connector::client::ServiceClient;
use crate::connector::types::{ConnectorError, ConnectorResult, ConnectorState};
use crate::observability::metrics;
use crate::resilience::{RetryOutcome, RetryPolicy};

/// Builds a [`ServiceClient`] from configuration.
pub trait ClientFactory: Send + Sync {
    fn build(&self, config: &ConnectorConfig) -> ConnectorResult<ServiceClient>;
}

/// Production factory: a reqwest-backed client.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClientFactory;

impl ClientFactory for HttpClientFactory {
    fn build(&self, config: &ConnectorConfig) -> ConnectorResult<ServiceClient> {
        ServiceClient::new(config)
    }
}

/// Owner of the shared handle slot.
pub struct SingletonConnector<F = HttpClientFactory> {
    config: ConnectorConfig,
    policy: RetryPolicy,
    factory: F,
    slot: ArcSwapOption<ServiceClient>,
    init_lock: Mutex<()>,
}

impl SingletonConnector<HttpClientFactory> {
    /// Create a connector using the reqwest-backed factory.
    pub fn new(config: ConnectorConfig) -> Self {
        Self::with_factory(config, HttpClientFactory)
    }
}

impl<F: ClientFactory> SingletonConnector<F> {
    /// Create a connector with a custom construction routine.
    pub fn with_factory(config: ConnectorConfig, factory: F) -> Self {
        Self {
            policy: RetryPolicy::from(&config.retries),
            config,
            factory,
            slot: ArcSwapOption::empty(),
            init_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }

    /// The cached handle, without attempting construction.
    pub fn cached(&self) -> Option<Arc<ServiceClient>> {
        self.slot.load_full()
    }

    pub fn state(&self) -> ConnectorState {
        if self.slot.load().is_some() {
            ConnectorState::Ready
        } else {
            ConnectorState::Uninitialized
        }
    }

    /// Drop the cached handle so the next request constructs a new one.
    ///
    /// Returns the handle that was cached, if any. Holders of that handle keep it.
    pub fn reset(&self) -> Option<Arc<ServiceClient>> {
        let previous = self.slot.swap(None);
        if let Some(handle) = &previous {
            tracing::info!(instance_id = %handle.instance_id(), "Backend client reset");
            metrics::record_handle_ready(false);
        }
        previous
    }

    /// Return the shared handle, constructing it on first use.
    pub async fn get_handle(&self) -> ConnectorResult<Arc<ServiceClient>> {
        if let Some(handle) = self.cached() {
            return Ok(handle);
        }

        if !self.config.guard_initialization {
            return self.initialize().await;
        }

        let _guard = self.init_lock.lock().await;
        // Another caller may have finished while we waited.
        if let Some(handle) = self.cached() {
            return Ok(handle);
        }
        self.initialize().await
    }

    async fn initialize(&self) -> ConnectorResult<Arc<ServiceClient>> {
        let validation = validate_config(&self.config);
        if !validation.valid {
            validation.log_warnings();
        }

        let max_attempts = self.policy.max_attempts;
        let outcome = self
            .policy
            .run(
                |attempt| {
                    tracing::debug!(attempt, max_attempts, "Constructing backend client");
                    metrics::record_init_attempt();
                    std::future::ready(self.factory.build(&self.config))
                },
                |attempt, error| {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %error,
                        "Backend client construction failed"
                    );
                    metrics::record_init_failure();
                },
            )
            .await;

        match outcome {
            RetryOutcome::Succeeded { value, attempts } => {
                let handle = Arc::new(value);
                self.slot.store(Some(handle.clone()));
                metrics::record_handle_ready(true);
                tracing::info!(
                    attempts,
                    instance_id = %handle.instance_id(),
                    "Backend client ready"
                );
                Ok(handle)
            }
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                tracing::error!(
                    attempts,
                    error = %last_error,
                    "Backend client initialization exhausted; check service URL and anon key"
                );
                Err(ConnectorError::InitializationExhausted {
                    attempts,
                    source: Box::new(last_error),
                })
            }
        }
    }
}

impl<F> std::fmt::Debug for SingletonConnector<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingletonConnector")
            .field("url", &self.config.service.url)
            .field("max_attempts", &self.policy.max_attempts)
            .field("ready", &self.slot.load().is_some())
            .finish()
    }
}
