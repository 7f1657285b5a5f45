//! Retry logic.
//!
//! # Responsibilities
//! - Run an operation up to a fixed attempt ceiling
//! - Sleep a jittered exponential backoff between attempts
//! - Report every failed attempt to the caller
//!
//! # Design Decisions
//! - No timeout or cancellation; each attempt runs to completion
//! - The last error is kept so the caller can name the root cause

use std::future::Future;

use crate::config::RetryConfig;
use crate::resilience::backoff::calculate_backoff;

/// Attempt ceiling and delay settings for a retried operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

/// Result of running an operation under a [`RetryPolicy`].
#[derive(Debug)]
pub enum RetryOutcome<T, E> {
    Succeeded { value: T, attempts: u32 },
    Exhausted { attempts: u32, last_error: E },
}

impl<T, E> RetryOutcome<T, E> {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Succeeded { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds or the attempt ceiling is reached.
    ///
    /// `op` receives the 1-based attempt number. `on_failure` is called after
    /// every failed attempt, including the last one. A ceiling of zero is
    /// treated as a single attempt.
    pub async fn run<T, E, F, Fut, R>(&self, mut op: F, mut on_failure: R) -> RetryOutcome<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        R: FnMut(u32, &E),
    {
        let ceiling = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt).await {
                Ok(value) => {
                    return RetryOutcome::Succeeded {
                        value,
                        attempts: attempt,
                    }
                }
                Err(e) => {
                    on_failure(attempt, &e);
                    if attempt >= ceiling {
                        return RetryOutcome::Exhausted {
                            attempts: attempt,
                            last_error: e,
                        };
                    }
                }
            }

            let delay = calculate_backoff(attempt, self.base_delay_ms, self.max_delay_ms);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;
        }
    }
}
