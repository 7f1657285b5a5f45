//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Handle construction:
//!     → retries.rs (run up to max_attempts, report each failure)
//!     → backoff.rs (delay between attempts; zero by default)
//! ```
//!
//! # Design Decisions
//! - Retries are bounded; the ceiling comes from configuration
//! - Failures are not remembered between runs
//! - Jittered backoff is available but off unless a base delay is configured

pub mod backoff;
pub mod retries;

pub use retries::{RetryOutcome, RetryPolicy};
