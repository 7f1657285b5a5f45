//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! connector, config validation, health checks produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//! ```

pub mod logging;
pub mod metrics;
