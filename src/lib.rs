//! Backend connector library.
//!
//! Owns the process-wide handle to an external backend service: configuration
//! with environment fallbacks, validation, a memoized handle built with bounded
//! retries, and small display helpers used alongside it.

pub mod config;
pub mod connector;
pub mod observability;
pub mod resilience;
pub mod utils;

pub use config::ConnectorConfig;
pub use connector::{get_handle, ConnectorError, ServiceClient, SingletonConnector};
