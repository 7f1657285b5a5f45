//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment (BACKEND_URL, BACKEND_ANON_KEY) and/or config file (TOML)
//!     → loader.rs (parse, deserialize, overlay env)
//!     → validation.rs (semantic checks, warnings)
//!     → ConnectorConfig (immutable)
//!     → owned by the SingletonConnector
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults; missing env values fall back to embedded literals
//! - Validation is separate from construction so callers pick strict or lenient

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AuthOptions, ConnectorConfig, RetryConfig, ServiceConfig};
pub use validation::{validate_config, ConfigValidation, ValidationIssue};
