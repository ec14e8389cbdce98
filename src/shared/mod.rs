//! Shared Module
//!
//! Types that do not depend on the HTTP server: input validation errors and
//! application configuration. The backend wraps these at its boundary.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
