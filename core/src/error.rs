//! Error types for configuration loading.
//!
//! Covers the failure modes of reading, writing, and checking a
//! [`NetscrapeConfig`](crate::NetscrapeConfig).

use thiserror::Error;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A field holds a value the parser stages cannot work with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
