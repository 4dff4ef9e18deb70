//! Configuration error types.

use thiserror::Error;

/// Errors while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors while validating loaded configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server port must be non-zero")]
    InvalidPort,

    #[error("channel capacity must be non-zero")]
    InvalidChannelCapacity,
}
