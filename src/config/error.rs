//! Configuration errors.

use thiserror::Error;

/// Failure to load configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Semantic validation failure for a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required configuration value: {0}")]
    MissingRequired(&'static str),

    #[error("{0} must be an http(s) URL")]
    InvalidUrl(&'static str),
}
