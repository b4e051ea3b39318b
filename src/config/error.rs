//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Scheduling horizon must be between {min} and {max} months, got {actual}")]
    InvalidHorizon { min: u32, max: u32, actual: u32 },
}
