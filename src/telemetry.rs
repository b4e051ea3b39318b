//! Tracing subscriber setup.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("Tracing already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Build the filter from `RUST_LOG`, falling back to the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.level)?),
    }
}

/// Install the global subscriber.
///
/// Fails instead of panicking when a subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
        LogFormat::Plain => registry.with(fmt::layer()).try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_builds_filter() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..LoggingConfig::default()
        };
        assert!(env_filter(&config).is_ok());
    }

    #[test]
    fn second_init_fails_without_panicking() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);
        assert!(matches!(
            init_tracing(&config),
            Err(TelemetryError::AlreadyInitialized(_))
        ));
    }
}
