//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COACH_SCHEDULE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use coach_schedule::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Horizon: {} months", config.scheduling.default_horizon_months);
//! ```

mod error;
mod logging;
mod scheduling;

pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use scheduling::{SchedulingConfig, MAX_HORIZON_MONTHS, MIN_HORIZON_MONTHS};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable config.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Tracing output configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Occurrence generation settings
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COACH_SCHEDULE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COACH_SCHEDULE__LOGGING__FORMAT=json` -> `logging.format = json`
    /// - `COACH_SCHEDULE__SCHEDULING__DEFAULT_HORIZON_MONTHS=12`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COACH_SCHEDULE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an unknown log level or a horizon
    /// outside the allowed range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.scheduling.validate()?;
        Ok(())
    }
}
