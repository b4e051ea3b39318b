//! Logging configuration

use serde::Deserialize;
use std::str::FromStr;

use super::ValidationError;

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Plain,
    /// One JSON object per event
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Fallback filter level when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    /// Validate the level names a tracing level
    pub fn validate(&self) -> Result<(), ValidationError> {
        tracing::Level::from_str(&self.level)
            .map(|_| ())
            .map_err(|_| ValidationError::InvalidLogLevel(self.level.clone()))
    }
}
