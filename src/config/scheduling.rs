//! Scheduling configuration

use serde::Deserialize;

use super::ValidationError;
use crate::domain::recurrence::DEFAULT_HORIZON_MONTHS;

/// Shortest allowed generation horizon, in months
pub const MIN_HORIZON_MONTHS: u32 = 1;

/// Longest allowed generation horizon, in months
pub const MAX_HORIZON_MONTHS: u32 = 24;

/// Scheduling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// Months generated for patterns without an end date
    #[serde(default = "default_horizon_months")]
    pub default_horizon_months: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            default_horizon_months: default_horizon_months(),
        }
    }
}

fn default_horizon_months() -> u32 {
    DEFAULT_HORIZON_MONTHS
}

impl SchedulingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_HORIZON_MONTHS..=MAX_HORIZON_MONTHS).contains(&self.default_horizon_months) {
            return Err(ValidationError::InvalidHorizon {
                min: MIN_HORIZON_MONTHS,
                max: MAX_HORIZON_MONTHS,
                actual: self.default_horizon_months,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_horizon_is_six_months() {
        let config = SchedulingConfig::default();
        assert_eq!(config.default_horizon_months, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_horizon_bounds() {
        for months in [0, 25] {
            let config = SchedulingConfig {
                default_horizon_months: months,
            };
            assert!(config.validate().is_err(), "{} months accepted", months);
        }
        for months in [1, 24] {
            let config = SchedulingConfig {
                default_horizon_months: months,
            };
            assert!(config.validate().is_ok());
        }
    }
}
