//! Error types for the domain layer.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and draft validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' is required")]
    MissingField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' has unknown value '{value}'")]
    UnknownVariant { field: String, value: String },

    #[error("End date {end} is before start date {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a missing field validation error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        ValidationError::MissingField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown variant validation error.
    pub fn unknown_variant(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::UnknownVariant {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::MissingField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::UnknownVariant { field, .. } => field,
            ValidationError::InvalidDateRange { .. } => "end_date",
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    PatternNotFound,

    // State errors
    InvalidStateTransition,

    // Infrastructure errors
    StorageError,
    CleanupFailed,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::PatternNotFound => "PATTERN_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::CleanupFailed => "CLEANUP_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns a detail value by key.
    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details.get(key).map(String::as_str)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_missing_field_displays_correctly() {
        let err = ValidationError::missing_field("week_days");
        assert_eq!(format!("{}", err), "Field 'week_days' is required");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("day_of_month", 1, 31, 32);
        assert_eq!(
            format!("{}", err),
            "Field 'day_of_month' must be between 1 and 31, got 32"
        );
    }

    #[test]
    fn validation_error_date_range_names_end_date() {
        let err = ValidationError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        assert_eq!(err.field(), "end_date");
        assert_eq!(
            format!("{}", err),
            "End date 2025-01-01 is before start date 2025-02-01"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::PatternNotFound, "Pattern not found");
        assert_eq!(format!("{}", err), "[PATTERN_NOT_FOUND] Pattern not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::InvalidStateTransition, "Cannot pause")
            .with_detail("current", "Paused")
            .with_detail("attempted", "Paused");

        assert_eq!(err.detail("current"), Some("Paused"));
        assert_eq!(err.detail("missing"), None);
    }
}
