//! Errors surfaced by pattern lifecycle operations.
//!
//! | Error | Caller action |
//! |-------|---------------|
//! | Validation | Fix the draft; never retried automatically |
//! | NotFound | Pattern was deleted or never existed |
//! | InvalidState | Re-query the pattern's current status |
//! | Storage | Store failed; `processed` counts records already handled |
//! | CleanupFailed | Manual reconciliation required |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, PatternId, ValidationError};

/// Pattern lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecurrenceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Pattern not found: {0}")]
    NotFound(PatternId),

    #[error("Invalid state: cannot move pattern from {current} to {attempted}")]
    InvalidState { current: String, attempted: String },

    #[error("Storage error: {message}")]
    Storage {
        message: String,
        processed: Option<usize>,
    },

    #[error(
        "Cleanup failed for pattern {pattern_id}, manual reconciliation required \
         (cause: {cause}; cleanup: {cleanup})"
    )]
    CleanupFailed {
        pattern_id: PatternId,
        cause: String,
        cleanup: String,
    },
}

impl RecurrenceError {
    pub fn not_found(id: PatternId) -> Self {
        RecurrenceError::NotFound(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        RecurrenceError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        RecurrenceError::Storage {
            message: message.into(),
            processed: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RecurrenceError::Validation(_) => ErrorCode::ValidationFailed,
            RecurrenceError::NotFound(_) => ErrorCode::PatternNotFound,
            RecurrenceError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            RecurrenceError::Storage { .. } => ErrorCode::StorageError,
            RecurrenceError::CleanupFailed { .. } => ErrorCode::CleanupFailed,
        }
    }

    /// Records already handled before a storage failure, when known.
    pub fn processed(&self) -> Option<usize> {
        match self {
            RecurrenceError::Storage { processed, .. } => *processed,
            _ => None,
        }
    }
}

impl From<DomainError> for RecurrenceError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => RecurrenceError::InvalidState {
                current: err.detail("current").unwrap_or("unknown").to_string(),
                attempted: err.detail("attempted").unwrap_or("unknown").to_string(),
            },
            ErrorCode::ValidationFailed => {
                let field = err.detail("field").unwrap_or("unknown").to_string();
                RecurrenceError::Validation(ValidationError::invalid_format(field, err.message))
            }
            _ => RecurrenceError::storage(err.to_string()),
        }
    }
}
