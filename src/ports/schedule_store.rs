//! Schedule store port.
//!
//! Defines the contract for persisting recurrence patterns and their
//! occurrences. The store may or may not support transactions; callers check
//! `capabilities()` and compensate themselves when it does not.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::foundation::PatternId;
use crate::domain::occurrence::{Occurrence, OccurrenceStatus};
use crate::domain::recurrence::{PatternStatus, RecurrenceError, RecurrencePattern};

/// Errors reported by a schedule store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Pattern not found: {0}")]
    NotFound(PatternId),

    /// A cascade stopped partway; `processed` records were already changed.
    #[error("Cascade stopped after {processed} records: {message}")]
    PartialCascade { processed: usize, message: String },

    #[error("Operation not supported: {0}")]
    Unsupported(String),
}

impl From<StoreError> for RecurrenceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => RecurrenceError::NotFound(id),
            StoreError::PartialCascade { processed, .. } => RecurrenceError::Storage {
                message: err.to_string(),
                processed: Some(processed),
            },
            other => RecurrenceError::storage(other.to_string()),
        }
    }
}

/// What a store implementation can guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreCapabilities {
    /// Pattern and occurrence inserts can commit atomically.
    pub transactions: bool,
}

impl StoreCapabilities {
    pub fn transactional() -> Self {
        Self { transactions: true }
    }

    pub fn supports_transactions(&self) -> bool {
        self.transactions
    }
}

/// Selects a subset of a pattern's occurrences.
///
/// Unset fields match everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OccurrenceFilter {
    pub status: Option<OccurrenceStatus>,
    /// Inclusive lower bound on the occurrence date.
    pub from_date: Option<NaiveDate>,
}

impl OccurrenceFilter {
    /// `Scheduled` occurrences dated today or later: the cascade scope of
    /// pause and delete.
    pub fn upcoming_scheduled(today: NaiveDate) -> Self {
        Self {
            status: Some(OccurrenceStatus::Scheduled),
            from_date: Some(today),
        }
    }

    /// Every occurrence regardless of status or date.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, occurrence: &Occurrence) -> bool {
        if let Some(status) = self.status {
            if occurrence.status() != status {
                return false;
            }
        }
        if let Some(from) = self.from_date {
            if occurrence.date() < from {
                return false;
            }
        }
        true
    }
}

/// Persistence port for patterns and occurrences.
///
/// Counts returned by mutating operations are the number of records actually
/// affected. Cascade implementations that stop partway must report
/// `PartialCascade` with the number already processed.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Defaults to no transactional support.
    fn capabilities(&self) -> StoreCapabilities {
        StoreCapabilities::default()
    }

    /// Returns `None` if the pattern does not exist.
    async fn find_pattern(&self, id: &PatternId) -> Result<Option<RecurrencePattern>, StoreError>;

    /// # Errors
    ///
    /// - `Constraint` if a pattern with the same id exists
    async fn insert_pattern(&self, pattern: &RecurrencePattern) -> Result<(), StoreError>;

    /// Insert occurrences in one batch, returning how many were stored.
    async fn batch_insert_occurrences(&self, occurrences: &[Occurrence])
        -> Result<usize, StoreError>;

    /// Insert a pattern and its occurrences as a unit.
    ///
    /// Only stores reporting `transactions` implement this.
    async fn insert_pattern_with_occurrences(
        &self,
        _pattern: &RecurrencePattern,
        _occurrences: &[Occurrence],
    ) -> Result<usize, StoreError> {
        Err(StoreError::Unsupported(
            "insert_pattern_with_occurrences".to_string(),
        ))
    }

    /// Set the status of the pattern's occurrences selected by `filter`.
    async fn update_occurrences_status(
        &self,
        pattern_id: &PatternId,
        filter: &OccurrenceFilter,
        status: OccurrenceStatus,
    ) -> Result<usize, StoreError>;

    /// Delete the pattern's occurrences selected by `filter`.
    async fn delete_occurrences(
        &self,
        pattern_id: &PatternId,
        filter: &OccurrenceFilter,
    ) -> Result<usize, StoreError>;

    /// # Errors
    ///
    /// - `NotFound` if the pattern doesn't exist
    async fn update_pattern_status(
        &self,
        id: &PatternId,
        status: PatternStatus,
    ) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// - `NotFound` if the pattern doesn't exist
    async fn delete_pattern(&self, id: &PatternId) -> Result<(), StoreError>;
}
