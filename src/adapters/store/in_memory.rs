//! In-memory schedule store.
//!
//! Implements the `ScheduleStore` port over a `HashMap` of patterns and a
//! flat list of occurrences. Useful for:
//! - Unit and integration tests of the lifecycle handlers
//! - Embedding the engine where persistence is handled elsewhere
//!
//! Failures can be injected through a `FailurePlan` to exercise the
//! compensation and partial-cascade paths.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use crate::domain::foundation::{OccurrenceId, PatternId};
use crate::domain::occurrence::{Occurrence, OccurrenceStatus};
use crate::domain::recurrence::{PatternStatus, RecurrencePattern};
use crate::ports::{OccurrenceFilter, ScheduleStore, StoreCapabilities, StoreError};

/// How `batch_insert_occurrences` should misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchInsertFailure {
    /// Store nothing and fail.
    Reject,
    /// Store the first `n` occurrences, then fail.
    Partial(usize),
    /// Store the first `n` occurrences and report success with that count.
    ShortCount(usize),
}

/// Failures to inject into the next store calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailurePlan {
    pub batch_insert: Option<BatchInsertFailure>,
    pub delete_pattern: bool,
    /// Cascades (status update and delete) stop after this many records.
    pub cascade_after: Option<usize>,
}

impl FailurePlan {
    pub fn batch_insert(failure: BatchInsertFailure) -> Self {
        Self {
            batch_insert: Some(failure),
            ..Self::default()
        }
    }

    pub fn cascade_after(processed: usize) -> Self {
        Self {
            cascade_after: Some(processed),
            ..Self::default()
        }
    }

    pub fn and_delete_pattern(mut self) -> Self {
        self.delete_pattern = true;
        self
    }
}

#[derive(Default)]
struct State {
    patterns: HashMap<PatternId, RecurrencePattern>,
    occurrences: Vec<Occurrence>,
    failures: FailurePlan,
}

impl State {
    /// Ids of the pattern's occurrences selected by `filter`, capped by the
    /// cascade failure limit. The flag is true when the cap cut the cascade
    /// short.
    fn cascade_targets(
        &self,
        pattern_id: &PatternId,
        filter: &OccurrenceFilter,
    ) -> (HashSet<OccurrenceId>, bool) {
        let matching: Vec<OccurrenceId> = self
            .occurrences
            .iter()
            .filter(|o| o.pattern_id() == Some(pattern_id) && filter.matches(o))
            .map(|o| *o.id())
            .collect();

        match self.failures.cascade_after {
            Some(limit) if limit < matching.len() => {
                (matching.into_iter().take(limit).collect(), true)
            }
            _ => (matching.into_iter().collect(), false),
        }
    }
}

fn partial_cascade(processed: usize) -> StoreError {
    StoreError::PartialCascade {
        processed,
        message: "injected cascade failure".to_string(),
    }
}

/// In-memory implementation of the ScheduleStore port.
///
/// Thread-safe via an internal `tokio::sync::RwLock`. Does not persist data
/// across restarts.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryScheduleStore::new());
/// let handler = CreatePatternHandler::new(store.clone(), publisher, clock, 6);
/// let result = handler.handle(cmd, metadata).await?;
///
/// let stored = store.occurrences_for_pattern(result.pattern.id()).await;
/// assert_eq!(stored.len(), result.occurrences_created);
/// ```
#[derive(Default)]
pub struct InMemoryScheduleStore {
    state: RwLock<State>,
    capabilities: StoreCapabilities,
}

impl InMemoryScheduleStore {
    /// Creates an empty, non-transactional store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that commits pattern and occurrences atomically.
    pub fn transactional() -> Self {
        Self {
            capabilities: StoreCapabilities::transactional(),
            ..Self::default()
        }
    }

    /// Replaces the injected failures.
    pub async fn fail_with(&self, plan: FailurePlan) {
        self.state.write().await.failures = plan;
    }

    /// Clears any injected failures.
    pub async fn heal(&self) {
        self.state.write().await.failures = FailurePlan::default();
    }

    // === Test Helpers ===

    /// Adds an occurrence directly, bypassing the engine.
    pub async fn seed_occurrence(&self, occurrence: Occurrence) {
        self.state.write().await.occurrences.push(occurrence);
    }

    pub async fn pattern(&self, id: &PatternId) -> Option<RecurrencePattern> {
        self.state.read().await.patterns.get(id).cloned()
    }

    pub async fn pattern_count(&self) -> usize {
        self.state.read().await.patterns.len()
    }

    /// Occurrences tagged with the pattern, ordered by date.
    pub async fn occurrences_for_pattern(&self, id: &PatternId) -> Vec<Occurrence> {
        let mut occurrences: Vec<Occurrence> = self
            .state
            .read()
            .await
            .occurrences
            .iter()
            .filter(|o| o.pattern_id() == Some(id))
            .cloned()
            .collect();
        occurrences.sort_by_key(|o| o.date());
        occurrences
    }

    pub async fn all_occurrences(&self) -> Vec<Occurrence> {
        self.state.read().await.occurrences.clone()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryScheduleStore {
    fn capabilities(&self) -> StoreCapabilities {
        self.capabilities
    }

    async fn find_pattern(&self, id: &PatternId) -> Result<Option<RecurrencePattern>, StoreError> {
        Ok(self.state.read().await.patterns.get(id).cloned())
    }

    async fn insert_pattern(&self, pattern: &RecurrencePattern) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.patterns.contains_key(pattern.id()) {
            return Err(StoreError::Constraint(format!(
                "pattern {} already exists",
                pattern.id()
            )));
        }
        state.patterns.insert(*pattern.id(), pattern.clone());
        Ok(())
    }

    async fn batch_insert_occurrences(
        &self,
        occurrences: &[Occurrence],
    ) -> Result<usize, StoreError> {
        let mut state = self.state.write().await;
        match state.failures.batch_insert {
            None => {
                state.occurrences.extend_from_slice(occurrences);
                Ok(occurrences.len())
            }
            Some(BatchInsertFailure::Reject) => Err(StoreError::Unavailable(
                "injected batch insert failure".to_string(),
            )),
            Some(BatchInsertFailure::Partial(n)) => {
                let stored = n.min(occurrences.len());
                state.occurrences.extend_from_slice(&occurrences[..stored]);
                Err(StoreError::Unavailable(format!(
                    "batch insert interrupted after {} rows",
                    stored
                )))
            }
            Some(BatchInsertFailure::ShortCount(n)) => {
                let stored = n.min(occurrences.len());
                state.occurrences.extend_from_slice(&occurrences[..stored]);
                Ok(stored)
            }
        }
    }

    async fn insert_pattern_with_occurrences(
        &self,
        pattern: &RecurrencePattern,
        occurrences: &[Occurrence],
    ) -> Result<usize, StoreError> {
        if !self.capabilities.supports_transactions() {
            return Err(StoreError::Unsupported(
                "insert_pattern_with_occurrences".to_string(),
            ));
        }

        let mut state = self.state.write().await;
        if state.patterns.contains_key(pattern.id()) {
            return Err(StoreError::Constraint(format!(
                "pattern {} already exists",
                pattern.id()
            )));
        }
        // Any injected insert failure rolls back the whole unit
        if state.failures.batch_insert.is_some() {
            return Err(StoreError::Unavailable(
                "transaction rolled back".to_string(),
            ));
        }

        state.patterns.insert(*pattern.id(), pattern.clone());
        state.occurrences.extend_from_slice(occurrences);
        Ok(occurrences.len())
    }

    async fn update_occurrences_status(
        &self,
        pattern_id: &PatternId,
        filter: &OccurrenceFilter,
        status: OccurrenceStatus,
    ) -> Result<usize, StoreError> {
        let mut state = self.state.write().await;
        let (targets, stopped) = state.cascade_targets(pattern_id, filter);

        for occurrence in state.occurrences.iter_mut() {
            if targets.contains(occurrence.id()) {
                *occurrence = occurrence.clone().with_status(status);
            }
        }

        if stopped {
            return Err(partial_cascade(targets.len()));
        }
        Ok(targets.len())
    }

    async fn delete_occurrences(
        &self,
        pattern_id: &PatternId,
        filter: &OccurrenceFilter,
    ) -> Result<usize, StoreError> {
        let mut state = self.state.write().await;
        let (targets, stopped) = state.cascade_targets(pattern_id, filter);

        state.occurrences.retain(|o| !targets.contains(o.id()));

        if stopped {
            return Err(partial_cascade(targets.len()));
        }
        Ok(targets.len())
    }

    async fn update_pattern_status(
        &self,
        id: &PatternId,
        status: PatternStatus,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let pattern = state
            .patterns
            .remove(id)
            .ok_or(StoreError::NotFound(*id))?;
        state.patterns.insert(*id, pattern.with_status(status));
        Ok(())
    }

    async fn delete_pattern(&self, id: &PatternId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.failures.delete_pattern {
            return Err(StoreError::Unavailable(
                "injected delete failure".to_string(),
            ));
        }
        state
            .patterns
            .remove(id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::occurrence::OccurrenceMaterializer;
    use crate::domain::recurrence::fixtures::{date, pattern_from, weekly_draft};

    fn pattern_with_occurrences() -> (RecurrencePattern, Vec<Occurrence>) {
        let pattern = pattern_from(weekly_draft());
        let dates = [
            date(2025, 1, 6),
            date(2025, 1, 8),
            date(2025, 1, 13),
            date(2025, 1, 15),
        ];
        let occurrences = OccurrenceMaterializer::new().materialize(&pattern, &dates);
        (pattern, occurrences)
    }

    #[tokio::test]
    async fn insert_and_find_pattern() {
        let store = InMemoryScheduleStore::new();
        let (pattern, _) = pattern_with_occurrences();

        store.insert_pattern(&pattern).await.unwrap();

        let found = store.find_pattern(pattern.id()).await.unwrap();
        assert_eq!(found, Some(pattern));
    }

    #[tokio::test]
    async fn duplicate_pattern_is_a_constraint_violation() {
        let store = InMemoryScheduleStore::new();
        let (pattern, _) = pattern_with_occurrences();

        store.insert_pattern(&pattern).await.unwrap();
        let err = store.insert_pattern(&pattern).await.unwrap_err();
        assert!(matches!(err, StoreError::Constraint(_)));
    }

    #[tokio::test]
    async fn batch_insert_reports_count() {
        let store = InMemoryScheduleStore::new();
        let (pattern, occurrences) = pattern_with_occurrences();

        let count = store.batch_insert_occurrences(&occurrences).await.unwrap();
        assert_eq!(count, 4);
        assert_eq!(store.occurrences_for_pattern(pattern.id()).await.len(), 4);
    }

    #[tokio::test]
    async fn partial_batch_failure_leaves_prefix() {
        let store = InMemoryScheduleStore::new();
        store
            .fail_with(FailurePlan::batch_insert(BatchInsertFailure::Partial(2)))
            .await;
        let (pattern, occurrences) = pattern_with_occurrences();

        assert!(store.batch_insert_occurrences(&occurrences).await.is_err());
        assert_eq!(store.occurrences_for_pattern(pattern.id()).await.len(), 2);
    }

    #[tokio::test]
    async fn non_transactional_store_rejects_atomic_insert() {
        let store = InMemoryScheduleStore::new();
        let (pattern, occurrences) = pattern_with_occurrences();

        let err = store
            .insert_pattern_with_occurrences(&pattern, &occurrences)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unsupported(_)));
        assert_eq!(store.pattern_count().await, 0);
    }

    #[tokio::test]
    async fn transactional_insert_rolls_back_on_failure() {
        let store = InMemoryScheduleStore::transactional();
        store
            .fail_with(FailurePlan::batch_insert(BatchInsertFailure::Reject))
            .await;
        let (pattern, occurrences) = pattern_with_occurrences();

        assert!(store
            .insert_pattern_with_occurrences(&pattern, &occurrences)
            .await
            .is_err());
        assert_eq!(store.pattern_count().await, 0);
        assert!(store.all_occurrences().await.is_empty());
    }

    #[tokio::test]
    async fn status_cascade_respects_filter() {
        let store = InMemoryScheduleStore::new();
        let (pattern, occurrences) = pattern_with_occurrences();
        store.batch_insert_occurrences(&occurrences).await.unwrap();

        let filter = OccurrenceFilter::upcoming_scheduled(date(2025, 1, 10));
        let count = store
            .update_occurrences_status(pattern.id(), &filter, OccurrenceStatus::Cancelled)
            .await
            .unwrap();

        assert_eq!(count, 2);
        let statuses: Vec<_> = store
            .occurrences_for_pattern(pattern.id())
            .await
            .iter()
            .map(|o| o.status())
            .collect();
        assert_eq!(
            statuses,
            vec![
                OccurrenceStatus::Scheduled,
                OccurrenceStatus::Scheduled,
                OccurrenceStatus::Cancelled,
                OccurrenceStatus::Cancelled,
            ]
        );
    }

    #[tokio::test]
    async fn cascade_leaves_other_patterns_alone() {
        let store = InMemoryScheduleStore::new();
        let (pattern, occurrences) = pattern_with_occurrences();
        let (other, other_occurrences) = pattern_with_occurrences();
        store.batch_insert_occurrences(&occurrences).await.unwrap();
        store.batch_insert_occurrences(&other_occurrences).await.unwrap();

        let deleted = store
            .delete_occurrences(pattern.id(), &OccurrenceFilter::all())
            .await
            .unwrap();

        assert_eq!(deleted, 4);
        assert!(store.occurrences_for_pattern(pattern.id()).await.is_empty());
        assert_eq!(store.occurrences_for_pattern(other.id()).await.len(), 4);
    }

    #[tokio::test]
    async fn interrupted_cascade_reports_processed_count() {
        let store = InMemoryScheduleStore::new();
        let (pattern, occurrences) = pattern_with_occurrences();
        store.batch_insert_occurrences(&occurrences).await.unwrap();
        store.fail_with(FailurePlan::cascade_after(1)).await;

        let err = store
            .delete_occurrences(pattern.id(), &OccurrenceFilter::all())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            StoreError::PartialCascade {
                processed: 1,
                message: "injected cascade failure".to_string(),
            }
        );
        assert_eq!(store.occurrences_for_pattern(pattern.id()).await.len(), 3);
    }

    #[tokio::test]
    async fn update_and_delete_missing_pattern_is_not_found() {
        let store = InMemoryScheduleStore::new();
        let id = PatternId::new();

        assert_eq!(
            store
                .update_pattern_status(&id, PatternStatus::Paused)
                .await
                .unwrap_err(),
            StoreError::NotFound(id)
        );
        assert_eq!(store.delete_pattern(&id).await.unwrap_err(), StoreError::NotFound(id));
    }

    #[tokio::test]
    async fn update_pattern_status_persists() {
        let store = InMemoryScheduleStore::new();
        let (pattern, _) = pattern_with_occurrences();
        store.insert_pattern(&pattern).await.unwrap();

        store
            .update_pattern_status(pattern.id(), PatternStatus::Paused)
            .await
            .unwrap();

        let stored = store.pattern(pattern.id()).await.unwrap();
        assert_eq!(stored.status(), PatternStatus::Paused);
    }
}
