//! Integration tests for the pattern lifecycle.
//!
//! These tests drive `PatternLifecycleController` end to end:
//! 1. Draft validation and occurrence generation
//! 2. Persistence through the in-memory schedule store
//! 3. Pause and delete cascades scoped to upcoming scheduled occurrences
//! 4. Compensation when the store fails partway through creation
//!
//! Uses the in-memory adapters so no external services are required.

use chrono::{Duration, NaiveDate, NaiveTime};
use std::sync::Arc;

use coach_schedule::adapters::{
    BatchInsertFailure, FailurePlan, FixedClock, InMemoryEventBus, InMemoryScheduleStore,
};
use coach_schedule::application::PatternLifecycleController;
use coach_schedule::config::SchedulingConfig;
use coach_schedule::domain::calendar::DayOfWeek;
use coach_schedule::domain::foundation::{
    AthleteId, CoachId, CommandMetadata, ErrorCode, PatternId,
};
use coach_schedule::domain::occurrence::{Occurrence, OccurrenceStatus, SessionSlot};
use coach_schedule::domain::recurrence::{
    PatternDraft, PatternStatus, RecurrenceError, SAFETY_CAP,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    date(2025, 1, 8)
}

struct Harness {
    store: Arc<InMemoryScheduleStore>,
    bus: Arc<InMemoryEventBus>,
    controller: PatternLifecycleController,
}

impl Harness {
    fn with_store(store: InMemoryScheduleStore) -> Self {
        Self::build(store, InMemoryEventBus::new(), SchedulingConfig::default())
    }

    fn new() -> Self {
        Self::with_store(InMemoryScheduleStore::new())
    }

    fn build(
        store: InMemoryScheduleStore,
        bus: InMemoryEventBus,
        scheduling: SchedulingConfig,
    ) -> Self {
        let store = Arc::new(store);
        let bus = Arc::new(bus);
        let controller = PatternLifecycleController::new(
            store.clone(),
            bus.clone(),
            Arc::new(FixedClock::on(today())),
            &scheduling,
        );
        Self {
            store,
            bus,
            controller,
        }
    }

    async fn dates(&self, id: &PatternId) -> Vec<NaiveDate> {
        self.store
            .occurrences_for_pattern(id)
            .await
            .iter()
            .map(|o| o.date())
            .collect()
    }
}

fn metadata() -> CommandMetadata {
    CommandMetadata::new(CoachId::new("coach-7").unwrap()).with_correlation_id("req-42")
}

fn draft(kind: &str) -> PatternDraft {
    PatternDraft {
        coach_id: "coach-7".to_string(),
        athlete_id: "athlete-3".to_string(),
        title: "Threshold intervals".to_string(),
        kind: kind.to_string(),
        week_days: vec![DayOfWeek::Monday, DayOfWeek::Wednesday],
        day_of_month: None,
        time_of_day: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        duration_minutes: 45,
        start_date: date(2025, 1, 6),
        end_date: Some(date(2025, 1, 19)),
    }
}

/// Daily pattern covering today and tomorrow, plus a completed session yesterday.
async fn pattern_with_history(harness: &Harness) -> PatternId {
    let created = harness
        .controller
        .create_pattern(
            PatternDraft {
                start_date: today(),
                end_date: Some(today() + Duration::days(1)),
                ..draft("daily")
            },
            metadata(),
        )
        .await
        .unwrap();
    let id = *created.pattern.id();

    let yesterday = Occurrence::for_pattern(
        id,
        SessionSlot {
            coach_id: CoachId::new("coach-7").unwrap(),
            athlete_id: AthleteId::new("athlete-3").unwrap(),
            title: "Threshold intervals".to_string(),
            date: today() - Duration::days(1),
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            duration_minutes: 45,
        },
    )
    .with_status(OccurrenceStatus::Completed);
    harness.store.seed_occurrence(yesterday).await;

    id
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn weekly_pattern_materializes_expected_dates() {
    let harness = Harness::new();

    let created = harness
        .controller
        .create_pattern(draft("weekly"), metadata())
        .await
        .unwrap();

    assert_eq!(created.occurrences_created, 4);
    assert_eq!(
        harness.dates(created.pattern.id()).await,
        vec![
            date(2025, 1, 6),
            date(2025, 1, 8),
            date(2025, 1, 13),
            date(2025, 1, 15),
        ]
    );
    let stored = harness.store.occurrences_for_pattern(created.pattern.id()).await;
    assert!(stored.iter().all(|o| o.status() == OccurrenceStatus::Scheduled));
    assert!(stored
        .iter()
        .all(|o| o.end_time() == NaiveTime::from_hms_opt(18, 45, 0).unwrap()));
}

#[tokio::test]
async fn biweekly_pattern_skips_alternate_weeks() {
    let harness = Harness::new();

    let created = harness
        .controller
        .create_pattern(
            PatternDraft {
                end_date: Some(date(2025, 1, 26)),
                ..draft("biweekly")
            },
            metadata(),
        )
        .await
        .unwrap();

    assert_eq!(
        harness.dates(created.pattern.id()).await,
        vec![
            date(2025, 1, 6),
            date(2025, 1, 8),
            date(2025, 1, 20),
            date(2025, 1, 22),
        ]
    );
}

#[tokio::test]
async fn monthly_pattern_lands_on_day_of_month() {
    let harness = Harness::new();

    let created = harness
        .controller
        .create_pattern(
            PatternDraft {
                week_days: vec![],
                day_of_month: Some(15),
                start_date: date(2025, 1, 1),
                end_date: Some(date(2025, 4, 1)),
                ..draft("monthly")
            },
            metadata(),
        )
        .await
        .unwrap();

    assert_eq!(
        harness.dates(created.pattern.id()).await,
        vec![date(2025, 1, 15), date(2025, 2, 15), date(2025, 3, 15)]
    );
}

#[tokio::test]
async fn monthly_pattern_skips_short_months() {
    let harness = Harness::new();

    let created = harness
        .controller
        .create_pattern(
            PatternDraft {
                day_of_month: Some(31),
                start_date: date(2025, 1, 1),
                end_date: Some(date(2025, 5, 31)),
                ..draft("monthly")
            },
            metadata(),
        )
        .await
        .unwrap();

    assert_eq!(
        harness.dates(created.pattern.id()).await,
        vec![date(2025, 1, 31), date(2025, 3, 31), date(2025, 5, 31)]
    );
}

#[tokio::test]
async fn open_ended_daily_pattern_stops_at_safety_cap() {
    let harness = Harness::build(
        InMemoryScheduleStore::new(),
        InMemoryEventBus::new(),
        SchedulingConfig {
            default_horizon_months: 24,
        },
    );

    let created = harness
        .controller
        .create_pattern(
            PatternDraft {
                start_date: date(2020, 1, 1),
                end_date: None,
                ..draft("daily")
            },
            metadata(),
        )
        .await
        .unwrap();

    assert!(created.truncated);
    assert_eq!(created.occurrences_created, SAFETY_CAP);
    assert_eq!(
        harness
            .store
            .occurrences_for_pattern(created.pattern.id())
            .await
            .len(),
        SAFETY_CAP
    );
}

#[tokio::test]
async fn created_event_carries_request_metadata() {
    let harness = Harness::new();

    let created = harness
        .controller
        .create_pattern(draft("weekly"), metadata())
        .await
        .unwrap();

    let events = harness
        .bus
        .events_for_aggregate(&created.pattern.id().to_string());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "pattern.created.v1");
    assert_eq!(events[0].schema_version, 1);
    assert_eq!(events[0].metadata.correlation_id, Some("req-42".to_string()));
    assert_eq!(events[0].metadata.actor_id, Some("coach-7".to_string()));
}

#[tokio::test]
async fn invalid_draft_leaves_store_untouched() {
    let harness = Harness::new();

    let err = harness
        .controller
        .create_pattern(
            PatternDraft {
                end_date: Some(date(2025, 1, 1)),
                ..draft("weekly")
            },
            metadata(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(harness.store.pattern_count().await, 0);
    assert_eq!(harness.bus.event_count(), 0);
}

#[tokio::test]
async fn publish_failure_does_not_undo_creation() {
    let harness = Harness::build(
        InMemoryScheduleStore::new(),
        InMemoryEventBus::failing(),
        SchedulingConfig::default(),
    );

    let created = harness
        .controller
        .create_pattern(draft("weekly"), metadata())
        .await
        .unwrap();

    assert!(harness.store.pattern(created.pattern.id()).await.is_some());
    assert_eq!(harness.bus.event_count(), 0);
}

// =============================================================================
// Compensation
// =============================================================================

#[tokio::test]
async fn failed_occurrence_insert_leaves_no_orphan() {
    let harness = Harness::new();
    harness
        .store
        .fail_with(FailurePlan::batch_insert(BatchInsertFailure::Partial(2)))
        .await;

    let err = harness
        .controller
        .create_pattern(draft("weekly"), metadata())
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::StorageError);
    assert_eq!(harness.store.pattern_count().await, 0);
    assert!(harness.store.all_occurrences().await.is_empty());
    assert_eq!(harness.bus.event_count(), 0);
}

#[tokio::test]
async fn short_insert_count_is_compensated() {
    let harness = Harness::new();
    harness
        .store
        .fail_with(FailurePlan::batch_insert(BatchInsertFailure::ShortCount(3)))
        .await;

    let err = harness
        .controller
        .create_pattern(draft("weekly"), metadata())
        .await
        .unwrap_err();

    assert!(matches!(err, RecurrenceError::Storage { .. }));
    assert_eq!(harness.store.pattern_count().await, 0);
    assert!(harness.store.all_occurrences().await.is_empty());
}

#[tokio::test]
async fn failed_cleanup_is_reported_for_reconciliation() {
    let harness = Harness::new();
    harness
        .store
        .fail_with(FailurePlan::batch_insert(BatchInsertFailure::Reject).and_delete_pattern())
        .await;

    let err = harness
        .controller
        .create_pattern(draft("weekly"), metadata())
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::CleanupFailed);
    assert!(err.to_string().contains("manual reconciliation required"));
    assert_eq!(harness.store.pattern_count().await, 1);
}

#[tokio::test]
async fn transactional_store_rolls_back_as_a_unit() {
    let harness = Harness::with_store(InMemoryScheduleStore::transactional());
    harness
        .store
        .fail_with(FailurePlan::batch_insert(BatchInsertFailure::Reject))
        .await;

    let err = harness
        .controller
        .create_pattern(draft("weekly"), metadata())
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::StorageError);
    assert_eq!(harness.store.pattern_count().await, 0);

    harness.store.heal().await;
    let created = harness
        .controller
        .create_pattern(draft("weekly"), metadata())
        .await
        .unwrap();
    assert_eq!(created.occurrences_created, 4);
}

// =============================================================================
// Pause / Resume / Delete
// =============================================================================

#[tokio::test]
async fn pause_cancels_today_and_later_only() {
    let harness = Harness::new();
    let id = pattern_with_history(&harness).await;

    let paused = harness
        .controller
        .pause_pattern(id, metadata())
        .await
        .unwrap();

    assert_eq!(paused.occurrences_cancelled, 2);
    let statuses: Vec<_> = harness
        .store
        .occurrences_for_pattern(&id)
        .await
        .iter()
        .map(|o| (o.date(), o.status()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (today() - Duration::days(1), OccurrenceStatus::Completed),
            (today(), OccurrenceStatus::Cancelled),
            (today() + Duration::days(1), OccurrenceStatus::Cancelled),
        ]
    );
    assert_eq!(
        harness.store.pattern(&id).await.unwrap().status(),
        PatternStatus::Paused
    );
}

#[tokio::test]
async fn resume_does_not_regenerate_cancelled_sessions() {
    let harness = Harness::new();
    let id = pattern_with_history(&harness).await;
    harness.controller.pause_pattern(id, metadata()).await.unwrap();

    harness
        .controller
        .resume_pattern(id, metadata())
        .await
        .unwrap();

    let occurrences = harness.store.occurrences_for_pattern(&id).await;
    assert_eq!(occurrences.len(), 3);
    assert_eq!(
        occurrences
            .iter()
            .filter(|o| o.status() == OccurrenceStatus::Cancelled)
            .count(),
        2
    );
    assert_eq!(
        harness.store.pattern(&id).await.unwrap().status(),
        PatternStatus::Active
    );
}

#[tokio::test]
async fn delete_removes_upcoming_and_keeps_history() {
    let harness = Harness::new();
    let id = pattern_with_history(&harness).await;

    let deleted = harness
        .controller
        .delete_pattern(id, metadata())
        .await
        .unwrap();

    assert_eq!(deleted.occurrences_deleted, 2);
    assert!(harness.store.pattern(&id).await.is_none());

    let remaining = harness.store.occurrences_for_pattern(&id).await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].date(), today() - Duration::days(1));
    assert_eq!(remaining[0].status(), OccurrenceStatus::Completed);
}

#[tokio::test]
async fn deleted_pattern_rejects_further_operations() {
    let harness = Harness::new();
    let id = pattern_with_history(&harness).await;
    harness.controller.delete_pattern(id, metadata()).await.unwrap();

    for err in [
        harness.controller.pause_pattern(id, metadata()).await.unwrap_err(),
        harness.controller.resume_pattern(id, metadata()).await.unwrap_err(),
    ] {
        assert_eq!(err, RecurrenceError::NotFound(id));
    }
    let err = harness
        .controller
        .delete_pattern(id, metadata())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PatternNotFound);
}

#[tokio::test]
async fn interrupted_pause_reports_progress_and_can_be_retried() {
    let harness = Harness::new();
    let id = pattern_with_history(&harness).await;
    harness.store.fail_with(FailurePlan::cascade_after(1)).await;

    let err = harness
        .controller
        .pause_pattern(id, metadata())
        .await
        .unwrap_err();

    assert_eq!(err.processed(), Some(1));
    assert_eq!(
        harness.store.pattern(&id).await.unwrap().status(),
        PatternStatus::Active
    );

    harness.store.heal().await;
    let paused = harness
        .controller
        .pause_pattern(id, metadata())
        .await
        .unwrap();
    assert_eq!(paused.occurrences_cancelled, 1);

    let lifecycle: Vec<_> = harness
        .bus
        .published_events()
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(lifecycle, vec!["pattern.created.v1", "pattern.paused.v1"]);
}
