//! CreatePatternHandler - Command handler for creating recurrence patterns.
//!
//! Validates the draft, expands it into dates, materializes occurrences and
//! persists pattern and occurrences as a unit. Stores without transactions
//! get a compensating delete when the occurrence insert fails.

use std::sync::Arc;
use tracing::{error, info, warn};

use super::support::publish_event;
use crate::domain::foundation::{
    CommandMetadata, EventId, PatternId, ValidationError,
};
use crate::domain::occurrence::{Occurrence, OccurrenceMaterializer};
use crate::domain::recurrence::{
    OccurrenceGenerator, PatternCreated, PatternDraft, RecurrenceError, RecurrencePattern,
};
use crate::ports::{Clock, EventPublisher, OccurrenceFilter, ScheduleStore, StoreError};

/// Command to create a pattern from a caller draft.
#[derive(Debug, Clone)]
pub struct CreatePatternCommand {
    pub draft: PatternDraft,
}

/// Result of successful pattern creation.
#[derive(Debug, Clone)]
pub struct CreatePatternResult {
    pub pattern: RecurrencePattern,
    pub occurrences_created: usize,
    /// Generation stopped at the safety cap before reaching the end bound.
    pub truncated: bool,
    pub event: PatternCreated,
}

/// Handler for creating patterns.
pub struct CreatePatternHandler {
    store: Arc<dyn ScheduleStore>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    generator: OccurrenceGenerator,
    materializer: OccurrenceMaterializer,
    horizon_months: u32,
}

impl CreatePatternHandler {
    pub fn new(
        store: Arc<dyn ScheduleStore>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        horizon_months: u32,
    ) -> Self {
        Self {
            store,
            event_publisher,
            clock,
            generator: OccurrenceGenerator::new(),
            materializer: OccurrenceMaterializer::new(),
            horizon_months,
        }
    }

    /// Replace the generator, e.g. to lower the safety cap.
    pub fn with_generator(mut self, generator: OccurrenceGenerator) -> Self {
        self.generator = generator;
        self
    }

    #[tracing::instrument(
        skip_all,
        fields(
            coach_id = %cmd.draft.coach_id,
            pattern_id = tracing::field::Empty,
            correlation_id = tracing::field::Empty,
        )
    )]
    pub async fn handle(
        &self,
        cmd: CreatePatternCommand,
        metadata: CommandMetadata,
    ) -> Result<CreatePatternResult, RecurrenceError> {
        let correlation_id = metadata.correlation_id();
        let span = tracing::Span::current();
        span.record("correlation_id", correlation_id.as_str());

        // 1. Validate
        let pattern = RecurrencePattern::create(PatternId::new(), cmd.draft, self.clock.now())?;
        span.record("pattern_id", tracing::field::display(pattern.id()));

        // 2. Generate
        let end = pattern.end_bound(self.horizon_months)?;
        let expansion = self
            .generator
            .generate(pattern.cadence(), pattern.start_date(), end);
        if expansion.is_empty() {
            return Err(ValidationError::invalid_format(
                "end_date",
                "date range produces no occurrences",
            )
            .into());
        }
        let truncated = expansion.truncated();
        if truncated {
            warn!(
                cap = self.generator.cap(),
                end_bound = %end,
                "Occurrence generation hit the safety cap"
            );
        }

        // 3. Materialize
        let occurrences = self.materializer.materialize(&pattern, expansion.dates());

        // 4. Persist
        let occurrences_created = if self.store.capabilities().supports_transactions() {
            self.store
                .insert_pattern_with_occurrences(&pattern, &occurrences)
                .await?
        } else {
            self.persist_with_compensation(&pattern, &occurrences).await?
        };

        // 5. Publish event
        let event = PatternCreated {
            event_id: EventId::new(),
            pattern_id: *pattern.id(),
            coach_id: pattern.coach_id().clone(),
            athlete_id: pattern.athlete_id().clone(),
            title: pattern.title().to_string(),
            kind: pattern.cadence().kind(),
            occurrences_created,
            truncated,
            created_at: *pattern.created_at(),
        };
        publish_event(
            self.event_publisher.as_ref(),
            &event,
            &metadata,
            &correlation_id,
        )
        .await;

        info!(occurrences_created, truncated, "Pattern created");

        Ok(CreatePatternResult {
            pattern,
            occurrences_created,
            truncated,
            event,
        })
    }

    /// Insert the pattern, then its occurrences; undo the pattern if the
    /// second step does not store every occurrence.
    async fn persist_with_compensation(
        &self,
        pattern: &RecurrencePattern,
        occurrences: &[Occurrence],
    ) -> Result<usize, RecurrenceError> {
        self.store.insert_pattern(pattern).await?;

        let cause = match self.store.batch_insert_occurrences(occurrences).await {
            Ok(count) if count == occurrences.len() => return Ok(count),
            Ok(count) => format!(
                "batch insert stored {} of {} occurrences",
                count,
                occurrences.len()
            ),
            Err(err) => err.to_string(),
        };

        warn!(%cause, "Occurrence insert failed, removing pattern");

        match self.compensate(pattern.id()).await {
            Ok(()) => Err(RecurrenceError::storage(cause)),
            Err(cleanup) => {
                error!(
                    %cause,
                    cleanup = %cleanup,
                    "Compensating cleanup failed, manual reconciliation required"
                );
                Err(RecurrenceError::CleanupFailed {
                    pattern_id: *pattern.id(),
                    cause,
                    cleanup: cleanup.to_string(),
                })
            }
        }
    }

    /// Remove any partially inserted occurrences, then the pattern.
    async fn compensate(&self, id: &PatternId) -> Result<(), StoreError> {
        self.store
            .delete_occurrences(id, &OccurrenceFilter::all())
            .await?;
        self.store.delete_pattern(id).await
    }
}
