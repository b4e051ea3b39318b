//! PausePatternHandler - Command handler for pausing patterns.

use std::sync::Arc;
use tracing::info;

use super::support::{failed_after_cascade, load_pattern, publish_event};
use crate::domain::foundation::{CommandMetadata, EventId, PatternId};
use crate::domain::occurrence::OccurrenceStatus;
use crate::domain::recurrence::{PatternPaused, PatternStatus, RecurrenceError, RecurrencePattern};
use crate::ports::{Clock, EventPublisher, OccurrenceFilter, ScheduleStore};

/// Command to pause a pattern.
#[derive(Debug, Clone)]
pub struct PausePatternCommand {
    pub pattern_id: PatternId,
}

/// Result of successful pause.
#[derive(Debug, Clone)]
pub struct PausePatternResult {
    pub pattern: RecurrencePattern,
    pub occurrences_cancelled: usize,
    pub event: PatternPaused,
}

/// Handler for pausing patterns.
///
/// Cancels the pattern's `Scheduled` occurrences dated today or later, then
/// records the `Paused` status. An interrupted cascade leaves the pattern
/// `Active`, so the pause can be issued again. A failed status write reports
/// the sessions already cancelled in `processed`.
pub struct PausePatternHandler {
    store: Arc<dyn ScheduleStore>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl PausePatternHandler {
    pub fn new(
        store: Arc<dyn ScheduleStore>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            event_publisher,
            clock,
        }
    }

    #[tracing::instrument(
        skip_all,
        fields(pattern_id = %cmd.pattern_id, correlation_id = tracing::field::Empty)
    )]
    pub async fn handle(
        &self,
        cmd: PausePatternCommand,
        metadata: CommandMetadata,
    ) -> Result<PausePatternResult, RecurrenceError> {
        let correlation_id = metadata.correlation_id();
        tracing::Span::current().record("correlation_id", correlation_id.as_str());

        // 1. Load and transition
        let mut pattern = load_pattern(self.store.as_ref(), &cmd.pattern_id).await?;
        pattern.pause()?;

        // 2. Cascade to upcoming scheduled occurrences
        let filter = OccurrenceFilter::upcoming_scheduled(self.clock.today());
        let occurrences_cancelled = self
            .store
            .update_occurrences_status(&cmd.pattern_id, &filter, OccurrenceStatus::Cancelled)
            .await?;

        // 3. Persist status
        self.store
            .update_pattern_status(&cmd.pattern_id, PatternStatus::Paused)
            .await
            .map_err(|err| failed_after_cascade(err, occurrences_cancelled))?;

        // 4. Publish event
        let event = PatternPaused {
            event_id: EventId::new(),
            pattern_id: cmd.pattern_id,
            occurrences_cancelled,
            paused_at: self.clock.now(),
        };
        publish_event(
            self.event_publisher.as_ref(),
            &event,
            &metadata,
            &correlation_id,
        )
        .await;

        info!(occurrences_cancelled, "Pattern paused");

        Ok(PausePatternResult {
            pattern,
            occurrences_cancelled,
            event,
        })
    }
}
