//! DeletePatternHandler - Command handler for deleting patterns.
//!
//! Removes the pattern's `Scheduled` occurrences dated today or later, then the
//! pattern itself. Past and non-scheduled occurrences stay behind with a
//! dangling pattern id.

use std::sync::Arc;
use tracing::info;

use super::support::{failed_after_cascade, load_pattern, publish_event};
use crate::domain::foundation::{CommandMetadata, EventId, PatternId};
use crate::domain::recurrence::{PatternDeleted, RecurrenceError};
use crate::ports::{Clock, EventPublisher, OccurrenceFilter, ScheduleStore};

/// Command to delete a pattern.
#[derive(Debug, Clone)]
pub struct DeletePatternCommand {
    pub pattern_id: PatternId,
}

/// Result of successful deletion.
#[derive(Debug, Clone)]
pub struct DeletePatternResult {
    pub occurrences_deleted: usize,
    pub event: PatternDeleted,
}

/// Handler for deleting patterns.
pub struct DeletePatternHandler {
    store: Arc<dyn ScheduleStore>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl DeletePatternHandler {
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
        cmd: DeletePatternCommand,
        metadata: CommandMetadata,
    ) -> Result<DeletePatternResult, RecurrenceError> {
        let correlation_id = metadata.correlation_id();
        tracing::Span::current().record("correlation_id", correlation_id.as_str());

        // 1. Load and transition; a pattern already marked deleted is gone
        let mut pattern = load_pattern(self.store.as_ref(), &cmd.pattern_id).await?;
        pattern
            .mark_deleted()
            .map_err(|_| RecurrenceError::not_found(cmd.pattern_id))?;

        // 2. Cascade to upcoming scheduled occurrences
        let filter = OccurrenceFilter::upcoming_scheduled(self.clock.today());
        let occurrences_deleted = self
            .store
            .delete_occurrences(&cmd.pattern_id, &filter)
            .await?;

        // 3. Remove the pattern
        self.store
            .delete_pattern(&cmd.pattern_id)
            .await
            .map_err(|err| failed_after_cascade(err, occurrences_deleted))?;

        // 4. Publish event
        let event = PatternDeleted {
            event_id: EventId::new(),
            pattern_id: cmd.pattern_id,
            occurrences_deleted,
            deleted_at: self.clock.now(),
        };
        publish_event(
            self.event_publisher.as_ref(),
            &event,
            &metadata,
            &correlation_id,
        )
        .await;

        info!(occurrences_deleted, "Pattern deleted");

        Ok(DeletePatternResult {
            occurrences_deleted,
            event,
        })
    }
}
