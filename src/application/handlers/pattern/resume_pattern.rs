//! ResumePatternHandler - Command handler for resuming paused patterns.
//!
//! Resuming only flips the pattern back to `Active`. Occurrences cancelled by
//! the earlier pause stay cancelled and no new ones are generated.

use std::sync::Arc;
use tracing::info;

use super::support::{load_pattern, publish_event};
use crate::domain::foundation::{CommandMetadata, EventId, PatternId};
use crate::domain::recurrence::{PatternResumed, PatternStatus, RecurrenceError, RecurrencePattern};
use crate::ports::{Clock, EventPublisher, ScheduleStore};

/// Command to resume a paused pattern.
#[derive(Debug, Clone)]
pub struct ResumePatternCommand {
    pub pattern_id: PatternId,
}

/// Result of successful resume.
#[derive(Debug, Clone)]
pub struct ResumePatternResult {
    pub pattern: RecurrencePattern,
    pub event: PatternResumed,
}

/// Handler for resuming patterns.
pub struct ResumePatternHandler {
    store: Arc<dyn ScheduleStore>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl ResumePatternHandler {
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
        cmd: ResumePatternCommand,
        metadata: CommandMetadata,
    ) -> Result<ResumePatternResult, RecurrenceError> {
        let correlation_id = metadata.correlation_id();
        tracing::Span::current().record("correlation_id", correlation_id.as_str());

        let mut pattern = load_pattern(self.store.as_ref(), &cmd.pattern_id).await?;
        pattern.resume()?;

        self.store
            .update_pattern_status(&cmd.pattern_id, PatternStatus::Active)
            .await?;

        let event = PatternResumed {
            event_id: EventId::new(),
            pattern_id: cmd.pattern_id,
            resumed_at: self.clock.now(),
        };
        publish_event(
            self.event_publisher.as_ref(),
            &event,
            &metadata,
            &correlation_id,
        )
        .await;

        info!("Pattern resumed");

        Ok(ResumePatternResult { pattern, event })
    }
}
