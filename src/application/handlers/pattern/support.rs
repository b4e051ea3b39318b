//! Helpers shared by the pattern handlers.

use tracing::warn;

use crate::domain::foundation::{CommandMetadata, PatternId, SerializableDomainEvent};
use crate::domain::recurrence::{RecurrenceError, RecurrencePattern};
use crate::ports::{EventPublisher, ScheduleStore, StoreError};

/// Load a stored pattern, whatever its status.
///
/// Stores that soft-delete keep returning `Deleted` patterns; the lifecycle
/// transitions reject those.
pub(super) async fn load_pattern(
    store: &dyn ScheduleStore,
    id: &PatternId,
) -> Result<RecurrencePattern, RecurrenceError> {
    store
        .find_pattern(id)
        .await?
        .ok_or_else(|| RecurrenceError::not_found(*id))
}

/// Store failure on the step following a committed cascade.
///
/// The cascade's count is carried in `processed`.
pub(super) fn failed_after_cascade(err: StoreError, processed: usize) -> RecurrenceError {
    warn!(processed, error = %err, "Store failed after cascade committed");
    RecurrenceError::Storage {
        message: err.to_string(),
        processed: Some(processed),
    }
}

/// Publish after the store work has committed.
///
/// Failures are logged; the operation they describe has already happened.
pub(super) async fn publish_event<E>(
    publisher: &dyn EventPublisher,
    event: &E,
    metadata: &CommandMetadata,
    correlation_id: &str,
) where
    E: SerializableDomainEvent + Sync,
{
    let envelope = match event.to_envelope() {
        Ok(envelope) => envelope
            .with_correlation_id(correlation_id)
            .with_actor_id(metadata.actor_id.to_string())
            .with_source(metadata.source()),
        Err(err) => {
            warn!(event_type = event.event_type(), error = %err, "Failed to serialize event");
            return;
        }
    };

    if let Err(err) = publisher.publish(envelope).await {
        warn!(event_type = event.event_type(), error = %err, "Failed to publish event");
    }
}
