//! EventPublisher port - Interface for publishing domain events.
//!
//! This port defines how the domain publishes events without knowing
//! about the underlying transport mechanism.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (handlers may receive duplicates)
/// - Errors are propagated to the caller
///
/// # Example
///
/// ```ignore
/// let envelope = event.to_envelope()?.with_correlation_id(correlation_id);
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    ///
    /// The event is wrapped in an `EventEnvelope` containing:
    /// - Event ID for deduplication
    /// - Event type for routing
    /// - Aggregate context for correlation
    /// - Metadata for tracing
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_publisher_is_object_safe() {
        fn _accepts_dyn(_publisher: &dyn EventPublisher) {}
    }
}
