//! In-memory event bus implementation.
//!
//! Captures published events for assertions and can be switched into a
//! failing mode to exercise publish-failure handling.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

/// In-memory event bus.
///
/// Features:
/// - Synchronous capture (deterministic for tests)
/// - Event lookup by type and aggregate
/// - Optional failure injection
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
///
/// bus.publish(envelope).await?;
///
/// assert_eq!(bus.event_count(), 1);
/// assert!(bus.has_event("pattern.created.v1"));
/// ```
#[derive(Default)]
pub struct InMemoryEventBus {
    published: RwLock<Vec<EventEnvelope>>,
    failing: AtomicBool,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus whose `publish` always fails.
    pub fn failing() -> Self {
        Self {
            failing: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    // === Test Helpers ===

    /// Returns all published events.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    /// Clears all published events.
    pub fn clear(&self) {
        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Event bus unavailable, dropped {}", event.event_type),
            ));
        }

        self.published
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
        Ok(())
    }
}
