//! Event infrastructure for domain event publishing.
//!
//! - `EventId` - Unique identifier for events (deduplication)
//! - `EventMetadata` - Tracing and correlation context
//! - `EventEnvelope` - Transport wrapper for domain events
//! - `DomainEvent` - Trait that all domain events implement
//! - `domain_event!` - Macro to simplify DomainEvent implementations

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Trait that all domain events must implement.
pub trait DomainEvent: Send + Sync {
    /// Returns the event type string (e.g., "pattern.created.v1").
    fn event_type(&self) -> &'static str;

    /// Returns the ID of the aggregate that emitted this event.
    fn aggregate_id(&self) -> String;

    /// Returns the type of aggregate (e.g., "RecurrencePattern").
    fn aggregate_type(&self) -> &'static str;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> Timestamp;

    /// Returns the unique ID for this event instance.
    fn event_id(&self) -> EventId;
}

/// Extension trait that provides `to_envelope()` for serializable domain events.
///
/// Blanket-implemented for every `DomainEvent + Serialize`.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    /// Converts this domain event into an `EventEnvelope` for transport.
    fn to_envelope(&self) -> Result<EventEnvelope, serde_json::Error> {
        let event_type = self.event_type().to_string();
        let schema_version = EventEnvelope::extract_version(&event_type);

        Ok(EventEnvelope {
            event_id: self.event_id(),
            event_type,
            schema_version,
            aggregate_id: self.aggregate_id(),
            aggregate_type: self.aggregate_type().to_string(),
            occurred_at: self.occurred_at(),
            payload: serde_json::to_value(self)?,
            metadata: EventMetadata::default(),
        })
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Macro to implement DomainEvent trait with minimal boilerplate.
///
/// ```ignore
/// domain_event!(
///     PatternPaused,
///     event_type = "pattern.paused.v1",
///     aggregate_id = pattern_id,
///     aggregate_type = "RecurrencePattern",
///     occurred_at = paused_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        event_type = $event_type:expr,
        aggregate_id = $agg_id_field:ident,
        aggregate_type = $agg_type:expr,
        occurred_at = $occurred_field:ident,
        event_id = $event_id_field:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                $agg_type
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id_field.clone()
            }
        }
    };
}

pub use domain_event;

/// Unique identifier for events (used for deduplication).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new random EventId using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata for tracing and correlation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// ID linking related events across a single caller request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    /// Coach who initiated the action that led to this event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,

    /// Where the triggering command came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Transport envelope for domain events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique ID for this event instance.
    pub event_id: EventId,

    /// Event type for routing (e.g., "pattern.created.v1").
    pub event_type: String,

    /// Schema version number (extracted from event_type).
    pub schema_version: u32,

    /// ID of the aggregate that emitted this event.
    pub aggregate_id: String,

    /// Type of aggregate.
    pub aggregate_type: String,

    /// When the event occurred.
    pub occurred_at: Timestamp,

    /// Event-specific payload as JSON.
    pub payload: JsonValue,

    /// Tracing and correlation metadata.
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Extracts version number from event_type string ("pattern.paused.v2" → 2).
    ///
    /// Defaults to 1 when no suffix is present.
    pub(crate) fn extract_version(event_type: &str) -> u32 {
        event_type
            .rsplit_once(".v")
            .and_then(|(_, version_str)| version_str.parse::<u32>().ok())
            .unwrap_or(1)
    }

    /// Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(id.into());
        self
    }

    /// Add the acting coach for audit.
    pub fn with_actor_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.actor_id = Some(id.into());
        self
    }

    /// Add the command source.
    pub fn with_source(mut self, source: Option<&str>) -> Self {
        self.metadata.source = source.map(str::to_string);
        self
    }

    /// Deserialize payload to a specific event type.
    pub fn payload_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}
