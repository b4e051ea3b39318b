//! Command infrastructure for lifecycle handlers.
//!
//! `CommandMetadata` is the context that flows through command processing:
//! who is acting, which request this belongs to, and where it came from.
//! Handlers copy it onto emitted events and into their tracing spans.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CoachId;

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The coach executing this command (already authenticated upstream).
    pub actor_id: CoachId,

    /// Links related operations across a single caller request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Source of this command (e.g., "api", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for the acting coach.
    pub fn new(actor_id: CoachId) -> Self {
        Self {
            actor_id,
            correlation_id: None,
            source: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
