//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and event plumbing
//! that form the vocabulary of the scheduling domain.

mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{AthleteId, CoachId, OccurrenceId, PatternId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
