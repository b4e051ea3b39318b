//! Recurrence module - Pattern aggregate and date expansion.
//!
//! # Module Structure
//!
//! - `cadence` - Validated recurrence rule (daily, weekly, biweekly, monthly)
//! - `status` - Pattern lifecycle status
//! - `pattern` - `RecurrencePattern` aggregate and `PatternDraft` input
//! - `generator` - Expands a cadence into concrete dates
//! - `errors` - Errors surfaced by lifecycle operations
//! - `events` - Lifecycle domain events

mod cadence;
mod errors;
mod events;
mod generator;
mod pattern;
mod status;

pub use cadence::{Cadence, DayOfMonth, RecurrenceKind, WeekDays};
pub use errors::RecurrenceError;
pub use events::{PatternCreated, PatternDeleted, PatternPaused, PatternResumed};
pub use generator::{Expansion, OccurrenceGenerator, SAFETY_CAP};
pub use pattern::{
    PatternDraft, RecurrencePattern, DEFAULT_HORIZON_MONTHS, MAX_DURATION_MINUTES,
    MAX_TITLE_LENGTH,
};
pub use status::PatternStatus;
#[cfg(test)]
pub(crate) use pattern::fixtures;
