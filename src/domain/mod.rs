//! Domain layer containing scheduling rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `calendar` - Pure date and clock arithmetic
//! - `recurrence` - Recurrence pattern aggregate and date expansion
//! - `occurrence` - Concrete sessions and their materialization

pub mod calendar;
pub mod foundation;
pub mod occurrence;
pub mod recurrence;
