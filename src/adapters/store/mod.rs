//! Schedule store adapters.

mod in_memory;

pub use in_memory::{BatchInsertFailure, FailurePlan, InMemoryScheduleStore};
