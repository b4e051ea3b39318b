//! Adapters - Implementations of port interfaces.
//!
//! - `store` - Schedule store implementations (in-memory)
//! - `events` - Event bus implementations (in-memory)
//! - `clock` - System and fixed clocks

pub mod clock;
pub mod events;
pub mod store;

pub use clock::{FixedClock, SystemClock};
pub use events::InMemoryEventBus;
pub use store::{BatchInsertFailure, FailurePlan, InMemoryScheduleStore};
