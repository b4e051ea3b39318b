//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ScheduleStore` - Pattern and occurrence persistence
//! - `EventPublisher` - Port for publishing domain events
//! - `Clock` - Current time and date

mod clock;
mod event_publisher;
mod schedule_store;

pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use schedule_store::{OccurrenceFilter, ScheduleStore, StoreCapabilities, StoreError};
