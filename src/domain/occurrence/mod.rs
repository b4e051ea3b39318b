//! Occurrence module - Concrete sessions and their materialization.

mod materializer;
#[allow(clippy::module_inception)]
mod occurrence;
mod status;

pub use materializer::OccurrenceMaterializer;
pub use occurrence::{Occurrence, SessionSlot};
pub use status::OccurrenceStatus;
