//! Turns generated dates into occurrence records for a pattern.

use chrono::NaiveDate;

use super::{Occurrence, SessionSlot};
use crate::domain::recurrence::RecurrencePattern;

/// Pure transformation from dates to `Scheduled` occurrences.
///
/// Persistence happens elsewhere, in one batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct OccurrenceMaterializer;

impl OccurrenceMaterializer {
    pub fn new() -> Self {
        Self
    }

    /// One occurrence per date, in the order given.
    pub fn materialize(&self, pattern: &RecurrencePattern, dates: &[NaiveDate]) -> Vec<Occurrence> {
        dates
            .iter()
            .map(|&date| {
                Occurrence::for_pattern(
                    *pattern.id(),
                    SessionSlot {
                        coach_id: pattern.coach_id().clone(),
                        athlete_id: pattern.athlete_id().clone(),
                        title: pattern.title().to_string(),
                        date,
                        start_time: pattern.time_of_day(),
                        duration_minutes: pattern.duration_minutes(),
                    },
                )
            })
            .collect()
    }
}
