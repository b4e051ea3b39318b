//! Calendar module - pure date and clock-time helpers.
//!
//! No I/O and no notion of "now"; callers pass every date explicitly.

mod day_of_week;
pub mod math;

pub use day_of_week::DayOfWeek;
pub use math::{
    add_days, add_minutes_with_rollover, add_months, add_weeks, crosses_midnight,
    first_of_month, next_occurrence_of_weekday,
};
