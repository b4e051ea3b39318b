//! Occurrence generator - expands a cadence into concrete dates.
//!
//! Pure and deterministic: the same cadence and bounds always produce the
//! same ascending, duplicate-free list. Output never exceeds the generator's
//! cap; hitting the cap before the bound is reported, not treated as failure.

use chrono::{Datelike, NaiveDate};

use super::{Cadence, DayOfMonth, WeekDays};
use crate::domain::calendar;

/// Hard ceiling on dates produced by a single expansion.
pub const SAFETY_CAP: usize = 365;

/// Result of expanding a cadence over a date window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    dates: Vec<NaiveDate>,
    truncated: bool,
}

impl Expansion {
    /// Generated dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn into_dates(self) -> Vec<NaiveDate> {
        self.dates
    }

    /// True when the cap stopped generation before the window was exhausted.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Expands cadences into bounded date sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurrenceGenerator {
    cap: usize,
}

impl OccurrenceGenerator {
    /// Generator with the standard [`SAFETY_CAP`].
    pub fn new() -> Self {
        Self { cap: SAFETY_CAP }
    }

    /// Generator with a different ceiling, for exercising truncation cheaply.
    pub fn with_cap(cap: usize) -> Self {
        Self { cap }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Expand `cadence` over `[bound_start, bound_end]`, both inclusive.
    ///
    /// An inverted window yields an empty expansion.
    pub fn generate(
        &self,
        cadence: &Cadence,
        bound_start: NaiveDate,
        bound_end: NaiveDate,
    ) -> Expansion {
        let mut sink = Sink::new(self.cap);
        if bound_end >= bound_start {
            match cadence {
                Cadence::Daily => expand_daily(&mut sink, bound_start, bound_end),
                Cadence::Weekly { week_days } => {
                    expand_weekly(&mut sink, week_days, 1, bound_start, bound_end)
                }
                Cadence::Biweekly { week_days } => {
                    expand_weekly(&mut sink, week_days, 2, bound_start, bound_end)
                }
                Cadence::Monthly { day_of_month } => {
                    expand_monthly(&mut sink, *day_of_month, bound_start, bound_end)
                }
            }
        }
        sink.finish()
    }
}

impl Default for OccurrenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects dates up to the cap and remembers whether any were refused.
struct Sink {
    dates: Vec<NaiveDate>,
    cap: usize,
    truncated: bool,
}

impl Sink {
    fn new(cap: usize) -> Self {
        Self {
            dates: Vec::new(),
            cap,
            truncated: false,
        }
    }

    /// Returns false once the cap is reached; the caller must stop.
    fn push(&mut self, date: NaiveDate) -> bool {
        if self.dates.len() >= self.cap {
            self.truncated = true;
            return false;
        }
        self.dates.push(date);
        true
    }

    fn finish(self) -> Expansion {
        Expansion {
            dates: self.dates,
            truncated: self.truncated,
        }
    }
}

fn expand_daily(sink: &mut Sink, start: NaiveDate, end: NaiveDate) {
    let mut cursor = start;
    while cursor <= end {
        if !sink.push(cursor) {
            return;
        }
        match calendar::add_days(cursor, 1) {
            Some(next) => cursor = next,
            None => return,
        }
    }
}

/// Each pass covers the seven days starting at the cursor, then jumps
/// `step_weeks` ahead, so passes never overlap.
fn expand_weekly(
    sink: &mut Sink,
    week_days: &WeekDays,
    step_weeks: i64,
    start: NaiveDate,
    end: NaiveDate,
) {
    let mut cursor = start;
    while cursor <= end {
        let mut pass: Vec<NaiveDate> = week_days
            .iter()
            .filter_map(|day| calendar::next_occurrence_of_weekday(cursor, day))
            .filter(|date| *date <= end)
            .collect();
        pass.sort();

        for date in pass {
            if !sink.push(date) {
                return;
            }
        }

        match calendar::add_weeks(cursor, step_weeks) {
            Some(next) => cursor = next,
            None => return,
        }
    }
}

/// Months lacking the requested day (31 in April, 30 in February) are skipped.
fn expand_monthly(sink: &mut Sink, day_of_month: DayOfMonth, start: NaiveDate, end: NaiveDate) {
    let mut cursor = calendar::first_of_month(start);
    while cursor <= end {
        let candidate = NaiveDate::from_ymd_opt(cursor.year(), cursor.month(), day_of_month.get());
        if let Some(date) = candidate {
            if date >= start && date <= end && !sink.push(date) {
                return;
            }
        }
        match calendar::add_months(cursor, 1) {
            Some(next) => cursor = next,
            None => return,
        }
    }
}
