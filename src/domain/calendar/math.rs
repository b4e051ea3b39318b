//! Pure calendar arithmetic used by the occurrence generator.
//!
//! Every helper is total over its inputs: arithmetic that would leave chrono's
//! representable range yields `None` instead of panicking.

use chrono::{Datelike, Days, Duration, NaiveDate, NaiveTime};

use super::DayOfWeek;

/// Returns the first date on or after `from` that falls on `target`.
///
/// `from` itself is returned when it already matches; callers advance their
/// cursor before asking again.
pub fn next_occurrence_of_weekday(from: NaiveDate, target: DayOfWeek) -> Option<NaiveDate> {
    let current = from.weekday().num_days_from_monday();
    let ahead = (target.num_days_from_monday() + 7 - current) % 7;
    add_days(from, i64::from(ahead))
}

/// Adds (or subtracts, for negative `n`) whole days.
pub fn add_days(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    }
}

/// Adds whole weeks.
pub fn add_weeks(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    add_days(date, n.checked_mul(7)?)
}

/// Adds calendar months without clamping the day of month.
///
/// A day that does not exist in the target month overflows into the next
/// one: Jan 31 + 1 month is Mar 3 in a common year.
pub fn add_months(date: NaiveDate, n: i32) -> Option<NaiveDate> {
    let total = date
        .year()
        .checked_mul(12)?
        .checked_add(date.month0() as i32)?
        .checked_add(n)?;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Adds minutes to a clock time, wrapping past 23:59 back to 00:00.
///
/// The date is not advanced; use [`crosses_midnight`] to detect the wrap.
pub fn add_minutes_with_rollover(time: NaiveTime, minutes: u32) -> NaiveTime {
    let (wrapped, _) = time.overflowing_add_signed(Duration::minutes(i64::from(minutes)));
    wrapped
}

/// True when adding `minutes` to `time` runs past midnight.
pub fn crosses_midnight(time: NaiveTime, minutes: u32) -> bool {
    let (_, overflow_secs) = time.overflowing_add_signed(Duration::minutes(i64::from(minutes)));
    overflow_secs != 0
}
