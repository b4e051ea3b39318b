//! Clock port - source of "now" and "today".
//!
//! Cascade scopes are relative to today, so handlers take the date from here
//! instead of reading the system clock directly.

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Calendar date of `now()` in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
