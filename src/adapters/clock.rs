//! Clock adapters.

use chrono::{NaiveDate, NaiveTime};
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Pinned to midday UTC of `date`.
    pub fn on(date: NaiveDate) -> Self {
        let midday = date.and_time(NaiveTime::MIN) + chrono::Duration::hours(12);
        Self::new(Timestamp::from_datetime(midday.and_utc()))
    }

    pub fn set(&self, now: Timestamp) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}
