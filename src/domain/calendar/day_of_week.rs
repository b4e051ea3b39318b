//! Weekday tag used by weekly and biweekly patterns.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Day of the week, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(rename = "MON")]
    Monday,
    #[serde(rename = "TUE")]
    Tuesday,
    #[serde(rename = "WED")]
    Wednesday,
    #[serde(rename = "THU")]
    Thursday,
    #[serde(rename = "FRI")]
    Friday,
    #[serde(rename = "SAT")]
    Saturday,
    #[serde(rename = "SUN")]
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Days from Monday (Monday = 0, Sunday = 6).
    pub fn num_days_from_monday(self) -> u32 {
        self.to_chrono().num_days_from_monday()
    }

    pub fn to_chrono(self) -> Weekday {
        match self {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }

    /// Three-letter upper-case tag ("MON").
    pub fn tag(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MON",
            DayOfWeek::Tuesday => "TUE",
            DayOfWeek::Wednesday => "WED",
            DayOfWeek::Thursday => "THU",
            DayOfWeek::Friday => "FRI",
            DayOfWeek::Saturday => "SAT",
            DayOfWeek::Sunday => "SUN",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for DayOfWeek {
    type Err = ValidationError;

    /// Accepts tags ("MON") and full names ("monday"), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| {
                let tag = day.tag().to_ascii_lowercase();
                lowered == tag || lowered == format!("{:?}", day).to_ascii_lowercase()
            })
            .ok_or_else(|| ValidationError::unknown_variant("week_days", s))
    }
}
