//! Cadence - the closed set of recurrence rules and their per-variant fields.
//!
//! Each variant carries exactly the fields it needs, already validated, so a
//! weekly cadence without weekdays or a monthly cadence without a day cannot
//! be represented.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::calendar::DayOfWeek;
use crate::domain::foundation::ValidationError;

/// Non-empty, ordered set of weekdays.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<DayOfWeek>", into = "Vec<DayOfWeek>")]
pub struct WeekDays(BTreeSet<DayOfWeek>);

impl WeekDays {
    /// Builds the set, collapsing duplicates.
    ///
    /// # Errors
    ///
    /// - `MissingField` if no weekday is given
    pub fn new(days: impl IntoIterator<Item = DayOfWeek>) -> Result<Self, ValidationError> {
        let set: BTreeSet<DayOfWeek> = days.into_iter().collect();
        if set.is_empty() {
            return Err(ValidationError::missing_field("week_days"));
        }
        Ok(Self(set))
    }

    /// Iterates Monday first.
    pub fn iter(&self) -> impl Iterator<Item = DayOfWeek> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<DayOfWeek>> for WeekDays {
    type Error = ValidationError;

    fn try_from(days: Vec<DayOfWeek>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<WeekDays> for Vec<DayOfWeek> {
    fn from(days: WeekDays) -> Self {
        days.0.into_iter().collect()
    }
}

/// Day of month in 1..=31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayOfMonth(u32);

impl DayOfMonth {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 31;

    /// # Errors
    ///
    /// - `OutOfRange` outside 1..=31
    pub fn new(day: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&day) {
            return Err(ValidationError::out_of_range(
                "day_of_month",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                i64::from(day),
            ));
        }
        Ok(Self(day))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for DayOfMonth {
    type Error = ValidationError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl From<DayOfMonth> for u32 {
    fn from(day: DayOfMonth) -> Self {
        day.0
    }
}

/// Recurrence rule of a pattern. Immutable once the pattern exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cadence {
    Daily,
    Weekly { week_days: WeekDays },
    Biweekly { week_days: WeekDays },
    Monthly { day_of_month: DayOfMonth },
}

impl Cadence {
    pub fn kind(&self) -> RecurrenceKind {
        match self {
            Cadence::Daily => RecurrenceKind::Daily,
            Cadence::Weekly { .. } => RecurrenceKind::Weekly,
            Cadence::Biweekly { .. } => RecurrenceKind::Biweekly,
            Cadence::Monthly { .. } => RecurrenceKind::Monthly,
        }
    }

    /// Assembles a cadence from loosely-typed draft fields.
    ///
    /// Fields the kind does not use are ignored.
    pub fn from_parts(
        kind: RecurrenceKind,
        week_days: &[DayOfWeek],
        day_of_month: Option<u32>,
    ) -> Result<Self, ValidationError> {
        match kind {
            RecurrenceKind::Daily => Ok(Cadence::Daily),
            RecurrenceKind::Weekly => Ok(Cadence::Weekly {
                week_days: WeekDays::new(week_days.iter().copied())?,
            }),
            RecurrenceKind::Biweekly => Ok(Cadence::Biweekly {
                week_days: WeekDays::new(week_days.iter().copied())?,
            }),
            RecurrenceKind::Monthly => {
                let day =
                    day_of_month.ok_or_else(|| ValidationError::missing_field("day_of_month"))?;
                Ok(Cadence::Monthly {
                    day_of_month: DayOfMonth::new(day)?,
                })
            }
        }
    }
}

/// Tag naming a cadence variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecurrenceKind::Daily => "daily",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Biweekly => "biweekly",
            RecurrenceKind::Monthly => "monthly",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RecurrenceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(RecurrenceKind::Daily),
            "weekly" => Ok(RecurrenceKind::Weekly),
            "biweekly" => Ok(RecurrenceKind::Biweekly),
            "monthly" => Ok(RecurrenceKind::Monthly),
            _ => Err(ValidationError::unknown_variant("type", s)),
        }
    }
}
