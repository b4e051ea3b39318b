//! RecurrencePattern aggregate and the draft it is created from.
//!
//! A pattern is the abstract rule a coach defines once ("Mondays and
//! Wednesdays at 18:00 for 45 minutes"). Its occurrences are separate records
//! that live independently once materialized.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Cadence, PatternStatus, RecurrenceKind};
use crate::domain::calendar::{self, DayOfWeek};
use crate::domain::foundation::{
    AthleteId, CoachId, DomainError, PatternId, StateMachine, Timestamp, ValidationError,
};

/// Maximum length for a pattern title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Longest session a pattern may describe, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 24 * 60;

/// Months covered when a pattern has no end date.
pub const DEFAULT_HORIZON_MONTHS: u32 = 6;

/// Caller-submitted pattern definition, not yet validated.
///
/// Mirrors what a scheduling form or API payload carries: the pattern type is
/// free text and per-type fields are optional until validation ties them to
/// the type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDraft {
    pub coach_id: String,
    pub athlete_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub week_days: Vec<DayOfWeek>,
    #[serde(default)]
    pub day_of_month: Option<u32>,
    pub time_of_day: NaiveTime,
    pub duration_minutes: i64,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// RecurrencePattern aggregate.
///
/// # Invariants
///
/// - `coach_id`, `athlete_id`, `cadence` never change after creation
/// - `title` is 1-200 characters, non-empty
/// - `duration_minutes` is 1-1440
/// - `end_date`, when present, is not before `start_date`
/// - `Deleted` is terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    id: PatternId,
    coach_id: CoachId,
    athlete_id: AthleteId,
    title: String,
    cadence: Cadence,
    time_of_day: NaiveTime,
    duration_minutes: u32,
    start_date: NaiveDate,
    /// Stored only when the coach gave one; the derived bound is recomputed.
    end_date: Option<NaiveDate>,
    status: PatternStatus,
    created_at: Timestamp,
}

impl RecurrencePattern {
    /// Validate a draft and build an active pattern from it.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for blank ids or title
    /// - `UnknownVariant` for an unrecognized pattern type
    /// - `MissingField` for weekly/biweekly without weekdays or monthly without a day
    /// - `OutOfRange` for day of month, duration, or title length
    /// - `InvalidDateRange` when the end date precedes the start date
    pub fn create(
        id: PatternId,
        draft: PatternDraft,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let coach_id = CoachId::new(draft.coach_id)?;
        let athlete_id = AthleteId::new(draft.athlete_id)?;
        let title = Self::validate_title(draft.title)?;
        let kind: RecurrenceKind = draft.kind.parse()?;
        let cadence = Cadence::from_parts(kind, &draft.week_days, draft.day_of_month)?;
        let duration_minutes = Self::validate_duration(draft.duration_minutes)?;

        if let Some(end) = draft.end_date {
            if end < draft.start_date {
                return Err(ValidationError::InvalidDateRange {
                    start: draft.start_date,
                    end,
                });
            }
        }

        Ok(Self {
            id,
            coach_id,
            athlete_id,
            title,
            cadence,
            time_of_day: draft.time_of_day,
            duration_minutes,
            start_date: draft.start_date,
            end_date: draft.end_date,
            status: PatternStatus::Active,
            created_at,
        })
    }

    /// Replace the lifecycle status when rehydrating from a store.
    pub fn with_status(mut self, status: PatternStatus) -> Self {
        self.status = status;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PatternId {
        &self.id
    }

    pub fn coach_id(&self) -> &CoachId {
        &self.coach_id
    }

    pub fn athlete_id(&self) -> &AthleteId {
        &self.athlete_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn time_of_day(&self) -> NaiveTime {
        self.time_of_day
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The literal end date, if the coach supplied one.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn status(&self) -> PatternStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Last date generation may reach.
    ///
    /// The literal end date when present, otherwise `start_date` plus
    /// `horizon_months`. Re-deriving from an absent end date always gives the
    /// same bound for the same horizon.
    pub fn end_bound(&self, horizon_months: u32) -> Result<NaiveDate, ValidationError> {
        if let Some(end) = self.end_date {
            return Ok(end);
        }
        let months = i32::try_from(horizon_months).map_err(|_| {
            ValidationError::out_of_range(
                "horizon_months",
                1,
                i64::from(i32::MAX),
                i64::from(horizon_months),
            )
        })?;
        calendar::add_months(self.start_date, months).ok_or_else(|| {
            ValidationError::invalid_format("start_date", "derived end date is out of range")
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// - `InvalidStateTransition` unless currently `Active`
    pub fn pause(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(PatternStatus::Paused)?;
        Ok(())
    }

    /// # Errors
    ///
    /// - `InvalidStateTransition` unless currently `Paused`
    pub fn resume(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(PatternStatus::Active)?;
        Ok(())
    }

    /// # Errors
    ///
    /// - `InvalidStateTransition` if already deleted
    pub fn mark_deleted(&mut self) -> Result<(), DomainError> {
        self.status = self.status.transition_to(PatternStatus::Deleted)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_title(title: String) -> Result<String, ValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let length = trimmed.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE_LENGTH as i64,
                length as i64,
            ));
        }
        Ok(trimmed.to_string())
    }

    fn validate_duration(minutes: i64) -> Result<u32, ValidationError> {
        if !(1..=MAX_DURATION_MINUTES).contains(&minutes) {
            return Err(ValidationError::out_of_range(
                "duration_minutes",
                1,
                MAX_DURATION_MINUTES,
                minutes,
            ));
        }
        u32::try_from(minutes).map_err(|_| {
            ValidationError::out_of_range("duration_minutes", 1, MAX_DURATION_MINUTES, minutes)
        })
    }
}
