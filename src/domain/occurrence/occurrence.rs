//! Occurrence - one concrete, independently tracked session.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::OccurrenceStatus;
use crate::domain::calendar;
use crate::domain::foundation::{
    AthleteId, CoachId, DomainError, OccurrenceId, PatternId, StateMachine,
};

/// A dated session, either materialized from a pattern or booked one-off.
///
/// Owner, subject and title are copied at creation and never re-synced with
/// the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    id: OccurrenceId,
    pattern_id: Option<PatternId>,
    coach_id: CoachId,
    athlete_id: AthleteId,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    title: String,
    status: OccurrenceStatus,
}

/// Fields shared by every way of creating an occurrence.
#[derive(Debug, Clone)]
pub struct SessionSlot {
    pub coach_id: CoachId,
    pub athlete_id: AthleteId,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
}

impl Occurrence {
    /// A `Scheduled` occurrence tagged with the pattern that produced it.
    pub fn for_pattern(pattern_id: PatternId, slot: SessionSlot) -> Self {
        Self::build(Some(pattern_id), slot)
    }

    /// A `Scheduled` occurrence with no owning pattern.
    pub fn one_off(slot: SessionSlot) -> Self {
        Self::build(None, slot)
    }

    fn build(pattern_id: Option<PatternId>, slot: SessionSlot) -> Self {
        let end_time = calendar::add_minutes_with_rollover(slot.start_time, slot.duration_minutes);
        Self {
            id: OccurrenceId::new(),
            pattern_id,
            coach_id: slot.coach_id,
            athlete_id: slot.athlete_id,
            date: slot.date,
            start_time: slot.start_time,
            end_time,
            title: slot.title,
            status: OccurrenceStatus::Scheduled,
        }
    }

    /// Replace the status when rehydrating from a store.
    pub fn with_status(mut self, status: OccurrenceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> &OccurrenceId {
        &self.id
    }

    pub fn pattern_id(&self) -> Option<&PatternId> {
        self.pattern_id.as_ref()
    }

    pub fn coach_id(&self) -> &CoachId {
        &self.coach_id
    }

    pub fn athlete_id(&self) -> &AthleteId {
        &self.athlete_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> OccurrenceStatus {
        self.status
    }

    /// True when the end clock time wrapped past midnight.
    ///
    /// The date is not advanced; the session still belongs to `date`.
    pub fn crosses_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Move to `target` if the status machine allows it.
    pub fn transition_to(&mut self, target: OccurrenceStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target)?;
        Ok(())
    }
}
