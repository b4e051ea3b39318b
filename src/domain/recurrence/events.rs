//! Recurrence pattern domain events.
//!
//! Published after each lifecycle operation has finished its store work.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, AthleteId, CoachId, EventId, PatternId, Timestamp,
};

use super::RecurrenceKind;

/// Published when a pattern and its occurrences have been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCreated {
    pub event_id: EventId,
    pub pattern_id: PatternId,
    pub coach_id: CoachId,
    pub athlete_id: AthleteId,
    pub title: String,
    pub kind: RecurrenceKind,
    pub occurrences_created: usize,
    pub truncated: bool,
    pub created_at: Timestamp,
}

domain_event!(
    PatternCreated,
    event_type = "pattern.created.v1",
    aggregate_id = pattern_id,
    aggregate_type = "RecurrencePattern",
    occurred_at = created_at,
    event_id = event_id
);

/// Published when a pattern is paused and its upcoming sessions cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternPaused {
    pub event_id: EventId,
    pub pattern_id: PatternId,
    pub occurrences_cancelled: usize,
    pub paused_at: Timestamp,
}

domain_event!(
    PatternPaused,
    event_type = "pattern.paused.v1",
    aggregate_id = pattern_id,
    aggregate_type = "RecurrencePattern",
    occurred_at = paused_at,
    event_id = event_id
);

/// Published when a paused pattern becomes active again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternResumed {
    pub event_id: EventId,
    pub pattern_id: PatternId,
    pub resumed_at: Timestamp,
}

domain_event!(
    PatternResumed,
    event_type = "pattern.resumed.v1",
    aggregate_id = pattern_id,
    aggregate_type = "RecurrencePattern",
    occurred_at = resumed_at,
    event_id = event_id
);

/// Published when a pattern and its upcoming sessions are removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDeleted {
    pub event_id: EventId,
    pub pattern_id: PatternId,
    pub occurrences_deleted: usize,
    pub deleted_at: Timestamp,
}

domain_event!(
    PatternDeleted,
    event_type = "pattern.deleted.v1",
    aggregate_id = pattern_id,
    aggregate_type = "RecurrencePattern",
    occurred_at = deleted_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    #[test]
    fn paused_event_envelope_routes_by_pattern() {
        let pattern_id = PatternId::new();
        let event = PatternPaused {
            event_id: EventId::new(),
            pattern_id,
            occurrences_cancelled: 3,
            paused_at: Timestamp::now(),
        };

        let envelope = event.to_envelope().unwrap();
        assert_eq!(envelope.event_type, "pattern.paused.v1");
        assert_eq!(envelope.aggregate_type, "RecurrencePattern");
        assert_eq!(envelope.aggregate_id, pattern_id.to_string());
        assert_eq!(envelope.payload["occurrences_cancelled"], 3);
    }

    #[test]
    fn created_event_payload_round_trips() {
        let event = PatternCreated {
            event_id: EventId::new(),
            pattern_id: PatternId::new(),
            coach_id: CoachId::new("coach-1").unwrap(),
            athlete_id: AthleteId::new("athlete-1").unwrap(),
            title: "Mobility".to_string(),
            kind: RecurrenceKind::Daily,
            occurrences_created: 365,
            truncated: true,
            created_at: Timestamp::now(),
        };

        assert_eq!(event.event_type(), "pattern.created.v1");
        let decoded: PatternCreated = event.to_envelope().unwrap().payload_as().unwrap();
        assert_eq!(decoded, event);
    }
}
