//! OccurrenceStatus enum for tracking a single scheduled session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Status of one concrete session.
///
/// Pattern cascades only ever move `Scheduled` to `Cancelled`; the other
/// transitions belong to flows outside the recurrence engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl OccurrenceStatus {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, OccurrenceStatus::Scheduled)
    }
}

impl StateMachine for OccurrenceStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use OccurrenceStatus::*;
        matches!(
            (self, target),
            (Scheduled, Confirmed)
                | (Scheduled, Completed)
                | (Scheduled, Cancelled)
                | (Scheduled, NoShow)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, NoShow)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OccurrenceStatus::*;
        match self {
            Scheduled => vec![Confirmed, Completed, Cancelled, NoShow],
            Confirmed => vec![Completed, Cancelled, NoShow],
            Completed | Cancelled | NoShow => vec![],
        }
    }
}

impl fmt::Display for OccurrenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OccurrenceStatus::Scheduled => "Scheduled",
            OccurrenceStatus::Confirmed => "Confirmed",
            OccurrenceStatus::Completed => "Completed",
            OccurrenceStatus::Cancelled => "Cancelled",
            OccurrenceStatus::NoShow => "NoShow",
        };
        write!(f, "{}", s)
    }
}
