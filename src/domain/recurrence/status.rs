//! PatternStatus enum for tracking the lifecycle of recurrence patterns.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a recurrence pattern.
///
/// `Active` and `Paused` toggle freely; `Deleted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PatternStatus {
    #[default]
    Active,
    Paused,
    Deleted,
}

impl StateMachine for PatternStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PatternStatus::*;
        matches!(
            (self, target),
            (Active, Paused) | (Paused, Active) | (Active, Deleted) | (Paused, Deleted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PatternStatus::*;
        match self {
            Active => vec![Paused, Deleted],
            Paused => vec![Active, Deleted],
            Deleted => vec![],
        }
    }
}

impl fmt::Display for PatternStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PatternStatus::Active => "Active",
            PatternStatus::Paused => "Paused",
            PatternStatus::Deleted => "Deleted",
        };
        write!(f, "{}", s)
    }
}
