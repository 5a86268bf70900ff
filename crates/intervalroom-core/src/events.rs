use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::timer::{PhaseKind, TimerStatus};

/// Every state change in the engine produces an Event.
/// The session feeds them to the cue dispatcher; the CLI can print them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PhaseStarted {
        index: usize,
        kind: PhaseKind,
        label: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    SecondElapsed {
        index: usize,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        index: usize,
        kind: PhaseKind,
        at: DateTime<Utc>,
    },
    /// The last work block of the schedule just finished.
    FinalWorkCompleted {
        index: usize,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    Paused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Resumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    Reset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        status: TimerStatus,
        index: usize,
        label: String,
        remaining_secs: u64,
        completed_work: usize,
        completed_rest: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Event::PhaseStarted { .. } => "phase_started",
            Event::SecondElapsed { .. } => "second_elapsed",
            Event::PhaseCompleted { .. } => "phase_completed",
            Event::FinalWorkCompleted { .. } => "final_work_completed",
            Event::SessionCompleted { .. } => "session_completed",
            Event::Paused { .. } => "paused",
            Event::Resumed { .. } => "resumed",
            Event::Reset { .. } => "reset",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }
}
