//! Renderer-facing projection of the engine.
//!
//! A [`DisplayFrame`] is everything a renderer needs to draw one state:
//! clock, progress, counters, and the schedule list with the active phase
//! highlighted. Frames are plain data so any frontend can consume them.

use serde::Serialize;

use crate::timer::{project, PhaseKind, TimerEngine, TimerStatus};

pub const STATUS_IDLE: &str = "Configure your flow and press start.";
pub const STATUS_RUNNING: &str = "In session, keep breathing!";
pub const STATUS_PAUSED: &str = "Paused, tap resume when you are ready.";
pub const STATUS_RESUMED: &str = "Back at it!";
pub const STATUS_COMPLETED: &str = "Nice! Session completed. Hit start for another round.";
pub const STATUS_EMPTY: &str = "Please set at least one active block.";

pub const WAITING_LABEL: &str = "Waiting";
pub const WAITING_DETAIL: &str = "Press start to build the flow.";

/// One row of the schedule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseLine {
    pub label: String,
    pub detail: String,
    /// `None` for the placeholder row.
    pub kind: Option<PhaseKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFrame {
    pub status: TimerStatus,
    pub phase_label: String,
    pub status_text: String,
    pub work_label: String,
    pub rest_label: String,
    pub remaining_formatted: String,
    pub percent: f64,
    pub total_workout_formatted: String,
    pub remaining_workout_formatted: String,
    pub schedule: Vec<PhaseLine>,
    pub highlight_index: Option<usize>,
}

impl DisplayFrame {
    pub fn build(engine: &TimerEngine, status_text: &str) -> Self {
        let summary = project(engine);
        let status = engine.status();

        let (phase_label, remaining, percent) = match status {
            TimerStatus::Idle => ("Ready".to_string(), engine.remaining_secs(), 0.0),
            TimerStatus::Completed => ("Completed".to_string(), 0, 100.0),
            TimerStatus::Running | TimerStatus::Paused => (
                engine
                    .current_phase()
                    .map(|p| p.label.clone())
                    .unwrap_or_else(|| WAITING_LABEL.to_string()),
                engine.remaining_secs(),
                summary.elapsed_percent_in_phase,
            ),
        };

        let highlight_index = match status {
            TimerStatus::Running | TimerStatus::Paused if !engine.schedule().is_empty() => {
                Some(engine.current_index())
            }
            _ => None,
        };

        Self {
            status,
            phase_label,
            status_text: status_text.to_string(),
            work_label: summary.work_label,
            rest_label: summary.rest_label,
            remaining_formatted: format_clock(remaining),
            percent,
            total_workout_formatted: format_clock(summary.total_workout_secs),
            remaining_workout_formatted: format_clock(summary.remaining_workout_secs),
            schedule: schedule_lines(engine),
            highlight_index,
        }
    }
}

/// `MM:SS`. Minutes are not wrapped at 60, so 3725 s reads `62:05`.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn schedule_lines(engine: &TimerEngine) -> Vec<PhaseLine> {
    let phases = engine.schedule().phases();
    if phases.is_empty() {
        return vec![PhaseLine {
            label: WAITING_LABEL.into(),
            detail: WAITING_DETAIL.into(),
            kind: None,
        }];
    }
    phases
        .iter()
        .map(|p| PhaseLine {
            label: p.label.clone(),
            detail: format!("{} s", p.duration_secs),
            kind: Some(p.kind),
        })
        .collect()
}
