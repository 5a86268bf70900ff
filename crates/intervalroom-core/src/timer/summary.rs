//! Aggregate display facts derived from engine state.

use serde::Serialize;

use super::engine::{TimerEngine, TimerStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// 0.0 ..= 100.0 progress within the current phase.
    pub elapsed_percent_in_phase: f64,
    pub total_workout_secs: u64,
    pub remaining_workout_secs: u64,
    pub work_label: String,
    pub rest_label: String,
}

/// Project a summary from the engine. Pure; safe to call every tick.
pub fn project(engine: &TimerEngine) -> Summary {
    let schedule = engine.schedule();
    let total = schedule.total_secs();

    let elapsed_percent_in_phase = match engine.current_phase() {
        Some(phase) if phase.duration_secs > 0 => {
            let duration = phase.duration_secs as f64;
            let elapsed = duration - engine.remaining_secs() as f64;
            (elapsed / duration * 100.0).clamp(0.0, 100.0)
        }
        _ => 100.0,
    };

    let remaining_workout_secs = match engine.status() {
        TimerStatus::Idle => total,
        TimerStatus::Completed => 0,
        TimerStatus::Running | TimerStatus::Paused => {
            engine.remaining_secs() + schedule.secs_after(engine.current_index())
        }
    };

    Summary {
        elapsed_percent_in_phase,
        total_workout_secs: total,
        remaining_workout_secs,
        work_label: format!("Work {}/{}", engine.completed_work(), schedule.work_count()),
        rest_label: format!("Rest {}/{}", engine.completed_rest(), schedule.rest_count()),
    }
}
