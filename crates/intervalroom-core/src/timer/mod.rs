mod cue;
mod engine;
mod schedule;
mod summary;
mod workout;

pub use cue::{Cue, CueDispatcher, CueRequest, COUNTDOWN_FROM_SECS, FANFARE_BEEPS, FANFARE_SPACING};
pub use engine::{TimerEngine, TimerStatus};
pub use schedule::{Phase, PhaseKind, Schedule};
pub use summary::{project, Summary};
pub use workout::{
    to_seconds, RawWorkoutInput, WorkoutConfig, MAX_INTERVALS, MIN_INTERVALS, MIN_WORK_SECS,
};
