pub mod config;
pub mod plan;
pub mod run;

use clap::Args;
use intervalroom_core::{Config, RawWorkoutInput, WorkoutConfig};

/// Per-invocation overrides for the configured workout.
///
/// Values are taken as typed and clamped the same way form input is:
/// garbage counts as 0, work is floored to 5 s, rounds land in 1..=20.
#[derive(Args, Debug, Default, Clone)]
pub struct WorkoutArgs {
    /// Warm-up seconds
    #[arg(long, allow_hyphen_values = true)]
    pub warmup: Option<String>,
    /// Work seconds per round
    #[arg(long, allow_hyphen_values = true)]
    pub work: Option<String>,
    /// Rest seconds between rounds
    #[arg(long, allow_hyphen_values = true)]
    pub rest: Option<String>,
    /// Number of rounds
    #[arg(long, allow_hyphen_values = true)]
    pub intervals: Option<String>,
}

impl WorkoutArgs {
    pub fn resolve(&self, config: &Config) -> WorkoutConfig {
        let base = RawWorkoutInput::from(config.workout());
        let raw = RawWorkoutInput {
            warmup: self.warmup.clone().unwrap_or(base.warmup),
            work: self.work.clone().unwrap_or(base.work),
            rest: self.rest.clone().unwrap_or(base.rest),
            intervals: self.intervals.clone().unwrap_or(base.intervals),
        };
        WorkoutConfig::from_raw(&raw)
    }
}
