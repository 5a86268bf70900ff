//! Workout configuration and the clamping rules applied at the input
//! boundary.
//!
//! Raw input arrives as strings (form fields, CLI flags). Nothing here ever
//! rejects a value: garbage becomes 0 and out-of-range numbers are pulled
//! back into range.

use serde::{Deserialize, Serialize};

/// Shortest work block accepted, in seconds.
pub const MIN_WORK_SECS: u64 = 5;
/// Fewest rounds in a workout.
pub const MIN_INTERVALS: u32 = 1;
/// Most rounds in a workout.
pub const MAX_INTERVALS: u32 = 20;

/// Durations and repeat count for one workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    pub warmup_secs: u64,
    pub work_secs: u64,
    pub rest_secs: u64,
    pub intervals: u32,
}

impl WorkoutConfig {
    /// Build a config, clamping every field into its valid range.
    pub fn new(warmup_secs: u64, work_secs: u64, rest_secs: u64, intervals: u32) -> Self {
        Self {
            warmup_secs,
            work_secs,
            rest_secs,
            intervals,
        }
        .clamped()
    }

    /// Parse and clamp raw input strings.
    pub fn from_raw(raw: &RawWorkoutInput) -> Self {
        let intervals = to_seconds(&raw.intervals).min(u64::from(MAX_INTERVALS)) as u32;
        Self::new(
            to_seconds(&raw.warmup),
            to_seconds(&raw.work),
            to_seconds(&raw.rest),
            intervals,
        )
    }

    /// Copy of `self` with work floored to [`MIN_WORK_SECS`] and intervals
    /// pulled into `[MIN_INTERVALS, MAX_INTERVALS]`.
    pub fn clamped(self) -> Self {
        Self {
            warmup_secs: self.warmup_secs,
            work_secs: self.work_secs.max(MIN_WORK_SECS),
            rest_secs: self.rest_secs,
            intervals: self.intervals.clamp(MIN_INTERVALS, MAX_INTERVALS),
        }
    }
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            warmup_secs: 10,
            work_secs: 30,
            rest_secs: 15,
            intervals: 8,
        }
    }
}

/// Unparsed values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawWorkoutInput {
    pub warmup: String,
    pub work: String,
    pub rest: String,
    pub intervals: String,
}

impl From<WorkoutConfig> for RawWorkoutInput {
    fn from(cfg: WorkoutConfig) -> Self {
        Self {
            warmup: cfg.warmup_secs.to_string(),
            work: cfg.work_secs.to_string(),
            rest: cfg.rest_secs.to_string(),
            intervals: cfg.intervals.to_string(),
        }
    }
}

/// Convert a raw numeric string to whole seconds.
///
/// Non-finite, negative or unparsable input yields 0; anything else is
/// floored. Blank input counts as 0.
pub fn to_seconds(raw: &str) -> u64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.floor() as u64,
        _ => 0,
    }
}
