//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or clocks - the caller delivers one `tick()` per elapsed second
//! while the engine is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |
//!            v
//!        Completed
//!
//! any -> Idle (reset), any -> Running (start)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start(&config);
//! // once per second:
//! for event in engine.tick() { /* ... */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::schedule::{Phase, PhaseKind, Schedule};
use super::workout::WorkoutConfig;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Core timer engine.
///
/// Owns the schedule and the single authoritative countdown. The completed
/// counters lag: a phase is only counted on the tick that exhausts it, so
/// while the i-th work block runs `completed_work() == i - 1`.
#[derive(Debug, Clone, Serialize)]
pub struct TimerEngine {
    schedule: Schedule,
    status: TimerStatus,
    current_index: usize,
    remaining_secs: u64,
    completed_work: usize,
    completed_rest: usize,
}

impl TimerEngine {
    /// Idle engine with an empty schedule.
    pub fn new() -> Self {
        Self {
            schedule: Schedule::default(),
            status: TimerStatus::Idle,
            current_index: 0,
            remaining_secs: 0,
            completed_work: 0,
            completed_rest: 0,
        }
    }

    /// Idle engine with the schedule for `config` ready to go.
    pub fn with_config(config: &WorkoutConfig) -> Self {
        let mut engine = Self::new();
        engine.load(Schedule::build(config));
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.schedule.get(self.current_index)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn completed_work(&self) -> usize {
        self.completed_work
    }

    pub fn completed_rest(&self) -> usize {
        self.completed_rest
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            status: self.status,
            index: self.current_index,
            label: self
                .current_phase()
                .map(|p| p.label.clone())
                .unwrap_or_default(),
            remaining_secs: self.remaining_secs,
            completed_work: self.completed_work,
            completed_rest: self.completed_rest,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Build a fresh schedule and start at its first phase.
    ///
    /// Allowed from every state; a running session is discarded. Returns no
    /// events and leaves the engine untouched if the schedule is empty.
    pub fn start(&mut self, config: &WorkoutConfig) -> Vec<Event> {
        let schedule = Schedule::build(config);
        if schedule.is_empty() {
            warn!(intervals = config.intervals, "refusing to start an empty schedule");
            return Vec::new();
        }
        self.load(schedule);
        self.status = TimerStatus::Running;
        info!(
            phases = self.schedule.len(),
            total_secs = self.schedule.total_secs(),
            "session started"
        );
        self.phase_started().into_iter().collect()
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.status {
            TimerStatus::Running => {
                self.status = TimerStatus::Paused;
                info!(remaining_secs = self.remaining_secs, "session paused");
                Some(Event::Paused {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.status {
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                info!(remaining_secs = self.remaining_secs, "session resumed");
                Some(Event::Resumed {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Rebuild the schedule from `config` and return to Idle.
    pub fn reset(&mut self, config: &WorkoutConfig) -> Event {
        self.load(Schedule::build(config));
        info!(phases = self.schedule.len(), "session reset");
        Event::Reset { at: Utc::now() }
    }

    /// Swap in the schedule for `config` while Idle.
    ///
    /// Returns `false` and changes nothing once a session is underway.
    pub fn preview(&mut self, config: &WorkoutConfig) -> bool {
        if self.status != TimerStatus::Idle {
            return false;
        }
        self.load(Schedule::build(config));
        true
    }

    /// Advance the countdown by one second.
    ///
    /// A no-op unless running. The tick that brings the countdown to zero
    /// also closes the phase and moves to the next one, so a session of
    /// `total_secs` seconds takes exactly that many ticks. A phase that is
    /// already at zero closes on its first tick.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.status != TimerStatus::Running {
            return Vec::new();
        }

        let mut events = Vec::new();
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            debug!(
                index = self.current_index,
                remaining_secs = self.remaining_secs,
                "tick"
            );
            events.push(Event::SecondElapsed {
                index: self.current_index,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }
        if self.remaining_secs == 0 {
            self.finish_phase(&mut events);
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn load(&mut self, schedule: Schedule) {
        self.remaining_secs = schedule.get(0).map(|p| p.duration_secs).unwrap_or(0);
        self.schedule = schedule;
        self.status = TimerStatus::Idle;
        self.current_index = 0;
        self.completed_work = 0;
        self.completed_rest = 0;
    }

    fn phase_started(&self) -> Option<Event> {
        let phase = self.current_phase()?;
        Some(Event::PhaseStarted {
            index: self.current_index,
            kind: phase.kind,
            label: phase.label.clone(),
            duration_secs: phase.duration_secs,
            at: Utc::now(),
        })
    }

    fn finish_phase(&mut self, events: &mut Vec<Event>) {
        let Some(kind) = self.current_phase().map(|p| p.kind) else {
            self.status = TimerStatus::Completed;
            return;
        };
        match kind {
            PhaseKind::Work => self.completed_work += 1,
            PhaseKind::Rest => self.completed_rest += 1,
            PhaseKind::WarmUp => {}
        }
        events.push(Event::PhaseCompleted {
            index: self.current_index,
            kind,
            at: Utc::now(),
        });
        if self.schedule.last_work_index() == Some(self.current_index) {
            events.push(Event::FinalWorkCompleted {
                index: self.current_index,
                at: Utc::now(),
            });
        }

        let next = self.current_index + 1;
        match self.schedule.get(next) {
            Some(phase) => {
                self.current_index = next;
                self.remaining_secs = phase.duration_secs;
                info!(index = next, label = %phase.label, "phase started");
                events.extend(self.phase_started());
            }
            None => {
                self.status = TimerStatus::Completed;
                info!(total_secs = self.schedule.total_secs(), "session completed");
                events.push(Event::SessionCompleted {
                    total_secs: self.schedule.total_secs(),
                    at: Utc::now(),
                });
            }
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
