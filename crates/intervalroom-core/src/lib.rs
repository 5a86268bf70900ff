//! # Intervalroom Core Library
//!
//! This library provides the core logic for the Intervalroom interval-workout
//! timer. Frontends (the bundled CLI, or anything else) inject capability
//! implementations for drawing, sound and keep-awake; the core never talks
//! to a platform API directly.
//!
//! ## Architecture
//!
//! - **Schedule**: pure compilation of a [`WorkoutConfig`] into ordered
//!   warm-up / work / rest phases
//! - **Timer Engine**: a tick-driven state machine that requires the caller
//!   to invoke `tick()` once per elapsed second
//! - **Cues**: events mapped to countdown and interval tones, with a one-shot
//!   completion fanfare
//! - **Session / Driver**: the single-writer orchestrator and its tokio loop
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`WorkoutSession`]: Engine plus collaborators
//! - [`Config`]: Application configuration management

pub mod display;
pub mod driver;
pub mod error;
pub mod events;
pub mod session;
pub mod sinks;
pub mod storage;
pub mod timer;

pub use display::{format_clock, DisplayFrame, PhaseLine};
pub use driver::{Control, DriverOptions};
pub use error::{ConfigError, SinkError};
pub use events::Event;
pub use session::WorkoutSession;
pub use sinks::{AudioCueSink, PowerHintSink, Renderer};
pub use storage::Config;
pub use timer::{
    Cue, CueDispatcher, CueRequest, Phase, PhaseKind, RawWorkoutInput, Schedule, Summary,
    TimerEngine, TimerStatus, WorkoutConfig,
};
