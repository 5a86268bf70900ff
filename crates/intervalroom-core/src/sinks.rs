//! Capability traits for the outside world.
//!
//! The core never touches a terminal, speaker or OS power API directly.
//! Frontends implement these traits and hand them to
//! [`WorkoutSession`](crate::session::WorkoutSession). Every method may fail;
//! the session logs the failure and carries on.

use crate::display::DisplayFrame;
use crate::error::SinkError;

/// Draws a [`DisplayFrame`]. Called after every state change.
pub trait Renderer: Send {
    fn render(&mut self, frame: &DisplayFrame) -> Result<(), SinkError>;
}

/// Plays the two tone families.
pub trait AudioCueSink: Send {
    /// Called on session start, the first user gesture. Sinks that need a
    /// gesture before producing sound should unlock here.
    fn prime(&mut self) -> Result<(), SinkError> {
        Ok(()) // default no-op
    }

    /// `step` is 0, 1 or 2 for the beeps at 2, 1 and 0 seconds remaining.
    fn play_countdown_tone(&mut self, step: u8) -> Result<(), SinkError>;

    fn play_interval_start_tone(&mut self) -> Result<(), SinkError>;
}

/// Keep-awake hints for the platform.
pub trait PowerHintSink: Send {
    fn session_active(&mut self) -> Result<(), SinkError>;

    fn session_inactive(&mut self) -> Result<(), SinkError>;
}

/// Renderer that draws nothing.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &DisplayFrame) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Audio sink for when sound is disabled.
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioCueSink for SilentAudio {
    fn play_countdown_tone(&mut self, _step: u8) -> Result<(), SinkError> {
        Ok(())
    }

    fn play_interval_start_tone(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use recording::{Recorded, Recorder};

/// In-memory sinks for tests. Enabled by the `test-util` feature.
#[cfg(any(test, feature = "test-util"))]
mod recording {
    use std::sync::{Arc, Mutex};

    use super::{AudioCueSink, PowerHintSink, Renderer};
    use crate::display::DisplayFrame;
    use crate::error::SinkError;

    /// Everything a [`Recorder`] has seen, in order.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Recorded {
        Frame(DisplayFrame),
        Primed,
        CountdownTone(u8),
        IntervalStartTone,
        Active,
        Inactive,
    }

    /// Sink that implements every capability by appending to a shared log.
    ///
    /// Clones share the same log, so one clone can be handed to a session
    /// while another is kept for inspection.
    #[derive(Debug, Clone, Default)]
    pub struct Recorder {
        log: Arc<Mutex<Vec<Recorded>>>,
    }

    impl Recorder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn entries(&self) -> Vec<Recorded> {
            self.log.lock().map(|log| log.clone()).unwrap_or_default()
        }

        pub fn last_frame(&self) -> Option<DisplayFrame> {
            self.entries().into_iter().rev().find_map(|r| match r {
                Recorded::Frame(frame) => Some(frame),
                _ => None,
            })
        }

        /// Tones only, in the order they were played.
        pub fn tones(&self) -> Vec<Recorded> {
            self.entries()
                .into_iter()
                .filter(|r| matches!(r, Recorded::CountdownTone(_) | Recorded::IntervalStartTone))
                .collect()
        }

        fn push(&self, entry: Recorded) -> Result<(), SinkError> {
            if let Ok(mut log) = self.log.lock() {
                log.push(entry);
            }
            Ok(())
        }
    }

    impl Renderer for Recorder {
        fn render(&mut self, frame: &DisplayFrame) -> Result<(), SinkError> {
            self.push(Recorded::Frame(frame.clone()))
        }
    }

    impl AudioCueSink for Recorder {
        fn prime(&mut self) -> Result<(), SinkError> {
            self.push(Recorded::Primed)
        }

        fn play_countdown_tone(&mut self, step: u8) -> Result<(), SinkError> {
            self.push(Recorded::CountdownTone(step))
        }

        fn play_interval_start_tone(&mut self) -> Result<(), SinkError> {
            self.push(Recorded::IntervalStartTone)
        }
    }

    impl PowerHintSink for Recorder {
        fn session_active(&mut self) -> Result<(), SinkError> {
            self.push(Recorded::Active)
        }

        fn session_inactive(&mut self) -> Result<(), SinkError> {
            self.push(Recorded::Inactive)
        }
    }
}
