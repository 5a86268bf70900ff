//! Maps engine events to audio cue requests.
//!
//! Mostly stateless. The only session-scoped state is the fanfare latch and
//! the generation counter, both refreshed by [`CueDispatcher::rearm`] on
//! every start and reset.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::events::Event;

/// Countdown cues fire while this many seconds or fewer remain.
pub const COUNTDOWN_FROM_SECS: u64 = 2;
/// Beeps in the completion fanfare.
pub const FANFARE_BEEPS: u32 = 3;
/// Gap between fanfare beeps.
pub const FANFARE_SPACING: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum Cue {
    IntervalStart,
    Countdown { remaining_secs: u64 },
}

impl Cue {
    /// Tone index handed to the audio sink: 0 for the first countdown beep,
    /// 2 for the last.
    pub fn countdown_step(&self) -> Option<u8> {
        match self {
            Cue::Countdown { remaining_secs } if *remaining_secs <= COUNTDOWN_FROM_SECS => {
                Some((COUNTDOWN_FROM_SECS - remaining_secs) as u8)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CueRequest {
    pub cue: Cue,
    /// Zero means play now.
    pub delay: Duration,
    /// Session generation the request belongs to.
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct CueDispatcher {
    generation: u64,
    fanfare_fired: bool,
}

impl CueDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fanfare_fired(&self) -> bool {
        self.fanfare_fired
    }

    /// Start a new generation. Requests from earlier generations are stale.
    pub fn rearm(&mut self) -> u64 {
        self.generation += 1;
        self.fanfare_fired = false;
        self.generation
    }

    pub fn is_current(&self, request: &CueRequest) -> bool {
        request.generation == self.generation
    }

    pub fn dispatch(&mut self, event: &Event) -> Vec<CueRequest> {
        let requests = match event {
            Event::PhaseStarted { .. } => vec![self.now(Cue::IntervalStart)],
            Event::SecondElapsed { remaining_secs, .. }
                if *remaining_secs <= COUNTDOWN_FROM_SECS =>
            {
                vec![self.now(Cue::Countdown {
                    remaining_secs: *remaining_secs,
                })]
            }
            Event::FinalWorkCompleted { .. } | Event::SessionCompleted { .. } => {
                if self.fanfare_fired {
                    Vec::new()
                } else {
                    self.fanfare_fired = true;
                    (0..FANFARE_BEEPS)
                        .map(|i| CueRequest {
                            cue: Cue::IntervalStart,
                            delay: FANFARE_SPACING * i,
                            generation: self.generation,
                        })
                        .collect()
                }
            }
            _ => Vec::new(),
        };
        if !requests.is_empty() {
            debug!(event = event.name(), count = requests.len(), "cues requested");
        }
        requests
    }

    fn now(&self, cue: Cue) -> CueRequest {
        CueRequest {
            cue,
            delay: Duration::ZERO,
            generation: self.generation,
        }
    }
}
