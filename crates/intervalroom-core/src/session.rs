//! Workout session: the single writer that ties the engine to the outside.
//!
//! A session owns a [`TimerEngine`], a [`CueDispatcher`] and the injected
//! collaborators. Each command mutates the engine, routes the resulting
//! events through the dispatcher, plays immediate cues, and re-renders.
//! Delayed cues (the completion fanfare) are returned to the caller, which
//! schedules them and hands them back through [`WorkoutSession::fire_cue`].
//!
//! Collaborator failures are logged and never reach the engine.

use tracing::{debug, info, warn};

use crate::display::{
    DisplayFrame, STATUS_COMPLETED, STATUS_EMPTY, STATUS_IDLE, STATUS_PAUSED, STATUS_RESUMED,
    STATUS_RUNNING,
};
use crate::events::Event;
use crate::sinks::{AudioCueSink, PowerHintSink, Renderer};
use crate::timer::{Cue, CueDispatcher, CueRequest, TimerEngine, TimerStatus, WorkoutConfig};

pub struct WorkoutSession {
    engine: TimerEngine,
    cues: CueDispatcher,
    config: WorkoutConfig,
    status_text: &'static str,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioCueSink>,
    power: Option<Box<dyn PowerHintSink>>,
    power_active: bool,
}

impl WorkoutSession {
    /// Idle session previewing `config`. Renders once.
    pub fn new(
        config: WorkoutConfig,
        renderer: Box<dyn Renderer>,
        audio: Box<dyn AudioCueSink>,
    ) -> Self {
        let mut session = Self {
            engine: TimerEngine::with_config(&config),
            cues: CueDispatcher::new(),
            config,
            status_text: STATUS_IDLE,
            renderer,
            audio,
            power: None,
            power_active: false,
        };
        session.render();
        session
    }

    pub fn with_power_hints(mut self, sink: Box<dyn PowerHintSink>) -> Self {
        self.power = Some(sink);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn config(&self) -> &WorkoutConfig {
        &self.config
    }

    pub fn status(&self) -> TimerStatus {
        self.engine.status()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn status_text(&self) -> &str {
        self.status_text
    }

    pub fn generation(&self) -> u64 {
        self.cues.generation()
    }

    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame::build(&self.engine, self.status_text)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or restart) a session. Returns the cues to play later.
    pub fn start(&mut self, config: WorkoutConfig) -> Vec<CueRequest> {
        let events = self.engine.start(&config);
        if events.is_empty() {
            // A live session keeps running and keeps its status text.
            if !matches!(self.status(), TimerStatus::Running | TimerStatus::Paused) {
                self.status_text = STATUS_EMPTY;
                self.render();
            }
            return Vec::new();
        }

        self.config = config;
        let generation = self.cues.rearm();
        debug!(generation, "cue generation armed");
        if let Err(e) = self.audio.prime() {
            warn!("Failed to prime audio: {}", e);
        }
        self.status_text = STATUS_RUNNING;
        let deferred = self.handle(&events);
        self.sync_power();
        self.render();
        deferred
    }

    /// Deliver one elapsed second. Returns the cues to play later.
    pub fn tick(&mut self) -> Vec<CueRequest> {
        let events = self.engine.tick();
        if events.is_empty() {
            return Vec::new();
        }
        let deferred = self.handle(&events);
        if self.engine.status() == TimerStatus::Completed {
            self.status_text = STATUS_COMPLETED;
            self.sync_power();
        }
        self.render();
        deferred
    }

    pub fn pause(&mut self) -> bool {
        if self.engine.pause().is_none() {
            return false;
        }
        self.status_text = STATUS_PAUSED;
        self.sync_power();
        self.render();
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.engine.resume().is_none() {
            return false;
        }
        self.status_text = STATUS_RESUMED;
        self.sync_power();
        self.render();
        true
    }

    /// Pause when running, resume when paused, otherwise nothing.
    pub fn toggle_pause(&mut self) -> bool {
        match self.engine.status() {
            TimerStatus::Running => self.pause(),
            TimerStatus::Paused => self.resume(),
            _ => false,
        }
    }

    /// Back to Idle with a fresh schedule. Outstanding cues become stale.
    pub fn reset(&mut self, config: WorkoutConfig) {
        self.config = config;
        self.engine.reset(&config);
        self.cues.rearm();
        self.status_text = STATUS_IDLE;
        self.sync_power();
        self.render();
    }

    /// Show the schedule for `config` without starting. Ignored unless idle.
    pub fn preview(&mut self, config: WorkoutConfig) -> bool {
        if !self.engine.preview(&config) {
            debug!("preview ignored outside idle");
            return false;
        }
        self.config = config;
        self.render();
        true
    }

    /// Play a previously deferred cue unless its session has since been
    /// restarted or reset.
    pub fn fire_cue(&mut self, request: &CueRequest) -> bool {
        if !self.cues.is_current(request) {
            debug!(
                stale = request.generation,
                current = self.cues.generation(),
                "dropping stale cue"
            );
            return false;
        }
        self.play(request.cue);
        true
    }

    /// The frontend became visible again; re-request keep-awake if needed.
    pub fn visibility_regained(&mut self) {
        if !self.engine.is_running() {
            return;
        }
        if let Some(power) = self.power.as_mut() {
            if let Err(e) = power.session_active() {
                warn!("Failed to re-request keep-awake: {}", e);
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn handle(&mut self, events: &[Event]) -> Vec<CueRequest> {
        let mut deferred = Vec::new();
        for event in events {
            for request in self.cues.dispatch(event) {
                if request.delay.is_zero() {
                    self.play(request.cue);
                } else {
                    deferred.push(request);
                }
            }
        }
        deferred
    }

    fn play(&mut self, cue: Cue) {
        let result = match cue {
            Cue::IntervalStart => self.audio.play_interval_start_tone(),
            Cue::Countdown { .. } => match cue.countdown_step() {
                Some(step) => self.audio.play_countdown_tone(step),
                None => Ok(()),
            },
        };
        if let Err(e) = result {
            warn!("Failed to play {:?}: {}", cue, e);
        }
    }

    fn sync_power(&mut self) {
        let want = self.engine.is_running();
        if want == self.power_active {
            return;
        }
        self.power_active = want;
        let Some(power) = self.power.as_mut() else {
            return;
        };
        let result = if want {
            info!("requesting keep-awake");
            power.session_active()
        } else {
            info!("releasing keep-awake");
            power.session_inactive()
        };
        if let Err(e) = result {
            warn!("Power hint failed: {}", e);
        }
    }

    fn render(&mut self) {
        let frame = self.frame();
        if let Err(e) = self.renderer.render(&frame) {
            warn!("Failed to render frame: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::sinks::{Recorded, Recorder};

    fn cfg(warmup: u64, work: u64, rest: u64, intervals: u32) -> WorkoutConfig {
        WorkoutConfig {
            warmup_secs: warmup,
            work_secs: work,
            rest_secs: rest,
            intervals,
        }
    }

    fn session(config: WorkoutConfig) -> (WorkoutSession, Recorder) {
        let rec = Recorder::new();
        let session = WorkoutSession::new(config, Box::new(rec.clone()), Box::new(rec.clone()))
            .with_power_hints(Box::new(rec.clone()));
        (session, rec)
    }

    struct BrokenAudio;

    impl AudioCueSink for BrokenAudio {
        fn prime(&mut self) -> Result<(), SinkError> {
            Err(SinkError::Unsupported { capability: "audio" })
        }

        fn play_countdown_tone(&mut self, _step: u8) -> Result<(), SinkError> {
            Err(SinkError::Unsupported { capability: "audio" })
        }

        fn play_interval_start_tone(&mut self) -> Result<(), SinkError> {
            Err(SinkError::Unsupported { capability: "audio" })
        }
    }

    #[test]
    fn new_session_renders_idle_preview() {
        let (s, rec) = session(cfg(0, 30, 10, 3));
        let frame = rec.last_frame().unwrap();
        assert_eq!(frame.status, TimerStatus::Idle);
        assert_eq!(frame.status_text, STATUS_IDLE);
        assert_eq!(frame.schedule.len(), 5);
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn start_primes_audio_and_plays_interval_cue() {
        let (mut s, rec) = session(cfg(0, 30, 10, 3));
        let deferred = s.start(cfg(0, 30, 10, 3));
        assert!(deferred.is_empty());
        let entries = rec.entries();
        assert!(entries.contains(&Recorded::Primed));
        assert!(entries.contains(&Recorded::Active));
        assert_eq!(rec.tones(), vec![Recorded::IntervalStartTone]);
        assert_eq!(s.status_text(), STATUS_RUNNING);
    }

    #[test]
    fn empty_start_reports_status() {
        let (mut s, rec) = session(cfg(0, 30, 10, 3));
        assert!(s.start(cfg(0, 30, 10, 0)).is_empty());
        assert_eq!(s.status(), TimerStatus::Idle);
        assert_eq!(rec.last_frame().unwrap().status_text, STATUS_EMPTY);
        assert!(!rec.entries().contains(&Recorded::Active));
    }

    #[test]
    fn empty_start_leaves_a_live_session_alone() {
        let (mut s, rec) = session(cfg(0, 30, 0, 1));
        s.start(cfg(0, 30, 0, 1));
        s.tick();
        let entries_before = rec.entries().len();

        assert!(s.start(cfg(0, 30, 10, 0)).is_empty());
        assert_eq!(s.status(), TimerStatus::Running);
        assert_eq!(s.status_text(), STATUS_RUNNING);
        assert_eq!(s.config(), &cfg(0, 30, 0, 1));
        assert_eq!(rec.entries().len(), entries_before);
        let frame = rec.last_frame().unwrap();
        assert_eq!(frame.status_text, STATUS_RUNNING);
        assert_eq!(frame.phase_label, "Work 1/1");

        s.pause();
        assert!(s.start(cfg(0, 30, 10, 0)).is_empty());
        assert_eq!(s.status_text(), STATUS_PAUSED);
    }

    #[test]
    fn full_run_plays_countdowns_and_defers_fanfare() {
        let (mut s, rec) = session(cfg(0, 5, 0, 1));
        s.start(cfg(0, 5, 0, 1));
        let mut deferred = Vec::new();
        for _ in 0..5 {
            deferred.extend(s.tick());
        }
        assert_eq!(s.status(), TimerStatus::Completed);
        assert_eq!(s.status_text(), STATUS_COMPLETED);
        assert_eq!(
            rec.tones(),
            vec![
                Recorded::IntervalStartTone,
                Recorded::CountdownTone(0),
                Recorded::CountdownTone(1),
                Recorded::CountdownTone(2),
                Recorded::IntervalStartTone,
            ]
        );
        assert_eq!(
            deferred.iter().map(|r| r.delay.as_secs()).collect::<Vec<_>>(),
            vec![1, 2]
        );
        for request in &deferred {
            assert!(s.fire_cue(request));
        }
        assert_eq!(rec.tones().len(), 7);
        assert_eq!(rec.entries().last(), Some(&Recorded::IntervalStartTone));
        assert!(rec.entries().contains(&Recorded::Inactive));
    }

    #[test]
    fn reset_drops_pending_fanfare() {
        let (mut s, rec) = session(cfg(0, 5, 0, 1));
        s.start(cfg(0, 5, 0, 1));
        let mut deferred = Vec::new();
        for _ in 0..5 {
            deferred.extend(s.tick());
        }
        s.reset(cfg(0, 5, 0, 1));
        let before = rec.tones().len();
        for request in &deferred {
            assert!(!s.fire_cue(request));
        }
        assert_eq!(rec.tones().len(), before);

        let frame = rec.last_frame().unwrap();
        assert_eq!(frame.status, TimerStatus::Idle);
        assert_eq!(frame.work_label, "Work 0/1");
        assert_eq!(frame.phase_label, "Ready");
    }

    #[test]
    fn toggle_pause_round_trips() {
        let (mut s, rec) = session(cfg(0, 30, 0, 1));
        assert!(!s.toggle_pause());
        s.start(cfg(0, 30, 0, 1));
        s.tick();
        assert!(s.toggle_pause());
        assert_eq!(s.status(), TimerStatus::Paused);
        assert_eq!(rec.last_frame().unwrap().status_text, STATUS_PAUSED);
        assert!(s.tick().is_empty());
        assert!(s.toggle_pause());
        assert_eq!(s.status_text(), STATUS_RESUMED);
        assert_eq!(s.engine().remaining_secs(), 29);
        assert_eq!(
            rec.entries()
                .into_iter()
                .filter(|r| matches!(r, Recorded::Active | Recorded::Inactive))
                .collect::<Vec<_>>(),
            vec![Recorded::Active, Recorded::Inactive, Recorded::Active]
        );
    }

    #[test]
    fn preview_updates_idle_schedule_only() {
        let (mut s, rec) = session(cfg(0, 30, 10, 3));
        assert!(s.preview(cfg(10, 30, 10, 2)));
        assert_eq!(rec.last_frame().unwrap().schedule.len(), 4);
        s.start(cfg(10, 30, 10, 2));
        assert!(!s.preview(cfg(0, 30, 0, 1)));
        assert_eq!(s.engine().schedule().len(), 4);
    }

    #[test]
    fn visibility_regained_rerequests_while_running() {
        let (mut s, rec) = session(cfg(0, 30, 0, 1));
        s.visibility_regained();
        assert!(!rec.entries().contains(&Recorded::Active));
        s.start(cfg(0, 30, 0, 1));
        s.visibility_regained();
        let actives = rec
            .entries()
            .into_iter()
            .filter(|r| *r == Recorded::Active)
            .count();
        assert_eq!(actives, 2);
    }

    #[test]
    fn failing_audio_never_breaks_the_engine() {
        let rec = Recorder::new();
        let mut s = WorkoutSession::new(cfg(0, 5, 0, 1), Box::new(rec.clone()), Box::new(BrokenAudio));
        s.start(cfg(0, 5, 0, 1));
        let mut deferred = Vec::new();
        for _ in 0..5 {
            deferred.extend(s.tick());
        }
        for request in &deferred {
            s.fire_cue(request);
        }
        assert_eq!(s.status(), TimerStatus::Completed);
        assert_eq!(rec.last_frame().unwrap().phase_label, "Completed");
    }
}
