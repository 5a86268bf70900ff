//! Async tick driver.
//!
//! Runs a [`WorkoutSession`] inside one tokio task: a one-second interval
//! delivers ticks while the session is running, a channel delivers control
//! commands, and deferred cues wait in a local queue until their deadline.
//! Everything happens on this one task, so the session has exactly one
//! writer and no locking is needed.
//!
//! Tick policy: one logical second per tick. Missed ticks are delayed, not
//! burst, so a stalled runtime shows up as drift rather than a jump.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::session::WorkoutSession;
use crate::timer::{CueRequest, TimerStatus, WorkoutConfig};

/// Commands accepted by [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Start(WorkoutConfig),
    Pause,
    Resume,
    TogglePause,
    Reset(WorkoutConfig),
    Preview(WorkoutConfig),
    VisibilityRegained,
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
pub struct DriverOptions {
    pub tick_period: Duration,
    /// Return once the session completes and its fanfare has played.
    pub exit_when_complete: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            exit_when_complete: false,
        }
    }
}

struct PendingCue {
    due: Instant,
    request: CueRequest,
}

/// Drive `session` until shutdown. Returns the session for inspection.
pub async fn run(
    mut session: WorkoutSession,
    mut control: mpsc::Receiver<Control>,
    options: DriverOptions,
) -> WorkoutSession {
    let period = options.tick_period;
    let mut ticker = new_ticker(period);
    let mut pending: Vec<PendingCue> = Vec::new();
    info!(?period, "session driver started");

    loop {
        if options.exit_when_complete
            && session.status() == TimerStatus::Completed
            && pending.is_empty()
        {
            info!("session complete, driver exiting");
            break;
        }

        let next_due = pending.iter().map(|p| p.due).min();
        let cue_deadline = next_due.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

        tokio::select! {
            _ = ticker.tick(), if session.is_running() => {
                let deferred = session.tick();
                enqueue(&mut pending, deferred);
            }
            _ = sleep_until(cue_deadline), if next_due.is_some() => {
                let now = Instant::now();
                let (mut due, later): (Vec<_>, Vec<_>) =
                    pending.drain(..).partition(|p| p.due <= now);
                pending = later;
                due.sort_by_key(|p| p.due);
                for cue in due {
                    session.fire_cue(&cue.request);
                }
            }
            msg = control.recv() => match msg {
                None | Some(Control::Shutdown) => {
                    info!("session driver shutting down");
                    break;
                }
                Some(cmd) => apply(&mut session, cmd, &mut ticker, &mut pending, period),
            },
        }
    }

    session
}

fn apply(
    session: &mut WorkoutSession,
    cmd: Control,
    ticker: &mut Interval,
    pending: &mut Vec<PendingCue>,
    period: Duration,
) {
    debug!(?cmd, "control");
    match cmd {
        Control::Start(config) => {
            let generation = session.generation();
            let deferred = session.start(config);
            if session.generation() != generation {
                cancel(pending);
                *ticker = new_ticker(period);
            }
            enqueue(pending, deferred);
        }
        Control::Pause => {
            session.pause();
        }
        Control::Resume => {
            if session.resume() {
                *ticker = new_ticker(period);
            }
        }
        Control::TogglePause => {
            if session.toggle_pause() && session.is_running() {
                *ticker = new_ticker(period);
            }
        }
        Control::Reset(config) => {
            cancel(pending);
            session.reset(config);
        }
        Control::Preview(config) => {
            session.preview(config);
        }
        Control::VisibilityRegained => session.visibility_regained(),
        Control::Shutdown => {}
    }
}

/// First tick lands a full period from now.
fn new_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

fn enqueue(pending: &mut Vec<PendingCue>, requests: Vec<CueRequest>) {
    let now = Instant::now();
    pending.extend(requests.into_iter().map(|request| PendingCue {
        due: now + request.delay,
        request,
    }));
}

fn cancel(pending: &mut Vec<PendingCue>) {
    if !pending.is_empty() {
        debug!(count = pending.len(), "cancelling pending cues");
        pending.clear();
    }
}
