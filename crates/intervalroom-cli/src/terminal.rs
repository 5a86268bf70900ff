//! Terminal implementations of the core capability traits.

use std::io::Write;

use intervalroom_core::sinks::{AudioCueSink, PowerHintSink, Renderer};
use intervalroom_core::{DisplayFrame, SinkError};
use tracing::{debug, info};

const BAR_WIDTH: usize = 20;
const BELL: &[u8] = b"\x07";

/// Line-per-frame renderer. The schedule list is reprinted only when it or
/// the highlighted phase changes.
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
    last_schedule: Option<(Vec<String>, Option<usize>)>,
    last_status: Option<String>,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_schedule: None,
            last_status: None,
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &DisplayFrame) -> Result<(), SinkError> {
        let labels: Vec<String> = frame.schedule.iter().map(|l| l.label.clone()).collect();
        let schedule_key = (labels, frame.highlight_index);
        if self.last_schedule.as_ref() != Some(&schedule_key) {
            for (i, line) in frame.schedule.iter().enumerate() {
                let marker = if Some(i) == frame.highlight_index { '>' } else { ' ' };
                writeln!(self.out, "{marker} {:<12} {}", line.label, line.detail)?;
            }
            self.last_schedule = Some(schedule_key);
        }

        if self.last_status.as_deref() != Some(frame.status_text.as_str()) {
            writeln!(self.out, "-- {}", frame.status_text)?;
            self.last_status = Some(frame.status_text.clone());
        }

        writeln!(
            self.out,
            "{:<12} {}  [{}] {:>3.0}%  {}  {}  left {} of {}",
            frame.phase_label,
            frame.remaining_formatted,
            progress_bar(frame.percent),
            frame.percent,
            frame.work_label,
            frame.rest_label,
            frame.remaining_workout_formatted,
            frame.total_workout_formatted,
        )?;
        self.out.flush()?;
        Ok(())
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Rings the terminal bell. A terminal has one pitch, so the countdown step
/// only shows up in the debug log.
pub struct TerminalBell<W: Write + Send> {
    out: W,
    primed: bool,
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, primed: false }
    }

    fn ring(&mut self) -> Result<(), SinkError> {
        if !self.primed {
            self.prime()?;
        }
        self.out.write_all(BELL)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> AudioCueSink for TerminalBell<W> {
    fn prime(&mut self) -> Result<(), SinkError> {
        if !self.primed {
            debug!("terminal bell primed");
            self.primed = true;
        }
        Ok(())
    }

    fn play_countdown_tone(&mut self, step: u8) -> Result<(), SinkError> {
        debug!(step, "countdown tone");
        self.ring()
    }

    fn play_interval_start_tone(&mut self) -> Result<(), SinkError> {
        debug!("interval start tone");
        self.ring()
    }
}

/// Reports keep-awake transitions in the log. Terminals have no wake-lock
/// API; a wrapper such as `systemd-inhibit` can key off these lines.
#[derive(Debug, Default)]
pub struct LoggingPowerHint;

impl PowerHintSink for LoggingPowerHint {
    fn session_active(&mut self) -> Result<(), SinkError> {
        info!("keep-awake: session active");
        Ok(())
    }

    fn session_inactive(&mut self) -> Result<(), SinkError> {
        info!("keep-awake: session inactive");
        Ok(())
    }
}
