use std::io::BufRead;

use clap::Args;
use intervalroom_core::driver::{self, Control, DriverOptions};
use intervalroom_core::sinks::{AudioCueSink, SilentAudio};
use intervalroom_core::{Config, WorkoutConfig, WorkoutSession};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::WorkoutArgs;
use crate::terminal::{LoggingPowerHint, TerminalBell, TerminalRenderer};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub workout: WorkoutArgs,
    /// Do not ring the terminal bell
    #[arg(long)]
    pub no_sound: bool,
    /// Wait for `s` instead of starting right away
    #[arg(long)]
    pub manual: bool,
    /// Keep running after the workout completes
    #[arg(long)]
    pub stay: bool,
}

/// Keys read from stdin, one per line.
fn parse_key(line: &str, workout: WorkoutConfig) -> Option<Control> {
    match line.trim() {
        "p" | "" => Some(Control::TogglePause),
        "s" => Some(Control::Start(workout)),
        "r" => Some(Control::Reset(workout)),
        "v" => Some(Control::VisibilityRegained),
        "q" => Some(Control::Shutdown),
        _ => None,
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<Control>, workout: WorkoutConfig) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_key(&line, workout) {
                Some(cmd) => {
                    if tx.blocking_send(cmd).is_err() {
                        break;
                    }
                }
                None => debug!(input = %line, "ignoring unknown key"),
            }
        }
    });
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let workout = args.workout.resolve(&config);

    let audio: Box<dyn AudioCueSink> = if config.sound.enabled && !args.no_sound {
        Box::new(TerminalBell::new(std::io::stderr()))
    } else {
        Box::new(SilentAudio)
    };
    let mut session = WorkoutSession::new(
        workout,
        Box::new(TerminalRenderer::new(std::io::stdout())),
        audio,
    );
    if config.power.keep_awake {
        session = session.with_power_hints(Box::new(LoggingPowerHint));
    }

    println!("keys: p pause/resume, s start/restart, r reset, q quit");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let (tx, rx) = mpsc::channel(16);
        spawn_stdin_reader(tx.clone(), workout);
        if !args.manual {
            tx.send(Control::Start(workout)).await?;
        }
        let options = DriverOptions {
            exit_when_complete: !args.stay,
            ..DriverOptions::default()
        };
        let session = driver::run(session, rx, options).await;
        info!(status = ?session.status(), "workout finished");
        // held until here so an early stdin EOF cannot close the channel
        drop(tx);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}
