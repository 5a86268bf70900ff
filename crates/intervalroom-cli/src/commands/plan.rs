use clap::Args;
use intervalroom_core::{format_clock, Config, Schedule};
use serde::Serialize;

use super::WorkoutArgs;

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub workout: WorkoutArgs,
    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct Plan<'a> {
    config: intervalroom_core::WorkoutConfig,
    phases: &'a [intervalroom_core::Phase],
    total_secs: u64,
    total: String,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let workout = args.workout.resolve(&config);
    let schedule = Schedule::build(&workout);

    if args.json {
        let plan = Plan {
            config: workout,
            phases: schedule.phases(),
            total_secs: schedule.total_secs(),
            total: format_clock(schedule.total_secs()),
        };
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for (i, phase) in schedule.phases().iter().enumerate() {
        println!(
            "{:>2}. {:<12} {:>5}",
            i + 1,
            phase.label,
            format_clock(phase.duration_secs)
        );
    }
    println!("total {}", format_clock(schedule.total_secs()));
    Ok(())
}
