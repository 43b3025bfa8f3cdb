//! Headless Tangent-Bug runner.
//!
//! Usage: `tangent_bug [scenario.yaml]`. Without a path the built-in
//! two-circle demo runs. Set `RUST_LOG=debug` to trace every tick.

use log::info;
use std::process::ExitCode;
use tangent_bug::{RunOutcome, ScenarioConfig, Simulation, TangentBugError};

fn run() -> Result<RunOutcome, TangentBugError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading scenario {}", path);
            ScenarioConfig::load(&path)?
        }
        None => {
            info!("no scenario given, running the default demo");
            ScenarioConfig::default()
        }
    };

    let mut sim = Simulation::from_config(&config)?;
    info!(
        "{} obstacles, start {}, goal {}, budget {} ticks",
        sim.world().len(),
        config.robot.start,
        config.goal.center,
        sim.max_ticks()
    );

    let report = sim.run_to_completion()?;

    println!("\n=== Tangent-Bug Run ===");
    println!("Outcome: {:?}", report.outcome);
    println!("Ticks: {}", report.ticks);
    println!("Stalls: {}", report.stalls);
    println!("Path length: {:.4}", report.path_length());
    if let Some(end) = report.final_position() {
        println!("Final position: {}", end);
    }
    println!("Mode switches: {}", report.mode_switches.len());
    for switch in &report.mode_switches {
        println!("  tick {:>5}: {} at {}", switch.tick, switch.mode, switch.position);
    }

    Ok(report.outcome)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(RunOutcome::GoalReached) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(2),
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
