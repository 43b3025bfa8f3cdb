//! # Simulation Driver
//!
//! Owns the world, the navigator and the clock. A renderer calls
//! [`Simulation::step`] once per frame and reads [`Simulation::snapshot`];
//! headless callers use [`Simulation::run`] with a tick budget.
//!
//! A stalled tick leaves the robot state untouched apart from the
//! previous-distance bookkeeping, so the next tick would stall again at the
//! same spot. `run` therefore ends on the first stall.

use crate::config::ScenarioConfig;
use crate::error::{ConfigError, NavigationError};
use crate::path_length;
use crate::structs::{Mode, Vector2D};
use crate::tangent_bug::{Navigator, NavigatorSnapshot, TickResult, TickStatus};
use crate::world::ObstacleWorld;
use log::{info, warn};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum RunOutcome {
    GoalReached,
    /// The robot found no usable tangent point.
    Stalled { position: Vector2D },
    BudgetExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeSwitch {
    pub tick: u64,
    pub mode: Mode,
    pub position: Vector2D,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub ticks: u64,
    pub stalls: u64,
    pub mode_switches: Vec<ModeSwitch>,
    /// Robot positions, starting with the start position and extended by
    /// every tick that moved the robot.
    pub trajectory: Vec<Vector2D>,
}

impl RunReport {
    pub fn final_position(&self) -> Option<Vector2D> {
        self.trajectory.last().copied()
    }

    pub fn path_length(&self) -> f64 {
        path_length(&self.trajectory)
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    world: ObstacleWorld,
    navigator: Navigator,
    max_ticks: u64,
    stalls: u64,
    mode_switches: Vec<ModeSwitch>,
    trajectory: Vec<Vector2D>,
}

impl Simulation {
    pub const DEFAULT_MAX_TICKS: u64 = 2000;

    pub fn new(world: ObstacleWorld, navigator: Navigator) -> Self {
        let start = navigator.state().position;
        Simulation {
            world,
            navigator,
            max_ticks: Self::DEFAULT_MAX_TICKS,
            stalls: 0,
            mode_switches: Vec::new(),
            trajectory: vec![start],
        }
    }

    pub fn from_config(config: &ScenarioConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let world = config.build_world()?;
        let navigator = config.build_navigator()?;
        Ok(Simulation::new(world, navigator).with_max_ticks(config.max_ticks))
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    pub fn world(&self) -> &ObstacleWorld {
        &self.world
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn snapshot(&self) -> NavigatorSnapshot {
        self.navigator.snapshot()
    }

    pub fn is_finished(&self) -> bool {
        self.navigator.is_finished()
    }

    /// Performs one navigator tick and records its effect.
    pub fn step(&mut self) -> Result<TickResult, NavigationError> {
        let result = self.navigator.tick(&self.world)?;
        let position = self.navigator.state().position;

        if result.status == TickStatus::Stalled {
            self.stalls += 1;
        } else {
            self.trajectory.push(position);
        }
        if let Some(mode) = result.mode_switch {
            self.mode_switches.push(ModeSwitch {
                tick: self.navigator.ticks(),
                mode,
                position,
            });
        }
        Ok(result)
    }

    /// Steps until the goal is reached, the robot stalls, or `max_ticks`
    /// further ticks have run.
    pub fn run(&mut self, max_ticks: u64) -> Result<RunReport, NavigationError> {
        let mut outcome = if self.is_finished() {
            RunOutcome::GoalReached
        } else {
            RunOutcome::BudgetExhausted
        };

        let mut budget = max_ticks;
        while outcome == RunOutcome::BudgetExhausted && budget > 0 {
            budget -= 1;
            let result = self.step()?;
            match result.status {
                TickStatus::GoalReached => outcome = RunOutcome::GoalReached,
                TickStatus::Stalled => {
                    outcome = RunOutcome::Stalled {
                        position: self.navigator.state().position,
                    }
                }
                TickStatus::MovedDirect | TickStatus::PursuedTangent { .. } => {}
            }
        }

        let report = self.report(outcome);
        match report.outcome {
            RunOutcome::GoalReached => info!(
                "goal reached after {} ticks ({} mode switches, path length {:.4})",
                report.ticks,
                report.mode_switches.len(),
                report.path_length()
            ),
            RunOutcome::Stalled { position } => {
                warn!("run stalled at {} after {} ticks", position, report.ticks)
            }
            RunOutcome::BudgetExhausted => warn!(
                "tick budget of {} exhausted at {}",
                max_ticks,
                self.navigator.state().position
            ),
        }
        Ok(report)
    }

    /// Runs with the budget set at construction.
    pub fn run_to_completion(&mut self) -> Result<RunReport, NavigationError> {
        self.run(self.max_ticks)
    }

    fn report(&self, outcome: RunOutcome) -> RunReport {
        RunReport {
            outcome,
            ticks: self.navigator.ticks(),
            stalls: self.stalls,
            mode_switches: self.mode_switches.clone(),
            trajectory: self.trajectory.clone(),
        }
    }
}
