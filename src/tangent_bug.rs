//! # Tangent-Bug Navigator
//!
//! Local-sensing navigation for a point robot: move straight at the goal
//! while the view toward it is clear, otherwise head for the silhouette
//! tangent point that minimizes the detour `|p - position| + |goal - p|`.
//!
//! ## Control Law (one evaluation per tick)
//!
//! 1. **Goal check**: if `distance_to_goal <= step_size` the robot snaps
//!    exactly onto the goal and the run is over.
//! 2. **Direct motion**: in `Direct` mode with a clear ray toward the goal,
//!    advance `step_size` along `goal_direction`.
//! 3. **Tangent pursuit**: otherwise scan the vision disk for tangent points.
//!    In `BoundaryFollowing` mode, candidates lying behind the previous
//!    heading (`dot < -DIRECTION_TOLERANCE`) are rejected so the robot keeps
//!    circling in one direction. The cheapest remaining candidate wins; ties
//!    go to the first in scan order. The robot advances `step_size` toward it.
//! 4. **Mode switch** (at most one per tick):
//!    - `Direct -> BoundaryFollowing` once the goal distance grows, recording
//!      `followed_distance` from the point just chosen.
//!    - `BoundaryFollowing -> Direct` once the chosen point's distance to the
//!      goal (`reach_distance`) drops below `followed_distance`.
//!
//! A tick with no usable candidate leaves the robot in place and reports
//! [`TickStatus::Stalled`]. Whether repeated stalls end a run is the
//! driver's call.
//!
//! Distances compared here come from sampled raycasts, so every tangent
//! point carries up to one `ray_resolution` of bias.

use crate::error::{ConfigError, NavigationError};
use crate::sensing::RangeSensor;
use crate::structs::{Goal, Mode, RobotState, Vector2D};
use crate::world::ObstacleWorld;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Tolerance on the heading filter used while following a boundary.
pub const DIRECTION_TOLERANCE: f64 = 0.01;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickStatus {
    /// Moved straight along the goal direction.
    MovedDirect,
    /// Moved toward the selected tangent point.
    PursuedTangent { target: Vector2D },
    /// No usable tangent point; the robot did not move.
    Stalled,
    /// Snapped onto the goal; the run is over.
    GoalReached,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickResult {
    pub still_running: bool,
    pub status: TickStatus,
    /// The mode entered during this tick, if any.
    pub mode_switch: Option<Mode>,
}

impl TickResult {
    fn running(status: TickStatus, mode_switch: Option<Mode>) -> Self {
        TickResult {
            still_running: true,
            status,
            mode_switch,
        }
    }
}

/// Read-only view of the navigator for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavigatorSnapshot {
    pub position: Vector2D,
    pub mode: Mode,
    pub point_being_pursued: Vector2D,
    pub vision_radius: f64,
    pub robot_radius: f64,
    pub tick: u64,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    goal: Goal,
    sensor: RangeSensor,
    vision_radius: f64,
    step_size: f64,
    robot_radius: f64,
    state: RobotState,
    ticks: u64,
    finished: bool,
}

impl Navigator {
    pub fn new(
        start: Vector2D,
        goal: Goal,
        sensor: RangeSensor,
        vision_radius: f64,
        step_size: f64,
    ) -> Result<Self, ConfigError> {
        if !(vision_radius.is_finite() && vision_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "vision radius must be positive, got {}",
                vision_radius
            )));
        }
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "step size must be positive, got {}",
                step_size
            )));
        }
        if sensor.ray_resolution() > vision_radius {
            // Rays would take no samples and every obstacle would go unseen.
            return Err(ConfigError::Invalid(format!(
                "ray resolution {} exceeds vision radius {}",
                sensor.ray_resolution(),
                vision_radius
            )));
        }
        if !start.is_finite() || !goal.center.is_finite() {
            return Err(ConfigError::Invalid(
                "start and goal must be finite".to_string(),
            ));
        }

        Ok(Navigator {
            goal,
            sensor,
            vision_radius,
            step_size,
            robot_radius: 0.0,
            state: RobotState::new(start, &goal),
            ticks: 0,
            finished: false,
        })
    }

    /// Radius of the drawn robot disc. Navigation treats the robot as a point.
    pub fn with_robot_radius(mut self, robot_radius: f64) -> Self {
        self.robot_radius = robot_radius;
        self
    }

    pub fn state(&self) -> &RobotState {
        &self.state
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn sensor(&self) -> &RangeSensor {
        &self.sensor
    }

    pub fn vision_radius(&self) -> f64 {
        self.vision_radius
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn snapshot(&self) -> NavigatorSnapshot {
        NavigatorSnapshot {
            position: self.state.position,
            mode: self.state.mode,
            point_being_pursued: self.state.point_being_pursued,
            vision_radius: self.vision_radius,
            robot_radius: self.robot_radius,
            tick: self.ticks,
        }
    }

    /// Advances the robot by one decision.
    ///
    /// Returns [`NavigationError::Finished`] if called again after the goal
    /// was reached. A tick that fails leaves the navigator unchanged.
    pub fn tick(&mut self, world: &ObstacleWorld) -> Result<TickResult, NavigationError> {
        if self.finished {
            return Err(NavigationError::Finished);
        }
        let previous_distance = self.state.distance_to_goal;

        if previous_distance <= self.step_size {
            self.begin_tick(previous_distance);
            self.state.position = self.goal.center;
            self.state.point_being_pursued = self.goal.center;
            self.state.refresh_goal(&self.goal);
            self.finished = true;
            info!("tick {}: goal reached at {}", self.ticks, self.goal.center);
            return Ok(TickResult {
                still_running: false,
                status: TickStatus::GoalReached,
                mode_switch: None,
            });
        }

        let position = self.state.position;
        let path_clear = self.state.mode == Mode::Direct
            && self
                .sensor
                .raycast(position, self.state.goal_direction, self.vision_radius, world)
                .is_none();

        let status = if path_clear {
            self.begin_tick(previous_distance);
            self.state.position += self.state.goal_direction * self.step_size;
            self.state.refresh_goal(&self.goal);
            self.state.point_being_pursued =
                self.state.position + self.state.goal_direction * self.vision_radius;
            debug!("tick {}: direct to {}", self.ticks, self.state.position);
            TickStatus::MovedDirect
        } else {
            let candidates = self.sensor.boundary_scan(position, self.vision_radius, world);
            let heading = match self.state.mode {
                Mode::BoundaryFollowing => Some(self.state.last_direction),
                Mode::Direct => None,
            };

            let Some(target) = select_candidate(position, self.goal.center, &candidates, heading)
            else {
                self.begin_tick(previous_distance);
                warn!(
                    "tick {}: stalled at {} ({} tangent points, none usable)",
                    self.ticks,
                    position,
                    candidates.len()
                );
                return Ok(TickResult::running(TickStatus::Stalled, None));
            };

            self.pursue(target, previous_distance)?;
            debug!(
                "tick {}: {} tangent points, pursuing {}",
                self.ticks,
                candidates.len(),
                target
            );
            TickStatus::PursuedTangent { target }
        };

        let mode_switch = self.update_mode();
        Ok(TickResult::running(status, mode_switch))
    }

    /// Counts the tick and remembers the goal distance it started from.
    fn begin_tick(&mut self, previous_distance: f64) {
        self.ticks += 1;
        self.state.last_distance_to_goal = previous_distance;
    }

    /// Steps toward `target` and records it as the pursued point. Nothing is
    /// touched when `target` gives no direction.
    fn pursue(&mut self, target: Vector2D, previous_distance: f64) -> Result<(), NavigationError> {
        let position = self.state.position;
        let heading = (target - position)
            .normalize()
            .map_err(|_| NavigationError::DegenerateDirection { position, target })?;

        self.begin_tick(previous_distance);
        self.state.reach_distance = self.goal.distance_from(target);
        self.state.position += heading * self.step_size;
        self.state.refresh_goal(&self.goal);
        if let Ok(direction) = (target - self.state.position).normalize() {
            self.state.last_direction = direction;
        }
        self.state.point_being_pursued = target;
        Ok(())
    }

    fn update_mode(&mut self) -> Option<Mode> {
        let state = &mut self.state;
        let next = match state.mode {
            Mode::Direct if state.distance_to_goal > state.last_distance_to_goal => {
                state.followed_distance = state.reach_distance;
                Mode::BoundaryFollowing
            }
            Mode::BoundaryFollowing if state.reach_distance < state.followed_distance => {
                Mode::Direct
            }
            _ => return None,
        };

        info!(
            "tick {}: {} -> {} at {} (reach {:.4}, followed {:.4})",
            self.ticks,
            state.mode,
            next,
            state.position,
            state.reach_distance,
            state.followed_distance
        );
        state.mode = next;
        Some(next)
    }
}

/// Picks the tangent point minimizing `|p - position| + |goal - p|`.
///
/// With `heading` set, points whose direction from `position` points back
/// against it by more than [`DIRECTION_TOLERANCE`] are skipped. Ties resolve
/// to the earliest candidate.
pub fn select_candidate(
    position: Vector2D,
    goal: Vector2D,
    candidates: &[Vector2D],
    heading: Option<Vector2D>,
) -> Option<Vector2D> {
    candidates
        .iter()
        .copied()
        .filter(|p| match heading {
            Some(h) => (*p - position)
                .normalize()
                .map_or(true, |d| d.dot(&h) >= -DIRECTION_TOLERANCE),
            None => true,
        })
        .min_by_key(|p| OrderedFloat(position.distance(p) + p.distance(&goal)))
}
