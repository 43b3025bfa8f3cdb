//! YAML scenario description
//!
//! A scenario bundles everything one run needs: robot start, goal, sensing
//! tunables, the obstacle list and the driver's tick budget. Every field has
//! a default, so an empty mapping (`{}`) describes the two-circle demo.
//!
//! ```yaml
//! robot:
//!   start: {x: 0.0, y: 1.0}
//!   radius: 0.02
//! goal:
//!   center: {x: 0.0, y: -1.0}
//!   radius: 0.02
//! sensing:
//!   vision_radius: 0.1
//!   step_size: 0.01
//!   ray_resolution: 0.003
//!   angle_step: 0.01
//! obstacles:
//!   - {shape: circle, center: {x: 0.0, y: 0.5}, radius: 0.3}
//!   - shape: polygon
//!     vertices: [{x: 0.3, y: -0.4}, {x: 1.0, y: -1.0}, {x: 1.0, y: 0.0}]
//! max_ticks: 2000
//! ```

use crate::error::{ConfigError, GeometryError};
use crate::obstacle::Obstacle;
use crate::sensing::RangeSensor;
use crate::structs::{Goal, Vector2D};
use crate::tangent_bug::Navigator;
use crate::world::ObstacleWorld;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub robot: RobotConfig,
    pub goal: GoalConfig,
    pub sensing: SensingConfig,
    pub obstacles: Vec<ObstacleConfig>,
    /// Tick budget for the driver. The navigator itself never gives up.
    pub max_ticks: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            robot: RobotConfig::default(),
            goal: GoalConfig::default(),
            sensing: SensingConfig::default(),
            obstacles: vec![
                ObstacleConfig::Circle {
                    center: Vector2D::new(0.0, 0.5),
                    radius: 0.3,
                },
                ObstacleConfig::Circle {
                    center: Vector2D::new(0.0, -0.5),
                    radius: 0.3,
                },
            ],
            max_ticks: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub start: Vector2D,
    /// Drawn radius only; the robot navigates as a point.
    pub radius: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            start: Vector2D::new(0.0, 1.0),
            radius: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalConfig {
    pub center: Vector2D,
    pub radius: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            center: Vector2D::new(0.0, -1.0),
            radius: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensingConfig {
    pub vision_radius: f64,
    pub step_size: f64,
    /// Sample spacing along a ray. When it divides `vision_radius` evenly the
    /// last sample of every ray lies on the vision circle, so an obstacle
    /// point sitting exactly that far ahead can block the goal ray while every
    /// scan ray misses, and the robot stalls. On the default geometry any such
    /// spacing (0.001, 0.002, 0.0025, 0.004, ...) stalls at (0, 0.9); 0.003
    /// does not divide 0.1 and reaches the goal.
    pub ray_resolution: f64,
    /// Angular increment of the boundary scan, in radians.
    pub angle_step: f64,
}

impl Default for SensingConfig {
    fn default() -> Self {
        Self {
            vision_radius: 0.1,
            step_size: 0.01,
            ray_resolution: 0.003,
            angle_step: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ObstacleConfig {
    Circle { center: Vector2D, radius: f64 },
    Polygon { vertices: Vec<Vector2D> },
}

impl ObstacleConfig {
    pub fn build(&self) -> Result<Obstacle, GeometryError> {
        match self {
            ObstacleConfig::Circle { center, radius } => Obstacle::circle(*center, *radius),
            ObstacleConfig::Polygon { vertices } => Obstacle::polygon(vertices.clone()),
        }
    }
}

fn require_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

impl ScenarioConfig {
    /// Reads and validates a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: ScenarioConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks tunables, obstacle geometry, and that neither the start nor
    /// the goal lies inside an obstacle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sensing = &self.sensing;
        require_positive("vision_radius", sensing.vision_radius)?;
        require_positive("step_size", sensing.step_size)?;
        require_positive("ray_resolution", sensing.ray_resolution)?;
        require_positive("robot radius", self.robot.radius)?;
        require_positive("goal radius", self.goal.radius)?;

        if sensing.ray_resolution > sensing.vision_radius {
            return Err(ConfigError::Invalid(format!(
                "ray_resolution {} exceeds vision_radius {}",
                sensing.ray_resolution, sensing.vision_radius
            )));
        }
        if !(sensing.angle_step > 0.0 && sensing.angle_step < TAU) {
            return Err(ConfigError::Invalid(format!(
                "angle_step must lie in (0, 2π), got {}",
                sensing.angle_step
            )));
        }
        if self.max_ticks == 0 {
            return Err(ConfigError::Invalid("max_ticks must be at least 1".to_string()));
        }
        if !self.robot.start.is_finite() || !self.goal.center.is_finite() {
            return Err(ConfigError::Invalid(
                "start and goal must be finite".to_string(),
            ));
        }

        let world = self.build_world()?;
        if world.contains_any(self.robot.start) {
            return Err(ConfigError::Invalid(format!(
                "start {} lies inside an obstacle",
                self.robot.start
            )));
        }
        if world.contains_any(self.goal.center) {
            return Err(ConfigError::Invalid(format!(
                "goal {} lies inside an obstacle",
                self.goal.center
            )));
        }
        Ok(())
    }

    pub fn build_world(&self) -> Result<ObstacleWorld, ConfigError> {
        self.obstacles
            .iter()
            .enumerate()
            .map(|(index, obstacle)| {
                obstacle
                    .build()
                    .map_err(|source| ConfigError::Obstacle { index, source })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ObstacleWorld::new)
    }

    pub fn build_sensor(&self) -> Result<RangeSensor, ConfigError> {
        RangeSensor::new(self.sensing.ray_resolution, self.sensing.angle_step)
    }

    pub fn build_navigator(&self) -> Result<Navigator, ConfigError> {
        let goal = Goal::new(self.goal.center, self.goal.radius);
        let navigator = Navigator::new(
            self.robot.start,
            goal,
            self.build_sensor()?,
            self.sensing.vision_radius,
            self.sensing.step_size,
        )?;
        Ok(navigator.with_robot_radius(self.robot.radius))
    }
}
