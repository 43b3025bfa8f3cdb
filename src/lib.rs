//! # Tangent Bug
//!
//! Local-sensing navigation for a point robot in a plane of static obstacles,
//! with optional Python bindings.
//!
//! ## Components
//!
//! - **Obstacles and world**: circles and convex polygons with strict point
//!   containment and a render mesh, collected into an immutable world.
//! - **Sensing**: sampled raycasts and a full-circle boundary scan that
//!   reports silhouette tangent points inside the vision radius.
//! - **Navigator**: the Tangent-Bug state machine, alternating between
//!   direct goal-seeking motion and boundary following.
//! - **Simulation**: tick driver with a budget, run reports and snapshots.
//!
//! ## Usage
//!
//! ```no_run
//! use tangent_bug::{ScenarioConfig, Simulation};
//!
//! let config = ScenarioConfig::load("scenarios/default.yaml")?;
//! let mut sim = Simulation::from_config(&config)?;
//! let report = sim.run_to_completion()?;
//! println!("{:?} after {} ticks", report.outcome, report.ticks);
//! # Ok::<(), tangent_bug::TangentBugError>(())
//! ```

pub mod config;
pub mod error;
pub mod obstacle;
pub mod sensing;
pub mod simulation;
pub mod structs;
pub mod tangent_bug;
pub mod world;

#[cfg(feature = "python")]
mod python;

pub use config::{ObstacleConfig, ScenarioConfig};
pub use error::{ConfigError, GeometryError, NavigationError, Result, TangentBugError};
pub use obstacle::{circle_mesh, Circle, Mesh, Obstacle, Polygon};
pub use sensing::RangeSensor;
pub use simulation::{ModeSwitch, RunOutcome, RunReport, Simulation};
pub use structs::{Goal, Mode, RobotState, Vector2D};
pub use tangent_bug::{Navigator, NavigatorSnapshot, TickResult, TickStatus};
pub use world::ObstacleWorld;

/// Total length of a polyline.
pub fn path_length(path: &[Vector2D]) -> f64 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Tests for path_length ---

    #[test]
    fn test_path_length_empty() {
        assert_eq!(path_length(&[]), 0.0, "Empty path should have zero length");
    }

    #[test]
    fn test_path_length_single_point() {
        let path = vec![Vector2D::new(1.0, 2.0)];
        assert_eq!(path_length(&path), 0.0, "Single point path should have zero length");
    }

    #[test]
    fn test_path_length_straight_line() {
        let path = vec![
            Vector2D::new(0.0, 0.0),
            Vector2D::new(1.0, 0.0),
            Vector2D::new(2.0, 0.0),
            Vector2D::new(3.0, 0.0),
        ];
        assert_eq!(path_length(&path), 3.0, "Straight line should sum unit segments");
    }

    #[test]
    fn test_path_length_diagonal() {
        let path = vec![Vector2D::new(0.0, 0.0), Vector2D::new(3.0, 4.0)];
        assert_eq!(path_length(&path), 5.0, "3-4-5 triangle hypotenuse");
    }

    #[test]
    fn test_path_length_stationary_segments() {
        let path = vec![
            Vector2D::new(0.0, 0.0),
            Vector2D::new(0.0, 0.0),
            Vector2D::new(0.0, 1.0),
        ];
        assert_eq!(path_length(&path), 1.0, "Repeated points add nothing");
    }
}
