//! # Core Data Structures
//!
//! This module defines the fundamental data types used throughout the library:
//!
//! - **Vector2D**: 2D position/direction in continuous plane coordinates
//! - **Goal**: Fixed goal disc the robot is driven toward
//! - **Mode**: The two control modes of the Tangent-Bug controller
//! - **RobotState**: Complete mutable state of the robot (pose, mode, bookkeeping)

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Unit vector at `angle` radians from the positive x axis.
    pub fn from_angle(angle: f64) -> Self {
        Vector2D {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: &Vector2D) -> f64 {
        (*other - *self).magnitude()
    }

    /// Returns `self / |self|`.
    ///
    /// The zero vector has no direction; instead of producing NaN components
    /// this reports [`GeometryError::DegenerateDirection`].
    pub fn normalize(&self) -> Result<Vector2D, GeometryError> {
        let mag = self.magnitude();
        if mag > 0.0 && mag.is_finite() {
            Ok(Vector2D {
                x: self.x / mag,
                y: self.y / mag,
            })
        } else {
            Err(GeometryError::DegenerateDirection)
        }
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar 2D cross product `x1*y2 - y1*x2`.
    pub fn cross(&self, other: &Vector2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

impl Add for Vector2D {
    type Output = Vector2D;

    fn add(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Vector2D) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector2D {
    type Output = Vector2D;

    fn sub(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;

    fn neg(self) -> Vector2D {
        Vector2D {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// Component-wise product.
impl Mul for Vector2D {
    type Output = Vector2D;

    fn mul(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }
}

impl Mul<f64> for Vector2D {
    type Output = Vector2D;

    fn mul(self, scalar: f64) -> Vector2D {
        Vector2D {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Component-wise quotient.
impl Div for Vector2D {
    type Output = Vector2D;

    fn div(self, other: Vector2D) -> Vector2D {
        Vector2D {
            x: self.x / other.x,
            y: self.y / other.y,
        }
    }
}

impl Div<f64> for Vector2D {
    type Output = Vector2D;

    fn div(self, scalar: f64) -> Vector2D {
        Vector2D {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

/// The fixed target disc. Only its center takes part in navigation;
/// the radius is carried for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub center: Vector2D,
    pub radius: f64,
}

impl Goal {
    pub fn new(center: Vector2D, radius: f64) -> Self {
        Goal { center, radius }
    }

    pub fn distance_from(&self, point: Vector2D) -> f64 {
        point.distance(&self.center)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Heading straight for the goal.
    Direct,
    /// Pursuing silhouette tangent points around an obstacle.
    BoundaryFollowing,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Direct => write!(f, "direct"),
            Mode::BoundaryFollowing => write!(f, "boundary-following"),
        }
    }
}

/// Mutable robot state owned by the navigator.
///
/// `reach_distance` and `followed_distance` start at infinity so the leave
/// condition (`reach_distance < followed_distance`) can never fire before a
/// boundary point has actually been chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotState {
    pub position: Vector2D,
    pub mode: Mode,
    pub goal_direction: Vector2D,
    pub distance_to_goal: f64,
    pub last_distance_to_goal: f64,
    pub reach_distance: f64,
    pub followed_distance: f64,
    pub last_direction: Vector2D,
    pub point_being_pursued: Vector2D,
}

impl RobotState {
    pub fn new(start: Vector2D, goal: &Goal) -> Self {
        let to_goal = goal.center - start;
        RobotState {
            position: start,
            mode: Mode::Direct,
            // A robot spawned on the goal snaps on its first tick, so the
            // direction is never consulted in that case.
            goal_direction: to_goal.normalize().unwrap_or(Vector2D::ZERO),
            distance_to_goal: to_goal.magnitude(),
            last_distance_to_goal: f64::INFINITY,
            reach_distance: f64::INFINITY,
            followed_distance: f64::INFINITY,
            last_direction: Vector2D::ZERO,
            point_being_pursued: start,
        }
    }

    /// Re-derives the goal bookkeeping after `position` has changed.
    ///
    /// `goal_direction` keeps its previous value when the robot sits exactly
    /// on the goal.
    pub(crate) fn refresh_goal(&mut self, goal: &Goal) {
        let to_goal = goal.center - self.position;
        self.distance_to_goal = to_goal.magnitude();
        if let Ok(direction) = to_goal.normalize() {
            self.goal_direction = direction;
        }
    }
}
