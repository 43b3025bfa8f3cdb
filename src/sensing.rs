//! # Sensing Primitives
//!
//! The robot only perceives obstacles inside its vision disk. Two probes are
//! built on the world's containment test:
//!
//! - **Raycast**: march from an origin along a unit direction in fixed steps of
//!   `ray_resolution` and report the first sample that lies inside an obstacle.
//!   This is a sampled approximation of exact ray intersection; the reported
//!   hit can sit up to one resolution step past the true boundary, and every
//!   distance comparison made by the navigator inherits that bias.
//! - **Boundary scan** (circle cast): sweep a ray around the full circle in
//!   increments of `angle_step` and record the tangent points bounding every
//!   obstacle silhouette seen within the vision radius.
//!
//! ## Tangent points
//!
//! While sweeping counter-clockwise from angle 0, the scan tracks whether the
//! current ray is blocked:
//!
//! ```text
//!   free  -> blocked : entry, record the previous (free) ray's end point
//!   blocked -> free  : exit, record the current (free) ray's end point
//! ```
//!
//! Both kinds are free-space points at the edge of the vision disk, flanking a
//! silhouette; points strictly inside a silhouette are never candidates since
//! motion straight toward them is blocked. The sweep closes on itself: the
//! final sample at 2π is the angle-0 ray again, so a silhouette straddling the
//! positive x axis still yields both of its tangent points.
//!
//! Both probes are pure functions of their inputs and the immutable world.

use crate::error::ConfigError;
use crate::structs::Vector2D;
use crate::world::ObstacleWorld;
use std::f64::consts::TAU;

/// Outcome of marching a single ray.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RayTrace {
    /// First blocked sample, or the last free sample when nothing was hit.
    point: Vector2D,
    hit: bool,
}

/// Sampling resolution of the robot's range sensing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSensor {
    ray_resolution: f64,
    angle_step: f64,
}

impl RangeSensor {
    pub fn new(ray_resolution: f64, angle_step: f64) -> Result<Self, ConfigError> {
        if !(ray_resolution.is_finite() && ray_resolution > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "ray resolution must be positive, got {}",
                ray_resolution
            )));
        }
        if !(angle_step.is_finite() && angle_step > 0.0 && angle_step < TAU) {
            return Err(ConfigError::Invalid(format!(
                "angle step must lie in (0, 2π), got {}",
                angle_step
            )));
        }
        Ok(RangeSensor {
            ray_resolution,
            angle_step,
        })
    }

    pub fn ray_resolution(&self) -> f64 {
        self.ray_resolution
    }

    pub fn angle_step(&self) -> f64 {
        self.angle_step
    }

    /// Number of samples a ray of length `max_radius` takes.
    pub fn samples_per_ray(&self, max_radius: f64) -> usize {
        if max_radius <= 0.0 {
            return 0;
        }
        (max_radius / self.ray_resolution).floor() as usize
    }

    /// Casts a single ray; `direction` must be a unit vector.
    ///
    /// Returns the first sample inside an obstacle, or `None` once
    /// `floor(max_radius / ray_resolution)` samples have all been free.
    pub fn raycast(
        &self,
        origin: Vector2D,
        direction: Vector2D,
        max_radius: f64,
        world: &ObstacleWorld,
    ) -> Option<Vector2D> {
        let trace = self.trace(origin, direction, max_radius, world);
        trace.hit.then_some(trace.point)
    }

    /// Sweeps the vision disk and returns silhouette tangent points in
    /// discovery order, starting near angle 0. Empty when no obstacle
    /// intersects the disk.
    pub fn boundary_scan(
        &self,
        origin: Vector2D,
        vision_radius: f64,
        world: &ObstacleWorld,
    ) -> Vec<Vector2D> {
        let mut tangent_points = Vec::new();

        let first = self.trace(origin, Vector2D::new(1.0, 0.0), vision_radius, world);
        let mut previous = first;

        let mut k = 1usize;
        loop {
            let angle = self.angle_step * k as f64;
            if angle >= TAU {
                break;
            }
            let current = self.trace(origin, Vector2D::from_angle(angle), vision_radius, world);
            record_transition(&mut tangent_points, &previous, &current);
            previous = current;
            k += 1;
        }
        record_transition(&mut tangent_points, &previous, &first);

        log::trace!(
            "boundary scan at {}: {} rays, {} tangent points",
            origin,
            k,
            tangent_points.len()
        );
        tangent_points
    }

    fn trace(
        &self,
        origin: Vector2D,
        direction: Vector2D,
        max_radius: f64,
        world: &ObstacleWorld,
    ) -> RayTrace {
        let mut point = origin;
        for i in 1..=self.samples_per_ray(max_radius) {
            point = origin + direction * (self.ray_resolution * i as f64);
            if world.contains_any(point) {
                return RayTrace { point, hit: true };
            }
        }
        RayTrace { point, hit: false }
    }
}

fn record_transition(out: &mut Vec<Vector2D>, previous: &RayTrace, current: &RayTrace) {
    match (previous.hit, current.hit) {
        (false, true) => out.push(previous.point),
        (true, false) => out.push(current.point),
        _ => {}
    }
}
