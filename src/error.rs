//! Error types for the Tangent-Bug navigator

use crate::structs::Vector2D;
use thiserror::Error;

/// Invalid or degenerate geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("cannot normalize a zero-length vector")]
    DegenerateDirection,

    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon is not strictly convex")]
    NotConvex,

    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("coordinates must be finite")]
    NonFinite,
}

/// Failures raised by a single navigation tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    #[error("no direction from {position} toward {target}")]
    DegenerateDirection { position: Vector2D, target: Vector2D },

    #[error("navigator already reached the goal")]
    Finished,
}

/// Scenario loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid scenario: {0}")]
    Invalid(String),

    #[error("invalid obstacle #{index}: {source}")]
    Obstacle {
        index: usize,
        #[source]
        source: GeometryError,
    },
}

/// Umbrella error for the crate's public entry points.
#[derive(Error, Debug)]
pub enum TangentBugError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = TangentBugError> = std::result::Result<T, E>;
