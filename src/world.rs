//! # Obstacle World
//!
//! The immutable set of obstacles for one run, plus the combined render mesh
//! assembled from them. Nothing is added, removed, or mutated after
//! construction, so a world can be shared freely between readers.

use crate::obstacle::{Mesh, Obstacle};
use crate::structs::Vector2D;

#[derive(Debug, Clone, Default)]
pub struct ObstacleWorld {
    obstacles: Vec<Obstacle>,
    mesh: Mesh,
}

impl ObstacleWorld {
    /// Builds the world and concatenates every obstacle mesh into one vertex
    /// buffer and one index buffer, offsetting each obstacle's indices by the
    /// number of vertices emitted before it.
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        let vertex_count: usize = obstacles.iter().map(|o| o.boundary_vertices().len()).sum();
        let triangle_count: usize = obstacles
            .iter()
            .map(|o| o.boundary_triangulation().len())
            .sum();

        let mut mesh = Mesh {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        };

        for obstacle in &obstacles {
            let offset = mesh.vertices.len() as u32;
            mesh.vertices.extend_from_slice(obstacle.boundary_vertices());
            mesh.triangles.extend(
                obstacle
                    .boundary_triangulation()
                    .iter()
                    .map(|[a, b, c]| [a + offset, b + offset, c + offset]),
            );
        }

        ObstacleWorld { obstacles, mesh }
    }

    pub fn contains_any(&self, point: Vector2D) -> bool {
        self.obstacles.iter().any(|o| o.contains(point))
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Combined triangle mesh of every obstacle, in insertion order.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl FromIterator<Obstacle> for ObstacleWorld {
    fn from_iter<I: IntoIterator<Item = Obstacle>>(iter: I) -> Self {
        ObstacleWorld::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ObstacleWorld {
    type Item = &'a Obstacle;
    type IntoIter = std::slice::Iter<'a, Obstacle>;

    fn into_iter(self) -> Self::IntoIter {
        self.obstacles.iter()
    }
}
