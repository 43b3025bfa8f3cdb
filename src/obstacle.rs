//! # Obstacle Model
//!
//! Static obstacles the robot must avoid. Two shapes are supported:
//!
//! - **Circle**: a disc given by center and radius
//! - **Polygon**: a convex polygon given by its ordered vertices (either winding)
//!
//! Both answer the single question the navigator asks, `contains(point)`, and
//! carry a triangle mesh built once at construction for whoever draws the
//! scene. Points exactly on a boundary count as outside for both shapes.

use crate::error::GeometryError;
use crate::structs::Vector2D;
use std::f64::consts::TAU;

/// Number of perimeter points used to tessellate a disc.
pub const POINTS_PER_CIRCLE: usize = 50;

/// Triangle mesh with indices local to `vertices`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Vector2D>,
    pub triangles: Vec<[u32; 3]>,
}

/// Tessellates a disc as a triangle fan around its center.
///
/// Vertex 0 is the center, followed by `POINTS_PER_CIRCLE` perimeter points
/// whose first and last entries coincide at angle 0. The final triangle closes
/// the fan back onto vertex 1.
pub fn circle_mesh(center: Vector2D, radius: f64) -> Mesh {
    let theta_step = TAU / (POINTS_PER_CIRCLE - 1) as f64;

    let mut vertices = Vec::with_capacity(POINTS_PER_CIRCLE + 1);
    vertices.push(center);
    for i in 0..POINTS_PER_CIRCLE {
        vertices.push(center + Vector2D::from_angle(theta_step * i as f64) * radius);
    }

    let n = POINTS_PER_CIRCLE as u32;
    let mut triangles: Vec<[u32; 3]> = (0..n - 1).map(|i| [0, i + 1, i + 2]).collect();
    triangles.push([0, n, 1]);

    Mesh { vertices, triangles }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Vector2D,
    radius: f64,
    mesh: Mesh,
}

impl Circle {
    pub fn new(center: Vector2D, radius: f64) -> Result<Self, GeometryError> {
        if !center.is_finite() || !radius.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if radius <= 0.0 {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Circle {
            center,
            radius,
            mesh: circle_mesh(center, radius),
        })
    }

    pub fn center(&self) -> Vector2D {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        (point - self.center).magnitude() < self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vector2D>,
    edges: Vec<Vector2D>,
    mesh: Mesh,
}

impl Polygon {
    /// Builds a convex polygon from ordered vertices.
    ///
    /// Rejects fewer than three vertices, non-finite coordinates, and outlines
    /// that are not strictly convex (collinear runs included), since the
    /// edge-sign containment test is only valid for strictly convex shapes.
    pub fn new(vertices: Vec<Vector2D>) -> Result<Self, GeometryError> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::NonFinite);
        }

        let n = vertices.len();
        let edges: Vec<Vector2D> = (0..n).map(|i| vertices[(i + 1) % n] - vertices[i]).collect();

        let turns: Vec<f64> = (0..n).map(|i| edges[i].cross(&edges[(i + 1) % n])).collect();
        let all_left = turns.iter().all(|&t| t > 0.0);
        let all_right = turns.iter().all(|&t| t < 0.0);
        if !(all_left || all_right) {
            return Err(GeometryError::NotConvex);
        }

        let last = n as u32 - 1;
        let mesh = Mesh {
            vertices: vertices.clone(),
            triangles: (1..last).map(|i| [0, i, i + 1]).collect(),
        };

        Ok(Polygon {
            vertices,
            edges,
            mesh,
        })
    }

    pub fn triangle(a: Vector2D, b: Vector2D, c: Vector2D) -> Result<Self, GeometryError> {
        Polygon::new(vec![a, b, c])
    }

    pub fn vertices(&self) -> &[Vector2D] {
        &self.vertices
    }

    /// Inside iff `edge × (p - edge_start)` has the same strict sign for every edge.
    pub fn contains(&self, point: Vector2D) -> bool {
        let mut positive = 0;
        let mut negative = 0;
        for (start, edge) in self.vertices.iter().zip(&self.edges) {
            let side = edge.cross(&(point - *start));
            if side > 0.0 {
                positive += 1;
            } else if side < 0.0 {
                negative += 1;
            } else {
                return false;
            }
        }
        positive == self.edges.len() || negative == self.edges.len()
    }
}

/// A static obstacle.
#[derive(Debug, Clone, PartialEq)]
pub enum Obstacle {
    Circle(Circle),
    Polygon(Polygon),
}

impl Obstacle {
    pub fn circle(center: Vector2D, radius: f64) -> Result<Self, GeometryError> {
        Circle::new(center, radius).map(Obstacle::Circle)
    }

    pub fn polygon(vertices: Vec<Vector2D>) -> Result<Self, GeometryError> {
        Polygon::new(vertices).map(Obstacle::Polygon)
    }

    pub fn triangle(a: Vector2D, b: Vector2D, c: Vector2D) -> Result<Self, GeometryError> {
        Polygon::triangle(a, b, c).map(Obstacle::Polygon)
    }

    pub fn contains(&self, point: Vector2D) -> bool {
        match self {
            Obstacle::Circle(circle) => circle.contains(point),
            Obstacle::Polygon(polygon) => polygon.contains(point),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        match self {
            Obstacle::Circle(circle) => &circle.mesh,
            Obstacle::Polygon(polygon) => &polygon.mesh,
        }
    }

    pub fn boundary_vertices(&self) -> &[Vector2D] {
        &self.mesh().vertices
    }

    pub fn boundary_triangulation(&self) -> &[[u32; 3]] {
        &self.mesh().triangles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn unit_circle() -> Obstacle {
        Obstacle::circle(Vector2D::new(0.0, 0.0), 1.0).unwrap()
    }

    // ==================== Circle Tests ====================

    #[rstest]
    #[case(0.0, 0.0, true)]
    #[case(0.5, 0.5, true)]
    #[case(0.99, 0.0, true)]
    #[case(1.0, 0.0, false)]
    #[case(0.0, -1.0, false)]
    #[case(-0.6, 0.8, false)]
    #[case(1.01, 0.0, false)]
    #[case(2.0, 2.0, false)]
    fn test_circle_contains(#[case] x: f64, #[case] y: f64, #[case] expected: bool) {
        assert_eq!(unit_circle().contains(Vector2D::new(x, y)), expected);
    }

    #[test]
    fn test_circle_contains_matches_distance_on_grid() {
        let center = Vector2D::new(0.2, -0.3);
        let radius = 0.5;
        let circle = Obstacle::circle(center, radius).unwrap();
        for i in -10..=10 {
            for j in -10..=10 {
                let p = Vector2D::new(0.2 + i as f64 * 0.05, -0.3 + j as f64 * 0.05);
                assert_eq!(
                    circle.contains(p),
                    (p - center).magnitude() < radius,
                    "mismatch at {}",
                    p
                );
            }
        }
    }

    #[test]
    fn test_circle_rejects_bad_radius() {
        let c = Vector2D::new(0.0, 0.0);
        assert_eq!(Circle::new(c, 0.0), Err(GeometryError::NonPositiveRadius(0.0)));
        assert_eq!(Circle::new(c, -1.0), Err(GeometryError::NonPositiveRadius(-1.0)));
        assert_eq!(Circle::new(c, f64::NAN), Err(GeometryError::NonFinite));
    }

    #[test]
    fn test_circle_mesh_layout() {
        let mesh = circle_mesh(Vector2D::new(1.0, 2.0), 0.5);
        assert_eq!(mesh.vertices.len(), POINTS_PER_CIRCLE + 1);
        assert_eq!(mesh.triangles.len(), POINTS_PER_CIRCLE);
        assert_eq!(mesh.vertices[0], Vector2D::new(1.0, 2.0));
        assert_eq!(mesh.vertices[1], Vector2D::new(1.5, 2.0));
        assert_eq!(mesh.triangles[0], [0, 1, 2]);
        assert_eq!(mesh.triangles[POINTS_PER_CIRCLE - 1], [0, POINTS_PER_CIRCLE as u32, 1]);
        for v in &mesh.vertices[1..] {
            assert!((v.distance(&Vector2D::new(1.0, 2.0)) - 0.5).abs() < 1e-12);
        }
    }

    // ==================== Polygon Tests ====================

    #[rstest]
    #[case::counter_clockwise(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])]
    #[case::clockwise(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0)])]
    fn test_triangle_contains_either_winding(#[case] corners: Vec<(f64, f64)>) {
        let vertices = corners.into_iter().map(|(x, y)| Vector2D::new(x, y)).collect();
        let tri = Obstacle::polygon(vertices).unwrap();
        assert!(tri.contains(Vector2D::new(0.2, 0.2)));
        assert!(!tri.contains(Vector2D::new(0.6, 0.6)));
        assert!(!tri.contains(Vector2D::new(-0.1, 0.1)));
        // On an edge and on a vertex
        assert!(!tri.contains(Vector2D::new(0.5, 0.0)));
        assert!(!tri.contains(Vector2D::new(0.0, 0.0)));
    }

    #[test]
    fn test_reference_triangle() {
        let tri = Obstacle::triangle(
            Vector2D::new(1.0, -1.0),
            Vector2D::new(0.3, -0.4),
            Vector2D::new(1.0, 0.0),
        )
        .unwrap();
        assert!(tri.contains(Vector2D::new(0.8, -0.4)));
        assert!(!tri.contains(Vector2D::new(0.2, -0.4)));
        assert_eq!(tri.boundary_vertices().len(), 3);
        assert_eq!(tri.boundary_triangulation(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_square_contains_and_fan() {
        let square = Obstacle::polygon(vec![
            Vector2D::new(-1.0, -1.0),
            Vector2D::new(1.0, -1.0),
            Vector2D::new(1.0, 1.0),
            Vector2D::new(-1.0, 1.0),
        ])
        .unwrap();
        assert!(square.contains(Vector2D::new(0.9, 0.9)));
        assert!(!square.contains(Vector2D::new(1.0, 0.0)));
        assert_eq!(square.boundary_triangulation(), &[[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_polygon_rejects_too_few_vertices() {
        let result = Polygon::new(vec![Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 0.0)]);
        assert_eq!(result, Err(GeometryError::TooFewVertices(2)));
    }

    #[test]
    fn test_polygon_rejects_collinear() {
        let result = Polygon::triangle(
            Vector2D::new(0.0, 0.0),
            Vector2D::new(1.0, 1.0),
            Vector2D::new(2.0, 2.0),
        );
        assert_eq!(result, Err(GeometryError::NotConvex));
    }

    #[test]
    fn test_polygon_rejects_concave() {
        let arrow = Polygon::new(vec![
            Vector2D::new(0.0, 0.0),
            Vector2D::new(2.0, 0.0),
            Vector2D::new(1.0, 0.5),
            Vector2D::new(2.0, 1.0),
            Vector2D::new(0.0, 1.0),
        ]);
        assert_eq!(arrow, Err(GeometryError::NotConvex));
    }

    #[test]
    fn test_polygon_rejects_non_finite() {
        let result = Polygon::triangle(
            Vector2D::new(0.0, 0.0),
            Vector2D::new(f64::INFINITY, 0.0),
            Vector2D::new(0.0, 1.0),
        );
        assert_eq!(result, Err(GeometryError::NonFinite));
    }
}
