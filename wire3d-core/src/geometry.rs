/// Geometry primitives for wireframe rendering
use std::collections::BTreeSet;

use nalgebra::Point3;

use crate::error::{WireError, WireResult};
use crate::mesh::faces_to_edges;

/// A point in 3D space. Plain value, compared by coordinates.
pub type Point3D = Point3<f64>;

/// A polygon loop of 0-based vertex indices (triangles, quads or n-gons).
pub type Face = Vec<usize>;

/// An undirected edge between two distinct vertices, stored with `a < b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    a: usize,
    b: usize,
}

impl Edge {
    /// Canonicalize a vertex pair. Returns `None` for a self loop.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { a, b }),
            std::cmp::Ordering::Greater => Some(Self { a: b, b: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The smaller endpoint index.
    pub fn a(&self) -> usize {
        self.a
    }

    /// The larger endpoint index.
    pub fn b(&self) -> usize {
        self.b
    }

    pub fn indices(&self) -> (usize, usize) {
        (self.a, self.b)
    }
}

/// Indexed points plus the edges connecting them.
///
/// A scene is never mutated after construction. Transforms and
/// normalization build a new scene, so a previous animation frame stays
/// valid while the next one is computed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    points: Vec<Point3D>,
    edges: BTreeSet<Edge>,
}

impl Scene {
    /// Build a scene, checking that every edge references an existing point.
    pub fn new(points: Vec<Point3D>, edges: BTreeSet<Edge>) -> WireResult<Self> {
        let len = points.len();
        if let Some(edge) = edges.iter().find(|edge| edge.b >= len) {
            return Err(WireError::IndexOutOfRange { index: edge.b, len });
        }
        Ok(Self { points, edges })
    }

    /// Build a scene from raw index pairs in any winding order.
    pub fn from_pairs<I>(points: Vec<Point3D>, pairs: I) -> WireResult<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let edges = pairs
            .into_iter()
            .map(|(a, b)| Edge::new(a, b).ok_or(WireError::SelfLoop { index: a }))
            .collect::<WireResult<BTreeSet<_>>>()?;
        Self::new(points, edges)
    }

    /// Build a scene from polygon faces, extracting their unique edges.
    pub fn from_faces<F: AsRef<[usize]>>(points: Vec<Point3D>, faces: &[F]) -> WireResult<Self> {
        let edges = faces_to_edges(faces)?;
        Self::new(points, edges)
    }

    /// Same topology, new positions. Callers keep the point count intact.
    pub(crate) fn with_points(&self, points: Vec<Point3D>) -> Self {
        debug_assert_eq!(points.len(), self.points.len());
        Self {
            points,
            edges: self.edges.clone(),
        }
    }

    pub fn points(&self) -> &[Point3D] {
        &self.points
    }

    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Endpoints of every edge as point pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Point3D, &Point3D)> + '_ {
        self.edges
            .iter()
            .map(move |edge| (&self.points[edge.a], &self.points[edge.b]))
    }

    /// A 2x2x2 cube spanning z in [3, 5], already in front of the camera
    pub fn cube() -> Self {
        let points = vec![
            Point3D::new(-1.0, -1.0, 3.0),
            Point3D::new(1.0, -1.0, 3.0),
            Point3D::new(1.0, 1.0, 3.0),
            Point3D::new(-1.0, 1.0, 3.0),
            Point3D::new(-1.0, -1.0, 5.0),
            Point3D::new(1.0, -1.0, 5.0),
            Point3D::new(1.0, 1.0, 5.0),
            Point3D::new(-1.0, 1.0, 5.0),
        ];
        let pairs = [
            // Front face
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            // Back face
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            // Connecting edges
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];
        Self::from_static(points, &pairs)
    }

    /// A square-based pyramid with its apex pointing up
    pub fn pyramid() -> Self {
        let points = vec![
            Point3D::new(-1.0, 0.0, 3.0),
            Point3D::new(1.0, 0.0, 3.0),
            Point3D::new(1.0, 0.0, 5.0),
            Point3D::new(-1.0, 0.0, 5.0),
            Point3D::new(0.0, 2.0, 4.0),
        ];
        let pairs = [
            // Base
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            // Sides to apex
            (0, 4),
            (1, 4),
            (2, 4),
            (3, 4),
        ];
        Self::from_static(points, &pairs)
    }

    fn from_static(points: Vec<Point3D>, pairs: &[(usize, usize)]) -> Self {
        let edges = pairs
            .iter()
            .filter_map(|&(a, b)| Edge::new(a, b))
            .collect();
        Self { points, edges }
    }
}
