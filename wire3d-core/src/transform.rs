/// Rigid rotations about the Y axis and the turntable animation
use nalgebra::{Rotation3, Vector3};
use tracing::debug;

use crate::geometry::{Point3D, Scene};

/// Rotation about +Y by `angle_degrees`, right-handed.
///
/// For a point `(x, y, z)` this gives `x' = x cos θ + z sin θ`, `y' = y`,
/// `z' = -x sin θ + z cos θ`, so `(1, 0, 0)` turned by 90° lands on
/// `(0, 0, -1)`.
pub fn y_rotation(angle_degrees: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle_degrees.to_radians())
}

/// Rotate every point about the vertical axis through `pivot`
pub fn rotate_around_y(points: &[Point3D], angle_degrees: f64, pivot: &Point3D) -> Vec<Point3D> {
    let rotation = y_rotation(angle_degrees);
    points
        .iter()
        .map(|point| pivot + rotation * (point - pivot))
        .collect()
}

/// Rotate every point about the world Y axis
pub fn rotate_around_origin(points: &[Point3D], angle_degrees: f64) -> Vec<Point3D> {
    rotate_around_y(points, angle_degrees, &Point3D::origin())
}

/// Arithmetic mean of the points, or `None` for an empty slice
pub fn centroid(points: &[Point3D]) -> Option<Point3D> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, point| acc + point.coords);
    Some(Point3D::from(sum / points.len() as f64))
}

/// Rotate the points about the vertical axis through their own centroid.
///
/// The object spins in place: the centroid of the output equals the
/// centroid of the input. An empty slice comes back empty.
pub fn rotate_around_own_center(points: &[Point3D], angle_degrees: f64) -> Vec<Point3D> {
    match centroid(points) {
        Some(center) => rotate_around_y(points, angle_degrees, &center),
        None => {
            debug!("no points to rotate, centroid undefined");
            Vec::new()
        }
    }
}

impl Scene {
    /// A copy of this scene spun about its own centroid
    pub fn rotated_about_center(&self, angle_degrees: f64) -> Scene {
        self.with_points(rotate_around_own_center(self.points(), angle_degrees))
    }
}

/// Endless frame source that spins a scene a fixed step per frame.
///
/// Each frame is computed from the previous one, not from the first scene,
/// and every yielded scene is an independent value.
#[derive(Debug, Clone)]
pub struct Turntable {
    current: Scene,
    step_degrees: f64,
}

impl Turntable {
    pub fn new(scene: Scene, step_degrees: f64) -> Self {
        Self {
            current: scene,
            step_degrees,
        }
    }

    /// The most recently produced frame
    pub fn current(&self) -> &Scene {
        &self.current
    }

    pub fn step_degrees(&self) -> f64 {
        self.step_degrees
    }

    /// Change the per-frame step, e.g. to reverse direction
    pub fn set_step_degrees(&mut self, step_degrees: f64) {
        self.step_degrees = step_degrees;
    }

    /// Replace the current frame with the next one and borrow it
    pub fn advance(&mut self) -> &Scene {
        self.current = self.current.rotated_about_center(self.step_degrees);
        &self.current
    }
}

impl Iterator for Turntable {
    type Item = Scene;

    fn next(&mut self) -> Option<Scene> {
        Some(self.advance().clone())
    }
}
