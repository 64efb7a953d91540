/// Pinhole camera projection and viewport mapping
use crate::error::{WireError, WireResult};
use crate::geometry::{Point3D, Scene};

/// Project a point with the default near-plane clamp.
///
/// See [`project_with_clamp`].
pub fn project(point: &Point3D, focal_length: f64) -> (f64, f64) {
    project_with_clamp(point, focal_length, Camera::DEFAULT_NEAR_CLAMP)
}

/// Perspective divide: `(f * x / z, f * y / z)` with `z` clamped to at
/// least `near_clamp`.
///
/// Points on or behind the camera plane are not culled; they project to
/// large but finite coordinates.
pub fn project_with_clamp(point: &Point3D, focal_length: f64, near_clamp: f64) -> (f64, f64) {
    let z = point.z.max(near_clamp);
    (focal_length * point.x / z, focal_length * point.y / z)
}

/// Camera configuration for wireframe rendering.
///
/// `focal_length` above 1 narrows the field of view with less distortion
/// at the edges, below 1 widens it with more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub focal_length: f64,
    pub near_clamp: f64,
}

impl Camera {
    /// Smallest depth used in the perspective divide
    pub const DEFAULT_NEAR_CLAMP: f64 = 0.1;

    pub fn new(focal_length: f64) -> Self {
        Self {
            focal_length,
            near_clamp: Self::DEFAULT_NEAR_CLAMP,
        }
    }

    pub fn validate(&self) -> WireResult<()> {
        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(WireError::InvalidConfig(format!(
                "focal length must be positive and finite, got {}",
                self.focal_length
            )));
        }
        if !(self.near_clamp.is_finite() && self.near_clamp > 0.0) {
            return Err(WireError::InvalidConfig(format!(
                "near clamp must be positive and finite, got {}",
                self.near_clamp
            )));
        }
        Ok(())
    }

    /// Project a 3D point to 2D viewport coordinates
    pub fn project(&self, point: &Point3D) -> (f64, f64) {
        project_with_clamp(point, self.focal_length, self.near_clamp)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// A projected line segment in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2D {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl Segment2D {
    pub fn is_finite(&self) -> bool {
        [self.start.0, self.start.1, self.end.0, self.end.1]
            .iter()
            .all(|c| c.is_finite())
    }
}

/// Project every vertex once and emit one segment per edge
pub fn project_scene(scene: &Scene, camera: &Camera) -> Vec<Segment2D> {
    let projected: Vec<(f64, f64)> = scene.points().iter().map(|p| camera.project(p)).collect();
    scene
        .edges()
        .iter()
        .map(|edge| Segment2D {
            start: projected[edge.a()],
            end: projected[edge.b()],
        })
        .collect()
}

/// Visible 2D region `[-half_width, half_width] x [-half_height, half_height]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub half_width: f64,
    pub half_height: f64,
}

impl Viewport {
    pub fn new(half_width: f64, half_height: f64) -> Self {
        Self {
            half_width,
            half_height,
        }
    }

    pub fn validate(&self) -> WireResult<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !(ok(self.half_width) && ok(self.half_height)) {
            return Err(WireError::InvalidConfig(format!(
                "viewport must be positive and finite, got {} x {}",
                self.half_width, self.half_height
            )));
        }
        Ok(())
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x.abs() <= self.half_width && y.abs() <= self.half_height
    }

    /// Map viewport coordinates onto a `cols x rows` grid.
    ///
    /// Column 0 is the left edge and row 0 the top edge, so y is flipped.
    /// The result may fall outside the grid; callers clip.
    pub fn to_screen(&self, x: f64, y: f64, cols: usize, rows: usize) -> (f64, f64) {
        let sx = (x + self.half_width) / (2.0 * self.half_width) * (cols as f64 - 1.0);
        let sy = (self.half_height - y) / (2.0 * self.half_height) * (rows as f64 - 1.0);
        (sx, sy)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(5.0, 5.0)
    }
}
