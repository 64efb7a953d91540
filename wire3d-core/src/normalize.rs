/// Bounding-box normalization into a camera-facing volume
use nalgebra::Vector3;
use tracing::{debug, warn};

use crate::error::{WireError, WireResult};
use crate::geometry::{Point3D, Scene};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3D,
    /// Maximum corner.
    pub max: Point3D,
}

impl Aabb {
    /// Smallest box holding every point, or `None` for no points.
    pub fn from_points(points: &[Point3D]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let bounds = rest.iter().fold(
            Self {
                min: *first,
                max: *first,
            },
            |acc, p| Self {
                min: acc.min.inf(p),
                max: acc.max.sup(p),
            },
        );
        Some(bounds)
    }

    /// Midpoint per axis.
    pub fn center(&self) -> Point3D {
        nalgebra::center(&self.min, &self.max)
    }

    /// Half the box size per axis.
    pub fn half_extents(&self) -> Vector3<f64> {
        (self.max - self.min) / 2.0
    }

    /// Largest of the three half-extents.
    pub fn max_half_extent(&self) -> f64 {
        self.half_extents().max()
    }
}

/// Parameters for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    /// Offset added to z after scaling, i.e. distance from the camera plane.
    pub distance: f64,
    /// Target size of the largest half-extent.
    pub scale: f64,
    /// Divisors at or below this value are treated as a zero-size object.
    pub min_extent: f64,
}

impl NormalizeOptions {
    pub fn new(distance: f64, scale: f64) -> Self {
        Self {
            distance,
            scale,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> WireResult<()> {
        if !self.distance.is_finite() {
            return Err(WireError::InvalidConfig(format!(
                "distance must be finite, got {}",
                self.distance
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(WireError::InvalidConfig(format!(
                "scale must be positive and finite, got {}",
                self.scale
            )));
        }
        if !(self.min_extent.is_finite() && self.min_extent >= 0.0) {
            return Err(WireError::InvalidConfig(format!(
                "min_extent must be non-negative and finite, got {}",
                self.min_extent
            )));
        }
        Ok(())
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            distance: 2.5,
            scale: 1.0,
            min_extent: 0.0,
        }
    }
}

/// Recenter, rescale and push a scene in front of the camera.
///
/// After the call the bounding box is centered at `(0, 0, distance)` and
/// its largest half-extent is `scale`. A zero-size object is only
/// recentered and offset. Edges are carried over untouched.
pub fn normalize(scene: &Scene, options: &NormalizeOptions) -> WireResult<Scene> {
    options.validate()?;

    let Some(bounds) = Aabb::from_points(scene.points()) else {
        warn!("normalizing an empty scene, returning it unchanged");
        return Ok(scene.clone());
    };

    let center = bounds.center();
    let max_extent = bounds.max_half_extent() / options.scale;
    let divisor = if max_extent > options.min_extent {
        Some(max_extent)
    } else {
        warn!(max_extent, "scene has zero extent, skipping rescale");
        None
    };

    let offset = Vector3::new(0.0, 0.0, options.distance);
    let points = scene
        .points()
        .iter()
        .map(|point| {
            let local = point - center;
            let scaled = match divisor {
                Some(d) => local / d,
                None => local,
            };
            Point3D::from(scaled + offset)
        })
        .collect();

    debug!(
        points = scene.len(),
        max_extent,
        distance = options.distance,
        scale = options.scale,
        "normalized scene"
    );
    Ok(scene.with_points(points))
}

/// Shorthand for [`normalize`] with the default degenerate threshold
pub fn normalize_with(scene: &Scene, distance: f64, scale: f64) -> WireResult<Scene> {
    normalize(scene, &NormalizeOptions::new(distance, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn lopsided() -> Scene {
        let points = vec![
            Point3D::new(120.0, -4.0, 33.0),
            Point3D::new(180.0, 6.0, 31.0),
            Point3D::new(150.0, 2.0, 40.0),
            Point3D::new(130.0, -1.0, 35.0),
        ];
        Scene::from_pairs(points, [(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap()
    }

    #[test]
    fn test_aabb() {
        let bounds = Aabb::from_points(lopsided().points()).unwrap();
        assert_eq!(bounds.min, Point3D::new(120.0, -4.0, 31.0));
        assert_eq!(bounds.max, Point3D::new(180.0, 6.0, 40.0));
        assert_eq!(bounds.center(), Point3D::new(150.0, 1.0, 35.5));
        assert_eq!(bounds.half_extents(), Vector3::new(30.0, 5.0, 4.5));
        assert_eq!(bounds.max_half_extent(), 30.0);
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn test_normalized_bounds() {
        let normalized = normalize_with(&lopsided(), 10.0, 1.0).unwrap();
        let bounds = Aabb::from_points(normalized.points()).unwrap();
        assert_abs_diff_eq!(bounds.center(), Point3D::new(0.0, 0.0, 10.0), epsilon = 1e-12);
        assert_relative_eq!(bounds.max_half_extent(), 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_scale_sets_largest_half_extent() {
        let normalized = normalize_with(&Scene::pyramid(), 10.0, 6.0).unwrap();
        let bounds = Aabb::from_points(normalized.points()).unwrap();
        assert_relative_eq!(bounds.max_half_extent(), 6.0, max_relative = 1e-12);
        assert_abs_diff_eq!(bounds.center().z, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_uniform_scaling_keeps_proportions() {
        let normalized = normalize_with(&lopsided(), 0.0, 1.0).unwrap();
        let half = Aabb::from_points(normalized.points()).unwrap().half_extents();
        assert_relative_eq!(half, Vector3::new(1.0, 5.0 / 30.0, 4.5 / 30.0), max_relative = 1e-12);
    }

    #[test]
    fn test_edges_unchanged() {
        let scene = lopsided();
        let normalized = normalize_with(&scene, 10.0, 1.0).unwrap();
        assert_eq!(normalized.edges(), scene.edges());
    }

    #[test]
    fn test_single_repeated_point() {
        let p = Point3D::new(4.0, -2.0, 7.0);
        let scene = Scene::from_pairs(vec![p, p, p], [(0, 1), (1, 2)]).unwrap();
        let normalized = normalize_with(&scene, 10.0, 1.0).unwrap();
        for point in normalized.points() {
            assert!(point.iter().all(|c| c.is_finite()));
            assert_eq!(*point, Point3D::new(0.0, 0.0, 10.0));
        }
    }

    #[test]
    fn test_empty_scene_unchanged() {
        let scene = Scene::default();
        assert_eq!(normalize_with(&scene, 10.0, 1.0).unwrap(), scene);
    }

    #[test]
    fn test_min_extent_threshold() {
        let points = vec![Point3D::new(0.0, 0.0, 0.0), Point3D::new(1e-9, 0.0, 0.0)];
        let scene = Scene::from_pairs(points, [(0, 1)]).unwrap();
        let options = NormalizeOptions {
            min_extent: 1e-6,
            ..NormalizeOptions::new(5.0, 1.0)
        };
        let normalized = normalize(&scene, &options).unwrap();
        assert_abs_diff_eq!(normalized.points()[1].x, 5e-10, epsilon = 1e-15);
    }

    #[test]
    fn test_invalid_options() {
        let scene = Scene::cube();
        assert!(matches!(
            normalize_with(&scene, 10.0, 0.0),
            Err(WireError::InvalidConfig(_))
        ));
        assert!(matches!(
            normalize_with(&scene, f64::NAN, 1.0),
            Err(WireError::InvalidConfig(_))
        ));
        assert!(matches!(
            normalize_with(&scene, 10.0, -2.0),
            Err(WireError::InvalidConfig(_))
        ));
    }
}
