/// wire3d core library - the wireframe geometry pipeline
///
/// Faces become a deduplicated edge set, scenes are normalized into a
/// camera-facing volume, spun about their own centroid frame by frame, and
/// projected through a pinhole camera into 2D line segments. Every stage
/// takes a scene by reference and returns a new one.

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod normalize;
pub mod obj;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use error::{WireError, WireResult};
pub use geometry::{Edge, Face, Point3D, Scene};
pub use mesh::faces_to_edges;
pub use normalize::{normalize, normalize_with, Aabb, NormalizeOptions};
pub use obj::{load_obj, load_obj_scene, parse_obj, parse_obj_scene, ObjMesh};
pub use projection::{project, project_scene, project_with_clamp, Camera, Segment2D, Viewport};
pub use transform::{
    centroid, rotate_around_origin, rotate_around_own_center, rotate_around_y, y_rotation,
    Turntable,
};
