/// wire3d web - WASM bindings that feed projected segments to a canvas
///
/// The browser owns drawing and the animation timer. Each tick it calls
/// `step` and strokes the flat segment list returned by `segments`.
use wasm_bindgen::prelude::*;
use wire3d_core::{
    normalize_with, parse_obj_scene, project_scene, Camera, Scene, Turntable, WireResult,
};

#[wasm_bindgen]
pub struct WireframeView {
    turntable: Turntable,
    camera: Camera,
}

impl WireframeView {
    /// Normalize `scene` and wrap it for frame-by-frame rendering
    pub fn from_scene(scene: &Scene, distance: f64, scale: f64, focal_length: f64) -> WireResult<Self> {
        let camera = Camera::new(focal_length);
        camera.validate()?;
        let scene = normalize_with(scene, distance, scale)?;
        Ok(Self {
            turntable: Turntable::new(scene, 0.0),
            camera,
        })
    }

    pub fn from_obj_str(text: &str, distance: f64, scale: f64, focal_length: f64) -> WireResult<Self> {
        Self::from_scene(&parse_obj_scene(text)?, distance, scale, focal_length)
    }

    pub fn scene(&self) -> &Scene {
        self.turntable.current()
    }
}

#[wasm_bindgen]
impl WireframeView {
    /// Parse OBJ text and fit it in front of the camera
    #[wasm_bindgen(constructor)]
    pub fn new(obj: &str, distance: f64, scale: f64, focal_length: f64) -> Result<WireframeView, JsValue> {
        Self::from_obj_str(obj, distance, scale, focal_length)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// The built-in cube, for pages without a model to load
    pub fn cube(distance: f64, scale: f64, focal_length: f64) -> Result<WireframeView, JsValue> {
        Self::from_scene(&Scene::cube(), distance, scale, focal_length)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Spin the object about its own center for the next frame
    pub fn step(&mut self, angle_degrees: f64) {
        self.turntable.set_step_degrees(angle_degrees);
        self.turntable.advance();
    }

    pub fn set_focal_length(&mut self, focal_length: f64) -> Result<(), JsValue> {
        let camera = Camera {
            focal_length,
            ..self.camera
        };
        camera
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.camera = camera;
        Ok(())
    }

    /// Current frame as `x0, y0, x1, y1` per edge, in viewport units
    pub fn segments(&self) -> Vec<f32> {
        project_scene(self.turntable.current(), &self.camera)
            .iter()
            .flat_map(|s| [s.start.0, s.start.1, s.end.0, s.end.1])
            .map(|c| c as f32)
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.turntable.current().edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use wire3d_core::centroid;

    const QUAD: &str = "v 0 0 0\nv 2 0 0\nv 2 2 0\nv 0 2 0\nf 1 2 3 4\n";

    #[test]
    fn test_segments_layout() {
        let view = WireframeView::from_obj_str(QUAD, 10.0, 1.0, 1.0).unwrap();
        let flat = view.segments();
        assert_eq!(view.edge_count(), 4);
        assert_eq!(flat.len(), 4 * 4);
        // Edge (0, 1): corners (-1, -1, 10) and (1, -1, 10)
        assert_relative_eq!(flat[0], -0.1);
        assert_relative_eq!(flat[1], -0.1);
        assert_relative_eq!(flat[2], 0.1);
        assert_relative_eq!(flat[3], -0.1);
    }

    #[test]
    fn test_step_keeps_center() {
        let mut view = WireframeView::from_scene(&Scene::cube(), 10.0, 6.0, 2.0).unwrap();
        let before = centroid(view.scene().points()).unwrap();
        view.step(33.0);
        let after = centroid(view.scene().points()).unwrap();
        assert_relative_eq!(after, before, epsilon = 1e-9);
    }

    #[test]
    fn test_bad_input_reported() {
        assert!(WireframeView::from_obj_str("v 1 2\n", 10.0, 1.0, 1.0).is_err());
        assert!(WireframeView::from_scene(&Scene::cube(), 10.0, 1.0, 0.0).is_err());
    }
}
