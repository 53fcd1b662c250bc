//! Viewport transform and the pan/zoom state machine driving it.

use crate::layout::Bounds;
use crate::path::fmt_num;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl Camera {
    /// SVG transform placing world coordinates on screen.
    pub fn transform(&self) -> String {
        format!(
            "translate({} {}) scale({})",
            fmt_num(self.x),
            fmt_num(self.y),
            fmt_num(self.scale)
        )
    }

    pub fn world_to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.x, y * self.scale + self.y)
    }

    pub fn screen_to_world(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.x) / self.scale, (y - self.y) / self.scale)
    }

    /// Centers `bounds` in a `width` x `height` viewport, scaling down (never up)
    /// so the content plus `padding` fits.
    pub fn fit(bounds: Bounds, width: f32, height: f32, padding: f32) -> Self {
        let avail_w = (width - padding * 2.0).max(1.0);
        let avail_h = (height - padding * 2.0).max(1.0);
        let content_w = bounds.width().max(1.0);
        let content_h = bounds.height().max(1.0);
        let scale = (avail_w / content_w).min(avail_h / content_h).min(1.0);
        let center_x = (bounds.min_x + bounds.max_x) / 2.0;
        let center_y = (bounds.min_y + bounds.max_y) / 2.0;
        Self {
            x: width / 2.0 - center_x * scale,
            y: height / 2.0 - center_y * scale,
            scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PanOrigin {
    start_x: f32,
    start_y: f32,
    camera: Camera,
}

/// Pointer-driven camera controller. A drag snapshots the camera on press and
/// every move is measured against that snapshot until release.
#[derive(Debug, Clone)]
pub struct PanZoom {
    camera: Camera,
    pub min_scale: f32,
    pub max_scale: f32,
    pub zoom_speed: f32,
    origin: Option<PanOrigin>,
}

impl Default for PanZoom {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl PanZoom {
    pub const PRIMARY_BUTTON: u8 = 0;

    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            min_scale: 0.2,
            max_scale: 4.0,
            zoom_speed: 0.001,
            origin: None,
        }
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn is_panning(&self) -> bool {
        self.origin.is_some()
    }

    /// Starts a drag. Only the primary button pans.
    pub fn begin_pan(&mut self, pointer_x: f32, pointer_y: f32, button: u8) -> bool {
        if button != Self::PRIMARY_BUTTON {
            return false;
        }
        self.origin = Some(PanOrigin {
            start_x: pointer_x,
            start_y: pointer_y,
            camera: self.camera,
        });
        true
    }

    pub fn pan_to(&mut self, pointer_x: f32, pointer_y: f32) -> Option<Camera> {
        let origin = self.origin?;
        self.camera = Camera {
            x: origin.camera.x + (pointer_x - origin.start_x),
            y: origin.camera.y + (pointer_y - origin.start_y),
            scale: origin.camera.scale,
        };
        Some(self.camera)
    }

    pub fn end_pan(&mut self) {
        self.origin = None;
    }

    /// Zooms around a viewport-relative point so the world position under it
    /// stays put. Returns `None` when clamping leaves the scale unchanged.
    pub fn zoom_at(&mut self, offset_x: f32, offset_y: f32, delta_y: f32) -> Option<Camera> {
        let current = self.camera;
        let factor = (-delta_y * self.zoom_speed).exp();
        let next_scale = (current.scale * factor).clamp(self.min_scale, self.max_scale);
        if next_scale == current.scale {
            return None;
        }
        let (world_x, world_y) = current.screen_to_world(offset_x, offset_y);
        self.camera = Camera {
            x: offset_x - world_x * next_scale,
            y: offset_y - world_y * next_scale,
            scale: next_scale,
        };
        tracing::trace!(scale = next_scale, "zoomed");
        Some(self.camera)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_is_measured_from_the_press_snapshot() {
        let mut pz = PanZoom::new(Camera {
            x: 10.0,
            y: 20.0,
            scale: 2.0,
        });
        assert!(pz.begin_pan(100.0, 100.0, PanZoom::PRIMARY_BUTTON));
        pz.pan_to(130.0, 90.0);
        let cam = pz.pan_to(150.0, 80.0).unwrap();
        assert_eq!(
            cam,
            Camera {
                x: 60.0,
                y: 0.0,
                scale: 2.0
            }
        );
        pz.end_pan();
        assert!(!pz.is_panning());
        assert_eq!(pz.pan_to(0.0, 0.0), None);
    }

    #[test]
    fn secondary_button_does_not_pan() {
        let mut pz = PanZoom::default();
        assert!(!pz.begin_pan(0.0, 0.0, 2));
        assert!(!pz.is_panning());
    }

    #[test]
    fn zoom_keeps_cursor_world_point_fixed() {
        let mut pz = PanZoom::new(Camera {
            x: 15.0,
            y: -5.0,
            scale: 1.0,
        });
        let before = pz.camera().screen_to_world(200.0, 100.0);
        let cam = pz.zoom_at(200.0, 100.0, -300.0).unwrap();
        assert!(cam.scale > 1.0);
        let after = cam.screen_to_world(200.0, 100.0);
        assert!((before.0 - after.0).abs() < 1e-3);
        assert!((before.1 - after.1).abs() < 1e-3);
    }

    #[test]
    fn zoom_clamps_and_reports_no_change_at_limit() {
        let mut pz = PanZoom::new(Camera {
            x: 0.0,
            y: 0.0,
            scale: 4.0,
        });
        assert_eq!(pz.zoom_at(0.0, 0.0, -500.0), None);
        let cam = pz.zoom_at(0.0, 0.0, 100_000.0).unwrap();
        assert_eq!(cam.scale, 0.2);
    }

    #[test]
    fn fit_centers_content() {
        let bounds = Bounds {
            min_x: -100.0,
            min_y: -20.0,
            max_x: 100.0,
            max_y: 180.0,
        };
        let cam = Camera::fit(bounds, 400.0, 400.0, 0.0);
        assert_eq!(cam.scale, 1.0);
        assert_eq!(cam.world_to_screen(0.0, 80.0), (200.0, 200.0));
        assert_eq!(cam.transform(), "translate(200 120) scale(1)");
    }
}
