use winit::dpi::{LogicalSize, PhysicalSize};

use crate::{camera::PerspectiveCamera, rendering::SceneRenderer};

/// Displayed size of a canvas plus the pixel ratio its drawing buffer uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub size: LogicalSize<f64>,
    pub pixel_ratio: f64,
}

pub fn clamp_pixel_ratio(device_pixel_ratio: f64, max_pixel_ratio: f64) -> f64 {
    device_pixel_ratio.min(max_pixel_ratio)
}

impl Viewport {
    /// Returns `None` for sizes with no area; those would produce a degenerate projection.
    pub fn new(
        size: LogicalSize<f64>,
        device_pixel_ratio: f64,
        max_pixel_ratio: f64,
    ) -> Option<Self> {
        if size.width <= 0.0 || size.height <= 0.0 {
            return None;
        }

        Some(Self {
            size,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio, max_pixel_ratio),
        })
    }

    pub fn aspect(&self) -> f32 {
        (self.size.width / self.size.height) as f32
    }

    pub fn drawing_buffer_size(&self) -> PhysicalSize<u32> {
        let width = (self.size.width * self.pixel_ratio).round().max(1.0) as u32;
        let height = (self.size.height * self.pixel_ratio).round().max(1.0) as u32;
        PhysicalSize::new(width, height)
    }
}

/// Points the camera projection and the renderer's drawing buffer at `viewport`.
pub fn apply_viewport<R: SceneRenderer>(
    camera: &mut PerspectiveCamera,
    renderer: &mut R,
    viewport: &Viewport,
) {
    camera.aspect = viewport.aspect();
    camera.update_projection_matrix();

    renderer.set_pixel_ratio(viewport.pixel_ratio);
    renderer.set_size(viewport.size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::testing::RecordingRenderer;

    #[test]
    fn aspect_is_width_over_height() {
        let viewport = Viewport::new(LogicalSize::new(1280.0, 720.0), 1.0, 2.0).unwrap();
        assert_eq!(viewport.aspect(), (1280.0f64 / 720.0) as f32);
    }

    #[test]
    fn pixel_ratio_is_clamped() {
        let viewport = Viewport::new(LogicalSize::new(100.0, 50.0), 3.0, 2.0).unwrap();
        assert_eq!(viewport.pixel_ratio, 2.0);
        assert_eq!(viewport.drawing_buffer_size(), PhysicalSize::new(200, 100));

        let low = Viewport::new(LogicalSize::new(100.0, 50.0), 1.25, 2.0).unwrap();
        assert_eq!(low.pixel_ratio, 1.25);
    }

    #[test]
    fn zero_area_is_rejected() {
        assert!(Viewport::new(LogicalSize::new(0.0, 720.0), 1.0, 2.0).is_none());
        assert!(Viewport::new(LogicalSize::new(800.0, 0.0), 1.0, 2.0).is_none());
    }

    #[test]
    fn apply_viewport_updates_camera_and_renderer() {
        let (mut renderer, log) = RecordingRenderer::new();
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        let viewport = Viewport::new(LogicalSize::new(640.0, 480.0), 2.5, 2.0).unwrap();

        apply_viewport(&mut camera, &mut renderer, &viewport);

        assert_eq!(camera.aspect, (640.0f64 / 480.0) as f32);
        let log = log.borrow();
        assert_eq!(log.size, Some(LogicalSize::new(640.0, 480.0)));
        assert_eq!(log.pixel_ratio, Some(2.0));
    }
}
