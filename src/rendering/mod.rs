pub mod render_common;
pub mod renderer;
pub mod scene_pass;
pub mod vertex_batch;

#[cfg(test)]
pub mod testing;

use winit::dpi::LogicalSize;

use crate::{camera::PerspectiveCamera, page::Canvas, scene_graph::Scene};

/// Draws a scene graph into one canvas.
pub trait SceneRenderer {
    fn set_pixel_ratio(&mut self, pixel_ratio: f64);

    /// Resizes the drawing buffer to `size` logical pixels times the pixel ratio.
    fn set_size(&mut self, size: LogicalSize<f64>);

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()>;

    /// Releases GPU resources. Rendering afterwards is a no-op.
    fn dispose(&mut self);
}

/// Binds renderers to canvases.
pub trait RendererFactory {
    type Renderer: SceneRenderer;

    fn create_renderer(&mut self, canvas: &Canvas) -> anyhow::Result<Self::Renderer>;
}
