use std::{collections::HashMap, sync::Arc};

use anyhow::{anyhow, bail, Context};
use winit::{dpi::LogicalSize, window::Window};

use crate::{
    camera::PerspectiveCamera,
    page::Canvas,
    rendering::{
        render_common::RenderCommon, scene_pass::ScenePass, vertex_batch::SceneBatch,
        RendererFactory, SceneRenderer,
    },
    scene_graph::Scene,
    viewport::Viewport,
};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.004,
    g: 0.004,
    b: 0.008,
    a: 1.0,
};

struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    common: RenderCommon,
    scene_pass: ScenePass,
}

/// wgpu renderer bound to one window.
pub struct Renderer {
    pub window: Arc<Window>,
    gpu: Option<Gpu>,
    viewport: Viewport,
    batch: SceneBatch,
}

impl Renderer {
    pub async fn new(instance: &wgpu::Instance, window: Arc<Window>) -> anyhow::Result<Renderer> {
        let physical = window.inner_size();
        let scale_factor = window.scale_factor();

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No compatible adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to create device")?;

        let common = RenderCommon::new(&device, &adapter, &surface, physical);
        let scene_pass = ScenePass::create(&device, &common)?;

        log::info!(
            "Renderer ready on {:?} ({}x{})",
            adapter.get_info().name,
            physical.width,
            physical.height
        );

        Ok(Self {
            window,
            gpu: Some(Gpu {
                surface,
                device,
                queue,
                common,
                scene_pass,
            }),
            viewport: Viewport {
                size: physical.to_logical(scale_factor),
                pixel_ratio: scale_factor,
            },
            batch: SceneBatch::default(),
        })
    }

    fn reconfigure(&mut self) {
        let size = self.viewport.drawing_buffer_size();
        if let Some(gpu) = &mut self.gpu {
            gpu.common.resize(&gpu.device, &gpu.surface, size);
        }
    }
}

impl SceneRenderer for Renderer {
    fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.viewport.pixel_ratio = pixel_ratio;
        self.reconfigure();
    }

    fn set_size(&mut self, size: LogicalSize<f64>) {
        self.viewport.size = size;
        self.reconfigure();
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> anyhow::Result<()> {
        let Some(gpu) = &mut self.gpu else {
            return Ok(());
        };

        let buffer_height = gpu.common.size().height as f32;
        self.batch.build(scene, camera, buffer_height);

        gpu.common.camera_uniform.update(camera);
        gpu.common
            .camera_uniform
            .update_buffer(&gpu.queue, &gpu.common.camera_uniform_buffer);
        gpu.scene_pass.upload(&gpu.device, &gpu.queue, &self.batch);

        let output = match gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = gpu.common.size();
                gpu.common.resize(&gpu.device, &gpu.surface, size);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timeout");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => bail!("Out of memory"),
            Err(other) => return Err(anyhow!("Unexpected surface error: {other:?}")),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        gpu.scene_pass.render(&view, &mut encoder, CLEAR_COLOR);

        gpu.queue.submit([encoder.finish()]);
        self.window.pre_present_notify();
        output.present();

        Ok(())
    }

    fn dispose(&mut self) {
        if self.gpu.take().is_some() {
            log::debug!("Released GPU resources for window {:?}", self.window.id());
        }
    }
}

/// Creates one [`Renderer`] per canvas window, sharing a single wgpu instance.
pub struct WindowRendererFactory {
    instance: wgpu::Instance,
    windows: HashMap<String, Arc<Window>>,
}

impl WindowRendererFactory {
    pub fn new() -> Self {
        Self {
            instance: wgpu::Instance::new(&wgpu::InstanceDescriptor::default()),
            windows: HashMap::new(),
        }
    }

    pub fn add_window(&mut self, canvas_id: &str, window: Arc<Window>) {
        self.windows.insert(canvas_id.to_string(), window);
    }
}

impl RendererFactory for WindowRendererFactory {
    type Renderer = Renderer;

    fn create_renderer(&mut self, canvas: &Canvas) -> anyhow::Result<Renderer> {
        let window = self
            .windows
            .get(&canvas.id)
            .cloned()
            .with_context(|| format!("No window for canvas {}", canvas.id))?;

        pollster::block_on(Renderer::new(&self.instance, window))
    }
}
