use winit::dpi::PhysicalSize;

use crate::camera::CameraUniform;

/// Surface configuration and the camera uniform shared by every pipeline.
pub struct RenderCommon {
    pub output_surface_config: wgpu::SurfaceConfiguration,
    pub camera_uniform: CameraUniform,
    pub camera_uniform_buffer: wgpu::Buffer,
}

impl RenderCommon {
    pub fn new(
        device: &wgpu::Device,
        adapter: &wgpu::Adapter,
        surface: &wgpu::Surface,
        size: PhysicalSize<u32>,
    ) -> Self {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let output_surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(device, &output_surface_config);

        let camera_uniform = CameraUniform::default();
        let camera_uniform_buffer = camera_uniform.create_buffer(device);

        Self {
            output_surface_config,
            camera_uniform,
            camera_uniform_buffer,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, surface: &wgpu::Surface, size: PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            self.output_surface_config.width = size.width;
            self.output_surface_config.height = size.height;
            surface.configure(device, &self.output_surface_config);
        }
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(
            self.output_surface_config.width,
            self.output_surface_config.height,
        )
    }
}
