use std::collections::HashMap;

use winit::dpi::LogicalSize;

use crate::{frame_loop::FrameScheduler, signals::SignalHub};

pub const HERO_CANVAS_ID: &str = "hero-canvas";
pub const ABOUT_CANVAS_ID: &str = "about-canvas";

/// A mount point a scene can render into.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub id: String,
    pub client_size: LogicalSize<f64>,
}

/// Host-side state shared by every scene: mount points, window metrics,
/// the signal hub and the display-refresh scheduler.
pub struct Page {
    canvases: HashMap<String, Canvas>,
    window_size: LogicalSize<f64>,
    device_pixel_ratio: f64,
    pub signals: SignalHub,
    pub frames: FrameScheduler,
}

impl Page {
    pub fn new(window_size: LogicalSize<f64>, device_pixel_ratio: f64) -> Self {
        Self {
            canvases: HashMap::new(),
            window_size,
            device_pixel_ratio,
            signals: SignalHub::new(),
            frames: FrameScheduler::new(),
        }
    }

    pub fn add_canvas(&mut self, id: &str, client_size: LogicalSize<f64>) {
        self.canvases.insert(
            id.to_string(),
            Canvas {
                id: id.to_string(),
                client_size,
            },
        );
    }

    pub fn canvas(&self, id: &str) -> Option<&Canvas> {
        self.canvases.get(id)
    }

    pub fn set_canvas_size(&mut self, id: &str, client_size: LogicalSize<f64>) {
        if let Some(canvas) = self.canvases.get_mut(id) {
            canvas.client_size = client_size;
        }
    }

    pub fn window_size(&self) -> LogicalSize<f64> {
        self.window_size
    }

    pub fn set_window_size(&mut self, window_size: LogicalSize<f64>) {
        self.window_size = window_size;
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: f64) {
        self.device_pixel_ratio = device_pixel_ratio;
    }
}
