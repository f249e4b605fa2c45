use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Upper bound for the device pixel ratio applied to drawing buffers.
    pub max_pixel_ratio: f64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_pixel_ratio: 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HelixConfig {
    pub segments: u32,
    pub turns: f32,
    pub radius: f32,
    pub height: f32,
    pub marker_radius: f32,
    pub ambient_points: usize,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            segments: 60,
            turns: 3.0,
            radius: 2.0,
            height: 6.0,
            marker_radius: 0.1,
            ambient_points: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FloatingShapesConfig {
    pub shape_count: usize,
    pub ambient_points: usize,
}

impl Default for FloatingShapesConfig {
    fn default() -> Self {
        Self {
            shape_count: 15,
            ambient_points: 100,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub renderer: RendererConfig,
    pub helix: HelixConfig,
    pub shapes: FloatingShapesConfig,
    /// Quiet period before a burst of window resizes becomes one `ResizeScenes`.
    pub resize_debounce: Duration,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            renderer: RendererConfig::default(),
            helix: HelixConfig::default(),
            shapes: FloatingShapesConfig::default(),
            resize_debounce: Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactFormConfig {
    pub min_message_len: usize,
    pub submit_delay: Duration,
    pub banner_lifetime: Duration,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            min_message_len: 10,
            submit_delay: Duration::from_secs(2),
            banner_lifetime: Duration::from_secs(5),
        }
    }
}
