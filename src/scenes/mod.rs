pub mod about;
pub mod controller;
pub mod hero;

use std::f64::consts::TAU;

use rand::Rng;
use winit::dpi::LogicalSize;

use crate::{
    camera::PerspectiveCamera,
    page::{Canvas, Page},
    scene_graph::Scene,
    signals::SignalKind,
    viewport::Viewport,
};

pub use about::AboutScene;
pub use controller::SceneController;
pub use hero::HeroScene;

pub const FIELD_OF_VIEW: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// What a controller animates: its procedural content and per-frame behaviour.
pub trait SceneContent {
    /// Mount point this content renders into.
    const CANVAS_ID: &'static str;

    /// Signals the controller subscribes to on this content's behalf.
    const SIGNALS: &'static [SignalKind];

    /// Camera distance from the origin along +Z at startup.
    fn camera_distance(&self) -> f32;

    /// Size the camera aspect and drawing buffer follow.
    fn viewport_size(&self, page: &Page, canvas: &Canvas) -> LogicalSize<f64>;

    /// Fills a fresh scene. Called once per `init`.
    fn populate<R: Rng + ?Sized>(&mut self, scene: &mut Scene, rng: &mut R);

    fn on_pointer_move(&mut self, _client_x: f64, _client_y: f64) {}

    fn on_resize(&mut self, _viewport: &Viewport) {}

    /// Advances animation state to wall-clock `time` (seconds).
    fn update(&mut self, scene: &mut Scene, camera: &mut PerspectiveCamera, time: f64);
}

/// Wraps a large angle into `[0, 2π)` before narrowing to `f32`.
pub(crate) fn angle(radians: f64) -> f32 {
    radians.rem_euclid(TAU) as f32
}
