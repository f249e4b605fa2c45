use glam::Vec3;
use rand::Rng;

use crate::{
    camera::PerspectiveCamera,
    config::RendererConfig,
    frame_loop::FrameHandle,
    page::Page,
    rendering::{RendererFactory, SceneRenderer},
    scene_graph::Scene,
    scenes::{SceneContent, FAR_PLANE, FIELD_OF_VIEW, NEAR_PLANE},
    signals::{PageSignal, Subscription},
    viewport::{apply_viewport, Viewport},
};

/// Everything that exists only between `init` and `cleanup`.
struct Running<R> {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: R,
    pending_frame: Option<FrameHandle>,
    subscriptions: Vec<Subscription>,
}

/// Owns one animated visual: builds it on `init`, drives it one frame per
/// display refresh, and tears it down on `cleanup`.
pub struct SceneController<C: SceneContent, R: SceneRenderer> {
    content: C,
    config: RendererConfig,
    running: Option<Running<R>>,
}

impl<C: SceneContent, R: SceneRenderer> SceneController<C, R> {
    pub fn new(content: C, config: RendererConfig) -> Self {
        Self {
            content,
            config,
            running: None,
        }
    }

    /// Sets up the scene on its canvas and schedules the first frame. A missing
    /// canvas or an unavailable graphics context leaves the controller idle.
    pub fn init<F, G>(&mut self, page: &mut Page, factory: &mut F, rng: &mut G)
    where
        F: RendererFactory<Renderer = R>,
        G: Rng + ?Sized,
    {
        if self.running.is_some() {
            log::warn!("{} is already running", C::CANVAS_ID);
            return;
        }

        let Some(canvas) = page.canvas(C::CANVAS_ID).cloned() else {
            log::debug!("No #{} on the page, skipping scene", C::CANVAS_ID);
            return;
        };

        let mut renderer = match factory.create_renderer(&canvas) {
            Ok(renderer) => renderer,
            Err(err) => {
                log::warn!("Scene #{} disabled: {err:#}", C::CANVAS_ID);
                return;
            }
        };

        let mut camera = PerspectiveCamera::new(FIELD_OF_VIEW, 1.0, NEAR_PLANE, FAR_PLANE);
        let size = self.content.viewport_size(page, &canvas);
        match Viewport::new(size, page.device_pixel_ratio(), self.config.max_pixel_ratio) {
            Some(viewport) => {
                apply_viewport(&mut camera, &mut renderer, &viewport);
                self.content.on_resize(&viewport);
            }
            None => log::debug!("#{} has no area yet", C::CANVAS_ID),
        }

        let mut scene = Scene::new();
        self.content.populate(&mut scene, rng);

        camera.position = Vec3::new(0.0, 0.0, self.content.camera_distance());
        camera.look_at(Vec3::ZERO);

        let subscriptions = C::SIGNALS
            .iter()
            .map(|&kind| page.signals.subscribe(kind))
            .collect();

        let pending_frame = Some(page.frames.request(C::CANVAS_ID));

        log::info!("Scene #{} started with {} objects", C::CANVAS_ID, scene.len());

        self.running = Some(Running {
            scene,
            camera,
            renderer,
            pending_frame,
            subscriptions,
        });
    }

    /// Applies signals queued since the last call. Pointer moves are applied in
    /// order so the latest one wins; any number of resizes collapse into one.
    pub fn handle_signals(&mut self, page: &Page) {
        let Some(running) = &self.running else {
            return;
        };

        let signals: Vec<PageSignal> = running
            .subscriptions
            .iter()
            .flat_map(Subscription::drain)
            .collect();

        let mut resize = false;
        for signal in signals {
            match signal {
                PageSignal::ResizeScenes => resize = true,
                PageSignal::PointerMove { client_x, client_y } => {
                    self.content.on_pointer_move(client_x, client_y)
                }
            }
        }

        if resize {
            self.resize(page);
        }
    }

    fn resize(&mut self, page: &Page) {
        let Some(running) = &mut self.running else {
            return;
        };
        let Some(canvas) = page.canvas(C::CANVAS_ID) else {
            return;
        };

        let size = self.content.viewport_size(page, canvas);
        let Some(viewport) =
            Viewport::new(size, page.device_pixel_ratio(), self.config.max_pixel_ratio)
        else {
            log::debug!("Ignoring zero-area resize of #{}", C::CANVAS_ID);
            return;
        };

        apply_viewport(&mut running.camera, &mut running.renderer, &viewport);
        self.content.on_resize(&viewport);
        log::debug!(
            "#{} resized to {}x{} @{}x",
            C::CANVAS_ID,
            viewport.size.width,
            viewport.size.height,
            viewport.pixel_ratio
        );
    }

    /// Runs one frame if `handle` is the frame this controller is waiting for,
    /// then schedules the next one.
    pub fn handle_frame(&mut self, page: &mut Page, handle: FrameHandle, time: f64) {
        match &self.running {
            Some(running) if running.pending_frame == Some(handle) => {}
            _ => return,
        }

        self.handle_signals(page);

        let Some(running) = &mut self.running else {
            return;
        };

        self.content
            .update(&mut running.scene, &mut running.camera, time);

        if let Err(err) = running.renderer.render(&running.scene, &running.camera) {
            log::error!("Rendering #{} failed: {err:#}", C::CANVAS_ID);
        }

        running.pending_frame = Some(page.frames.request(C::CANVAS_ID));
    }

    /// Stops the frame loop, releases the renderer and unregisters listeners.
    /// Safe to call at any time, including before `init` or twice.
    pub fn cleanup(&mut self, page: &mut Page) {
        let Some(mut running) = self.running.take() else {
            return;
        };

        if let Some(handle) = running.pending_frame.take() {
            page.frames.cancel(handle);
        }
        running.renderer.dispose();
        drop(running);

        log::info!("Scene #{} stopped", C::CANVAS_ID);
    }
}

#[cfg(test)]
impl<C: SceneContent, R: SceneRenderer> SceneController<C, R> {
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.running.as_ref().map(|running| &running.scene)
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.running.as_ref().map(|running| &running.camera)
    }

    pub fn content(&self) -> &C {
        &self.content
    }
}
