use std::{
    collections::HashMap,
    sync::Arc,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use anyhow::{bail, Context};
use rand::{rngs::StdRng, SeedableRng};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    cli::SceneSelection,
    config::SceneConfig,
    page::{Page, ABOUT_CANVAS_ID, HERO_CANVAS_ID},
    rendering::renderer::{Renderer, WindowRendererFactory},
    resize_debouncer::ResizeDebouncer,
    scenes::{AboutScene, HeroScene, SceneController},
    signals::PageSignal,
};

/// A window standing in for one canvas on the page.
struct Mount {
    canvas_id: &'static str,
    window: Arc<Window>,
}

struct App {
    selection: SceneSelection,
    seed: Option<u64>,
    page: Option<Page>,
    mounts: HashMap<WindowId, Mount>,
    // The first window opened plays the role of the browser viewport.
    primary: Option<WindowId>,
    hero: SceneController<HeroScene, Renderer>,
    about: SceneController<AboutScene, Renderer>,
    debouncer: ResizeDebouncer,
}

impl App {
    fn new(config: SceneConfig, selection: SceneSelection, seed: Option<u64>) -> Self {
        Self {
            selection,
            seed,
            page: None,
            mounts: HashMap::new(),
            primary: None,
            hero: SceneController::new(HeroScene::new(config.shapes), config.renderer.clone()),
            about: SceneController::new(AboutScene::new(config.helix), config.renderer),
            debouncer: ResizeDebouncer::new(config.resize_debounce),
        }
    }

    fn open(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let mut canvases = Vec::new();
        if self.selection.hero() {
            canvases.push((HERO_CANVAS_ID, "Hero", LogicalSize::new(1280.0, 720.0)));
        }
        if self.selection.about() {
            canvases.push((ABOUT_CANVAS_ID, "About", LogicalSize::new(600.0, 600.0)));
        }

        let mut factory = WindowRendererFactory::new();
        let mut page: Option<Page> = None;

        for (canvas_id, title, size) in canvases {
            let attributes = Window::default_attributes()
                .with_title(title)
                .with_inner_size(size);
            let window = Arc::new(
                event_loop
                    .create_window(attributes)
                    .with_context(|| format!("Failed to create window for #{canvas_id}"))?,
            );

            let scale_factor = window.scale_factor();
            let client_size = window.inner_size().to_logical::<f64>(scale_factor);

            let page = page.get_or_insert_with(|| Page::new(client_size, scale_factor));
            page.add_canvas(canvas_id, client_size);
            if self.primary.is_none() {
                self.primary = Some(window.id());
            }

            factory.add_window(canvas_id, window.clone());
            self.mounts.insert(window.id(), Mount { canvas_id, window });
        }

        let Some(mut page) = page else {
            bail!("No scenes selected");
        };

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        self.hero.init(&mut page, &mut factory, &mut rng);
        self.about.init(&mut page, &mut factory, &mut rng);
        self.page = Some(page);

        Ok(())
    }

    fn shutdown(&mut self) {
        if let Some(page) = self.page.as_mut() {
            self.hero.cleanup(page);
            self.about.cleanup(page);
        }
    }
}

/// Seconds since the Unix epoch, the clock the animations are driven by.
fn wall_clock_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default()
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.page.is_some() {
            return;
        }

        if let Err(err) = self.open(event_loop) {
            log::error!("Failed to open scenes: {err:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(page) = self.page.as_mut() else {
            return;
        };
        let Some(mount) = self.mounts.get(&window_id) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.hero.cleanup(page);
                self.about.cleanup(page);
                event_loop.exit();
            }
            WindowEvent::Resized(physical) => {
                let size = physical.to_logical::<f64>(mount.window.scale_factor());
                page.set_canvas_size(mount.canvas_id, size);
                if self.primary == Some(window_id) {
                    page.set_window_size(size);
                }
                self.debouncer.notify(Instant::now());
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                page.set_device_pixel_ratio(scale_factor);
                self.debouncer.notify(Instant::now());
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = position.to_logical::<f64>(mount.window.scale_factor());
                page.signals.dispatch(PageSignal::PointerMove {
                    client_x: position.x,
                    client_y: position.y,
                });
            }
            WindowEvent::RedrawRequested => {
                let Some(handle) = page.frames.take_due(mount.canvas_id) else {
                    return;
                };
                let time = wall_clock_seconds();

                match mount.canvas_id {
                    HERO_CANVAS_ID => self.hero.handle_frame(page, handle, time),
                    ABOUT_CANVAS_ID => self.about.handle_frame(page, handle, time),
                    other => log::warn!("Frame for unknown canvas #{other}"),
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(page) = self.page.as_mut() else {
            return;
        };

        if self.debouncer.poll(Instant::now()) {
            page.signals.dispatch(PageSignal::ResizeScenes);
        }
        self.hero.handle_signals(page);
        self.about.handle_signals(page);

        for mount in self.mounts.values() {
            if page.frames.has_pending(mount.canvas_id) {
                mount.window.request_redraw();
            }
        }

        match self.debouncer.deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

pub async fn run(
    config: SceneConfig,
    selection: SceneSelection,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    let mut app = App::new(config, selection, seed);
    event_loop.run_app(&mut app)?;

    Ok(())
}
