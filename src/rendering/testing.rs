use std::{cell::RefCell, collections::HashMap, rc::Rc};

use anyhow::bail;
use winit::dpi::LogicalSize;

use crate::{
    camera::PerspectiveCamera,
    page::Canvas,
    rendering::{RendererFactory, SceneRenderer},
    scene_graph::Scene,
};

#[derive(Debug, Default)]
pub struct RenderLog {
    pub draws: usize,
    pub size: Option<LogicalSize<f64>>,
    pub pixel_ratio: Option<f64>,
    pub disposed: bool,
    pub draws_after_dispose: usize,
}

/// Renderer double that records what it was asked to do.
pub struct RecordingRenderer {
    log: Rc<RefCell<RenderLog>>,
}

impl RecordingRenderer {
    pub fn new() -> (Self, Rc<RefCell<RenderLog>>) {
        let log = Rc::new(RefCell::new(RenderLog::default()));
        (Self { log: log.clone() }, log)
    }
}

impl SceneRenderer for RecordingRenderer {
    fn set_pixel_ratio(&mut self, pixel_ratio: f64) {
        self.log.borrow_mut().pixel_ratio = Some(pixel_ratio);
    }

    fn set_size(&mut self, size: LogicalSize<f64>) {
        self.log.borrow_mut().size = Some(size);
    }

    fn render(&mut self, _scene: &Scene, _camera: &PerspectiveCamera) -> anyhow::Result<()> {
        let mut log = self.log.borrow_mut();
        if log.disposed {
            log.draws_after_dispose += 1;
        } else {
            log.draws += 1;
        }
        Ok(())
    }

    fn dispose(&mut self) {
        self.log.borrow_mut().disposed = true;
    }
}

#[derive(Default)]
pub struct RecordingFactory {
    pub logs: HashMap<String, Rc<RefCell<RenderLog>>>,
    pub fail: bool,
}

impl RecordingFactory {
    pub fn log(&self, canvas_id: &str) -> Rc<RefCell<RenderLog>> {
        self.logs[canvas_id].clone()
    }
}

impl RendererFactory for RecordingFactory {
    type Renderer = RecordingRenderer;

    fn create_renderer(&mut self, canvas: &Canvas) -> anyhow::Result<RecordingRenderer> {
        if self.fail {
            bail!("no graphics context for {}", canvas.id);
        }

        let (renderer, log) = RecordingRenderer::new();
        self.logs.insert(canvas.id.clone(), log);
        Ok(renderer)
    }
}
