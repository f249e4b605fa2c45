use glam::Vec3;
use rand::Rng;
use winit::dpi::LogicalSize;

use crate::{
    camera::PerspectiveCamera,
    config::HelixConfig,
    page::{Canvas, Page, ABOUT_CANVAS_ID},
    procedural::{ambient::ring_cloud, build_helix, Helix},
    scene_graph::{Blending, Node, Object3D, ObjectId, Points, PointsMaterial, Scene},
    scenes::{angle, SceneContent},
    signals::SignalKind,
};

/// Vertical step per frame for each ambient point, scaled by `sin(time + index)`.
pub const DRIFT_STEP: f64 = 0.01;

/// Rotating DNA helix surrounded by bobbing particles.
pub struct AboutScene {
    config: HelixConfig,
    helix: Option<Helix>,
    particles: Option<ObjectId>,
}

impl AboutScene {
    pub fn new(config: HelixConfig) -> Self {
        Self {
            config,
            helix: None,
            particles: None,
        }
    }
}

impl SceneContent for AboutScene {
    const CANVAS_ID: &'static str = ABOUT_CANVAS_ID;
    const SIGNALS: &'static [SignalKind] = &[SignalKind::ResizeScenes];

    fn camera_distance(&self) -> f32 {
        8.0
    }

    fn viewport_size(&self, _page: &Page, canvas: &Canvas) -> LogicalSize<f64> {
        canvas.client_size
    }

    fn populate<R: Rng + ?Sized>(&mut self, scene: &mut Scene, rng: &mut R) {
        let helix = build_helix(scene, &self.config);
        log::debug!(
            "Helix built with {} strands and {} rungs",
            helix.strands.len(),
            helix.rungs.len()
        );
        self.helix = Some(helix);

        let cloud = ring_cloud(rng, self.config.ambient_points, 4.0..7.0, 8.0, 1.0..4.0);
        self.particles = Some(scene.add_object(Object3D::new(
            "Floating particles",
            Node::Points(Points {
                cloud,
                material: PointsMaterial {
                    size: 1.0,
                    opacity: 0.6,
                    blending: Blending::Additive,
                    size_attenuation: true,
                },
            }),
        )));
    }

    fn update(&mut self, scene: &mut Scene, _camera: &mut PerspectiveCamera, time: f64) {
        if let Some(helix) = &self.helix {
            scene.set_object_rotation(
                helix.group,
                Vec3::new(
                    ((time * 0.2).sin() * 0.1) as f32,
                    angle(time * 0.3),
                    0.0,
                ),
            );
        }

        let Some(particles) = self.particles else {
            return;
        };
        scene.set_object_rotation(particles, Vec3::new(0.0, angle(time * 0.1), 0.0));

        if let Some(points) = scene.points_mut(particles) {
            // Accumulates without bound; each point bobs with its own phase.
            for (index, position) in points.cloud.positions.iter_mut().enumerate() {
                position.y += ((time + index as f64).sin() * DRIFT_STEP) as f32;
            }
            points.cloud.mark_positions_dirty();
        }
    }
}

#[cfg(test)]
impl AboutScene {
    pub fn helix(&self) -> Option<&Helix> {
        self.helix.as_ref()
    }

    pub fn particles(&self) -> Option<ObjectId> {
        self.particles
    }
}
