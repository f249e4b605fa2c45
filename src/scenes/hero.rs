use glam::{DVec2, Vec2, Vec3};
use rand::Rng;
use winit::dpi::LogicalSize;

use crate::{
    camera::PerspectiveCamera,
    config::FloatingShapesConfig,
    page::{Canvas, Page, HERO_CANVAS_ID},
    procedural::{ambient::box_cloud, build_floating_shapes, FloatingShape},
    scene_graph::{Blending, Node, Object3D, ObjectId, Points, PointsMaterial, Scene},
    scenes::{angle, SceneContent},
    signals::SignalKind,
    viewport::Viewport,
};

const PARTICLE_EXTENT: Vec3 = Vec3::new(50.0, 50.0, 20.0);
const POINTER_SCALE: f64 = 0.001;
const CAMERA_EASING: f32 = 0.05;

/// Normalized pointer offset from the viewport centre.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

/// Floating polyhedra and a glowing particle field that follow the pointer.
pub struct HeroScene {
    config: FloatingShapesConfig,
    shapes: Vec<FloatingShape>,
    particles: Option<ObjectId>,
    pointer: PointerState,
    viewport_center: DVec2,
}

impl HeroScene {
    pub fn new(config: FloatingShapesConfig) -> Self {
        Self {
            config,
            shapes: Vec::new(),
            particles: None,
            pointer: PointerState::default(),
            viewport_center: DVec2::ZERO,
        }
    }
}

impl SceneContent for HeroScene {
    const CANVAS_ID: &'static str = HERO_CANVAS_ID;
    const SIGNALS: &'static [SignalKind] = &[SignalKind::ResizeScenes, SignalKind::PointerMove];

    fn camera_distance(&self) -> f32 {
        5.0
    }

    fn viewport_size(&self, page: &Page, _canvas: &Canvas) -> LogicalSize<f64> {
        page.window_size()
    }

    fn populate<R: Rng + ?Sized>(&mut self, scene: &mut Scene, rng: &mut R) {
        self.shapes = build_floating_shapes(scene, rng, self.config.shape_count);

        let cloud = box_cloud(rng, self.config.ambient_points, PARTICLE_EXTENT);
        self.particles = Some(scene.add_object(Object3D::new(
            "Particles",
            Node::Points(Points {
                cloud,
                material: PointsMaterial {
                    size: 2.0,
                    opacity: 0.6,
                    blending: Blending::Additive,
                    size_attenuation: true,
                },
            }),
        )));

        log::debug!(
            "Hero scene populated with {} shapes and {} particles",
            self.shapes.len(),
            self.config.ambient_points
        );
    }

    fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        let offset = (DVec2::new(client_x, client_y) - self.viewport_center) * POINTER_SCALE;
        self.pointer = PointerState {
            x: offset.x as f32,
            y: offset.y as f32,
        };
    }

    fn on_resize(&mut self, viewport: &Viewport) {
        self.viewport_center = DVec2::new(viewport.size.width, viewport.size.height) / 2.0;
    }

    fn update(&mut self, scene: &mut Scene, camera: &mut PerspectiveCamera, time: f64) {
        let pointer = Vec2::new(self.pointer.x, self.pointer.y);

        for shape in &self.shapes {
            let motion = &shape.motion;
            scene.rotate_object(shape.object, motion.rotation_speed);

            let float = (time * motion.float_speed as f64).sin() as f32 * motion.float_range;
            let initial = motion.initial_position;
            scene.set_object_translation(
                shape.object,
                Vec3::new(
                    initial.x + pointer.x * 2.0,
                    initial.y + float,
                    initial.z + pointer.y * 2.0,
                ),
            );
        }

        if let Some(particles) = self.particles {
            scene.set_object_rotation(particles, Vec3::new(0.0, angle(time * 0.1), 0.0));
            scene.set_object_translation(
                particles,
                Vec3::new(pointer.x * 5.0, -pointer.y * 5.0, 0.0),
            );
        }

        let target = Vec2::new(pointer.x * 2.0, -pointer.y * 2.0);
        camera.position.x += (target.x - camera.position.x) * CAMERA_EASING;
        camera.position.y += (target.y - camera.position.y) * CAMERA_EASING;
        camera.look_at(Vec3::ZERO);
    }
}

#[cfg(test)]
impl HeroScene {
    pub fn shapes(&self) -> &[FloatingShape] {
        &self.shapes
    }

    pub fn particles(&self) -> Option<ObjectId> {
        self.particles
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn populated() -> (HeroScene, Scene) {
        let mut hero = HeroScene::new(FloatingShapesConfig::default());
        let mut scene = Scene::new();
        hero.populate(&mut scene, &mut StdRng::seed_from_u64(5));
        (hero, scene)
    }

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.position.z = 5.0;
        camera
    }

    #[test]
    fn populate_adds_shapes_and_particles() {
        let (hero, scene) = populated();
        assert_eq!(hero.shapes().len(), 15);

        let particles = scene.get_object(hero.particles().unwrap()).unwrap();
        let Node::Points(points) = &particles.node else {
            panic!("particles are not a point cloud");
        };
        assert_eq!(points.cloud.len(), 100);
        assert_eq!(points.material.blending, Blending::Additive);
    }

    #[test]
    fn pointer_is_relative_to_viewport_center() {
        let mut hero = HeroScene::new(FloatingShapesConfig::default());
        let viewport = Viewport::new(LogicalSize::new(1000.0, 800.0), 1.0, 2.0).unwrap();
        hero.on_resize(&viewport);

        hero.on_pointer_move(700.0, 300.0);
        let pointer = hero.pointer();
        assert!((pointer.x - 0.2).abs() < 1e-6);
        assert!((pointer.y + 0.1).abs() < 1e-6);
    }

    #[test]
    fn shapes_float_and_follow_pointer() {
        let (mut hero, mut scene) = populated();
        hero.pointer = PointerState { x: 0.5, y: -0.25 };
        let time = 1234.5;

        let before: Vec<Vec3> = hero
            .shapes()
            .iter()
            .map(|s| scene.get_object_transform(s.object).unwrap().rotation())
            .collect();

        hero.update(&mut scene, &mut camera(), time);

        for (shape, rotation) in hero.shapes().iter().zip(before) {
            let m = &shape.motion;
            let transform = scene.get_object_transform(shape.object).unwrap();
            let expected_y =
                m.initial_position.y + (time * m.float_speed as f64).sin() as f32 * m.float_range;

            let p = transform.translation();
            assert!((p.x - (m.initial_position.x + 1.0)).abs() < 1e-5);
            assert!((p.y - expected_y).abs() < 1e-5);
            assert!((p.z - (m.initial_position.z - 0.5)).abs() < 1e-5);
            assert!(transform
                .rotation()
                .abs_diff_eq((rotation + m.rotation_speed).map(|a| a.rem_euclid(TAU)), 1e-6));
        }

        let particles = scene.get_object_transform(hero.particles().unwrap()).unwrap();
        assert!(particles
            .translation()
            .abs_diff_eq(Vec3::new(2.5, 1.25, 0.0), 1e-6));
    }

    #[test]
    fn camera_eases_toward_pointer_target() {
        let (mut hero, mut scene) = populated();
        hero.pointer = PointerState { x: 1.0, y: 1.0 };
        let mut camera = camera();

        hero.update(&mut scene, &mut camera, 0.0);
        assert!((camera.position.x - 0.1).abs() < 1e-6);
        assert!((camera.position.y + 0.1).abs() < 1e-6);
        assert_eq!(camera.target, Vec3::ZERO);

        for _ in 0..500 {
            hero.update(&mut scene, &mut camera, 0.0);
        }
        assert!((camera.position.x - 2.0).abs() < 1e-3);
        assert!((camera.position.y + 2.0).abs() < 1e-3);
        assert_eq!(camera.position.z, 5.0);
    }
}
