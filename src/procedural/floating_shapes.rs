use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;

use crate::math::color::{ACCENT_PRIMARY, ACCENT_SECONDARY};
use crate::scene_graph::{Mesh, MeshMaterial, Node, Object3D, ObjectId, PrimitiveKind, Scene};

/// Shapes spawn inside this origin-centred box.
pub const SPAWN_EXTENT: Vec3 = Vec3::new(20.0, 20.0, 10.0);
pub const MAX_ROTATION_SPEED: f32 = 0.01;

/// Animation record carried by each floating shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeMotion {
    pub initial_position: Vec3,
    /// Radians added per frame on each axis.
    pub rotation_speed: Vec3,
    pub float_speed: f32,
    pub float_range: f32,
}

#[derive(Debug, Clone)]
pub struct FloatingShape {
    pub object: ObjectId,
    pub motion: ShapeMotion,
}

fn material_styles() -> [MeshMaterial; 3] {
    [
        MeshMaterial::wireframe(ACCENT_PRIMARY, 0.6),
        MeshMaterial::wireframe(ACCENT_SECONDARY, 0.4),
        MeshMaterial::solid(ACCENT_PRIMARY, 0.3),
    ]
}

pub fn build_floating_shapes<R: Rng + ?Sized>(
    scene: &mut Scene,
    rng: &mut R,
    count: usize,
) -> Vec<FloatingShape> {
    let geometries = PrimitiveKind::ALL.map(|kind| {
        let geometry = kind.build();
        log::trace!(
            "{} geometry: {} triangles",
            geometry.name,
            geometry.triangle_count()
        );
        scene.add_geometry(geometry)
    });
    let materials = material_styles().map(|material| scene.add_material(material));

    (0..count)
        .map(|i| {
            let geometry = geometries[rng.gen_range(0..geometries.len())];
            let material = materials[rng.gen_range(0..materials.len())];

            let position = Vec3::new(
                rng.gen_range(-0.5..0.5) * SPAWN_EXTENT.x,
                rng.gen_range(-0.5..0.5) * SPAWN_EXTENT.y,
                rng.gen_range(-0.5..0.5) * SPAWN_EXTENT.z,
            );
            let rotation = Vec3::new(
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
            );

            let motion = ShapeMotion {
                initial_position: position,
                rotation_speed: Vec3::new(
                    rng.gen_range(-MAX_ROTATION_SPEED..MAX_ROTATION_SPEED),
                    rng.gen_range(-MAX_ROTATION_SPEED..MAX_ROTATION_SPEED),
                    rng.gen_range(-MAX_ROTATION_SPEED..MAX_ROTATION_SPEED),
                ),
                float_speed: rng.gen_range(0.01..0.03),
                float_range: rng.gen_range(1.0..3.0),
            };

            let object = scene.add_object(
                Object3D::new(
                    format!("Shape {i}"),
                    Node::Mesh(Mesh { geometry, material }),
                )
                .with_translation(position)
                .with_rotation(rotation),
            );

            FloatingShape { object, motion }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn builds_fifteen_shapes_in_range() {
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(42);
        let shapes = build_floating_shapes(&mut scene, &mut rng, 15);

        assert_eq!(shapes.len(), 15);
        for shape in &shapes {
            let m = &shape.motion;
            for speed in m.rotation_speed.to_array() {
                assert!((-0.01..=0.01).contains(&speed));
            }
            assert!((1.0..=3.0).contains(&m.float_range));
            assert!((0.01..=0.03).contains(&m.float_speed));

            let p = m.initial_position;
            assert!(p.x.abs() <= 10.0 && p.y.abs() <= 10.0 && p.z.abs() <= 5.0);

            let transform = scene.get_object_transform(shape.object).unwrap();
            assert_eq!(transform.translation(), p);
            for angle in transform.rotation().to_array() {
                assert!((0.0..=PI).contains(&angle));
            }
        }
    }

    #[test]
    fn shapes_share_five_geometries_and_three_materials() {
        let mut scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(3);
        build_floating_shapes(&mut scene, &mut rng, 15);

        assert_eq!(scene.geometries.len(), 5);
        assert_eq!(scene.materials.len(), 3);
        assert_eq!(scene.materials.iter().filter(|(_, m)| m.wireframe).count(), 2);
    }
}
