use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::PerspectiveCamera;
use crate::scene_graph::{Blending, Node, ObjectId, Points, Scene};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    /// Sprite-local coordinate in `[-1, 1]`; zero for meshes and lines.
    pub uv: [f32; 2],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
            uv: [0.0, 0.0],
        }
    }
}

/// Everything a cloud's sprite vertices depend on besides its positions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SpriteKey {
    world: Mat4,
    view_proj: Mat4,
    buffer_height: f32,
}

#[derive(Debug, Default)]
struct CachedSprites {
    key: Option<SpriteKey>,
    generation: u64,
    vertices: Vec<Vertex>,
}

/// World-space vertices for one frame, bucketed by pipeline.
#[derive(Debug, Default)]
pub struct SceneBatch {
    pub triangles: Vec<Vertex>,
    pub lines: Vec<Vertex>,
    pub blended_points: Vec<Vertex>,
    pub additive_points: Vec<Vertex>,
    sprites: HashMap<ObjectId, CachedSprites>,
    generation: u64,
}

impl SceneBatch {
    pub fn clear(&mut self) {
        self.triangles.clear();
        self.lines.clear();
        self.blended_points.clear();
        self.additive_points.clear();
    }

    /// Flattens `scene` as seen from `camera`. `buffer_height` is the drawing
    /// buffer height in physical pixels, used for non-attenuated sprite sizes.
    pub fn build(&mut self, scene: &Scene, camera: &PerspectiveCamera, buffer_height: f32) {
        self.clear();
        self.generation += 1;
        scene.late_update();

        let (right, up) = camera.billboard_axes();
        let half_fov_tan = (camera.fov.to_radians() * 0.5).tan();

        let view_proj = camera.get_vp_matrix();

        for (id, object) in scene.objects.iter() {
            let world = *object.transform.get_world_matrix();

            match &object.node {
                Node::Group => {}
                Node::Mesh(mesh) => {
                    let (Some(geometry), Some(material)) =
                        (scene.geometries.get(mesh.geometry), scene.materials.get(mesh.material))
                    else {
                        log::warn!(
                            "Mesh {:?} references a missing geometry or material",
                            object.name
                        );
                        continue;
                    };

                    let color = material.color.with_alpha(material.opacity);
                    let vertex = |index: u32| {
                        Vertex::new(world.transform_point3(geometry.positions[index as usize]), color)
                    };

                    if material.wireframe {
                        for (a, b) in geometry.edges() {
                            self.lines.extend([vertex(a), vertex(b)]);
                        }
                    } else {
                        self.triangles.extend(geometry.indices.iter().map(|&i| vertex(i)));
                    }
                }
                Node::Line(line) => {
                    let color = line.material.color.with_alpha(line.material.opacity);
                    self.lines.push(Vertex::new(world.transform_point3(line.start), color));
                    self.lines.push(Vertex::new(world.transform_point3(line.end), color));
                }
                Node::Points(points) => {
                    let key = SpriteKey {
                        world,
                        view_proj,
                        buffer_height,
                    };
                    let cached = self.sprites.entry(id).or_default();
                    if cached.key != Some(key) || points.cloud.positions_dirty() {
                        cached.vertices.clear();
                        push_sprites(
                            &mut cached.vertices,
                            points,
                            world,
                            camera,
                            (right, up),
                            half_fov_tan,
                            buffer_height,
                        );
                        cached.key = Some(key);
                        points.cloud.clear_dirty();
                    }
                    cached.generation = self.generation;

                    let target = match points.material.blending {
                        Blending::Normal => &mut self.blended_points,
                        Blending::Additive => &mut self.additive_points,
                    };
                    target.extend_from_slice(&cached.vertices);
                }
            }
        }

        let generation = self.generation;
        self.sprites.retain(|_, cached| cached.generation == generation);
    }
}

fn push_sprites(
    target: &mut Vec<Vertex>,
    points: &Points,
    world: Mat4,
    camera: &PerspectiveCamera,
    (right, up): (Vec3, Vec3),
    half_fov_tan: f32,
    buffer_height: f32,
) {
    let material = &points.material;
    let cloud = &points.cloud;

    for (index, (position, color)) in cloud.positions.iter().zip(&cloud.colors).enumerate() {
        let center = world.transform_point3(*position);
        let size = cloud.size_of(index, material.size);

        // Side length in world units that covers `size` pixels the way a GL point sprite would.
        let side = if material.size_attenuation {
            size * half_fov_tan
        } else {
            let depth = (center - camera.position).length();
            size * 2.0 * depth * half_fov_tan / buffer_height.max(1.0)
        };
        let half = side * 0.5;

        let rgba = color.with_alpha(material.opacity);
        let corner = |sx: f32, sy: f32| Vertex {
            position: (center + right * (sx * half) + up * (sy * half)).to_array(),
            color: rgba,
            uv: [sx, sy],
        };

        target.extend([
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Color;
    use crate::scene_graph::{
        Line, LineMaterial, Mesh, MeshGeometry, MeshMaterial, Object3D, PointCloud, PointsMaterial,
    };

    fn camera() -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
        camera.position = Vec3::new(0.0, 0.0, 5.0);
        camera.look_at(Vec3::ZERO);
        camera
    }

    fn add_cuboid(scene: &mut Scene, wireframe: bool) {
        let geometry = scene.add_geometry(MeshGeometry::cuboid(1.0, 1.0, 1.0));
        let material = scene.add_material(MeshMaterial {
            color: Color::new(1.0, 0.0, 0.0),
            opacity: 0.5,
            wireframe,
        });
        scene.add_object(Object3D::new("cuboid", Node::Mesh(Mesh { geometry, material })));
    }

    #[test]
    fn solid_mesh_emits_triangles() {
        let mut scene = Scene::new();
        add_cuboid(&mut scene, false);

        let mut batch = SceneBatch::default();
        batch.build(&scene, &camera(), 720.0);

        assert_eq!(batch.triangles.len(), 36);
        assert!(batch.lines.is_empty());
        assert_eq!(batch.triangles[0].color, [1.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn wireframe_mesh_emits_edges() {
        let mut scene = Scene::new();
        add_cuboid(&mut scene, true);

        let mut batch = SceneBatch::default();
        batch.build(&scene, &camera(), 720.0);

        assert!(batch.triangles.is_empty());
        assert_eq!(batch.lines.len(), 18 * 2);
    }

    #[test]
    fn lines_follow_parent_transform() {
        let mut scene = Scene::new();
        let group = scene.add_object(
            Object3D::new("group", Node::Group).with_translation(Vec3::new(0.0, 1.0, 0.0)),
        );
        scene.add_child(
            Some(group),
            Object3D::new(
                "line",
                Node::Line(Line {
                    start: Vec3::ZERO,
                    end: Vec3::X,
                    material: LineMaterial {
                        color: Color::new(0.5, 0.5, 0.5),
                        opacity: 0.4,
                    },
                }),
            ),
        );

        let mut batch = SceneBatch::default();
        batch.build(&scene, &camera(), 720.0);

        assert_eq!(batch.lines.len(), 2);
        assert_eq!(batch.lines[0].position, [0.0, 1.0, 0.0]);
        assert_eq!(batch.lines[1].position, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn points_become_sprites_in_their_blend_bucket() {
        let mut scene = Scene::new();
        let cloud = PointCloud::new(vec![Vec3::ZERO; 3], vec![Color::default(); 3], None);
        scene.add_object(Object3D::new(
            "points",
            Node::Points(Points {
                cloud,
                material: PointsMaterial {
                    size: 2.0,
                    opacity: 0.6,
                    blending: Blending::Additive,
                    size_attenuation: true,
                },
            }),
        ));

        let mut batch = SceneBatch::default();
        batch.build(&scene, &camera(), 720.0);

        assert!(batch.blended_points.is_empty());
        assert_eq!(batch.additive_points.len(), 3 * 6);

        let expected_side = 2.0 * (75.0f32.to_radians() * 0.5).tan();
        let a = Vec3::from(batch.additive_points[0].position);
        let b = Vec3::from(batch.additive_points[1].position);
        assert!((a.distance(b) - expected_side).abs() < 1e-4);
    }

    #[test]
    fn sprites_are_reused_until_positions_are_marked_dirty() {
        let mut scene = Scene::new();
        let cloud = PointCloud::new(vec![Vec3::ZERO], vec![Color::default()], None);
        let id = scene.add_object(Object3D::new(
            "points",
            Node::Points(Points {
                cloud,
                material: PointsMaterial::default(),
            }),
        ));
        let sprite_center = |batch: &SceneBatch| {
            let vertices = &batch.blended_points[..6];
            vertices
                .iter()
                .map(|v| Vec3::from(v.position))
                .sum::<Vec3>()
                / 6.0
        };

        let mut batch = SceneBatch::default();
        batch.build(&scene, &camera(), 720.0);
        assert!(!scene.points_mut(id).unwrap().cloud.positions_dirty());
        assert!(sprite_center(&batch).abs_diff_eq(Vec3::ZERO, 1e-6));

        // Edited in place without raising the flag: the cached sprite stays.
        scene.points_mut(id).unwrap().cloud.positions[0] = Vec3::Y;
        batch.build(&scene, &camera(), 720.0);
        assert!(sprite_center(&batch).abs_diff_eq(Vec3::ZERO, 1e-6));

        scene.points_mut(id).unwrap().cloud.mark_positions_dirty();
        batch.build(&scene, &camera(), 720.0);
        assert!(sprite_center(&batch).abs_diff_eq(Vec3::Y, 1e-6));
        assert!(!scene.points_mut(id).unwrap().cloud.positions_dirty());
    }

    #[test]
    fn moving_the_camera_refreshes_cached_sprites() {
        let mut scene = Scene::new();
        let cloud = PointCloud::new(vec![Vec3::ZERO], vec![Color::default()], None);
        scene.add_object(Object3D::new(
            "points",
            Node::Points(Points {
                cloud,
                material: PointsMaterial::default(),
            }),
        ));

        let mut batch = SceneBatch::default();
        batch.build(&scene, &camera(), 720.0);
        let facing_z = batch.blended_points.clone();

        let mut side = camera();
        side.position = Vec3::new(5.0, 0.0, 0.0);
        batch.build(&scene, &side, 720.0);

        assert_eq!(batch.blended_points.len(), facing_z.len());
        assert_ne!(batch.blended_points, facing_z);
        assert!(batch
            .blended_points
            .iter()
            .all(|v| v.position[0].abs() < 1e-6));
    }
}
