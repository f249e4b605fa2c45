use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::config::HelixConfig;
use crate::math::color::{ACCENT_PRIMARY, ACCENT_SECONDARY, RUNG_GREY};
use crate::scene_graph::{
    Line, LineMaterial, Mesh, MeshGeometry, MeshMaterial, Node, Object3D, ObjectId, Scene,
};

/// Every n-th segment of strand 0 gets a rung to the opposite strand.
pub const RUNG_INTERVAL: u32 = 4;

pub struct Helix {
    pub group: ObjectId,
    pub strands: [ObjectId; 2],
    pub rungs: Vec<ObjectId>,
}

fn strand_point(config: &HelixConfig, angle: f32, y: f32) -> Vec3 {
    Vec3::new(angle.cos() * config.radius, y, angle.sin() * config.radius)
}

/// Two phase-shifted strands of sphere markers wound around the Y axis, with
/// rungs linking them at a regular interval.
pub fn build_helix(scene: &mut Scene, config: &HelixConfig) -> Helix {
    let group = scene.add_object(Object3D::new("Helix", Node::Group));

    let marker = scene.add_geometry(MeshGeometry::sphere(config.marker_radius, 8, 8));
    let strand_materials = [
        scene.add_material(MeshMaterial::solid(ACCENT_PRIMARY, 0.8)),
        scene.add_material(MeshMaterial::solid(ACCENT_SECONDARY, 0.8)),
    ];
    let rung_material = LineMaterial {
        color: RUNG_GREY,
        opacity: 0.4,
    };

    let mut rungs = Vec::new();
    let strands = [0u32, 1].map(|strand| {
        let strand_group = scene.add_child(
            Some(group),
            Object3D::new(format!("Strand {strand}"), Node::Group),
        );

        for i in 0..config.segments {
            let t = i as f32 / config.segments as f32;
            let angle = t * TAU * config.turns + strand as f32 * PI;
            let y = t * config.height - config.height / 2.0;
            let position = strand_point(config, angle, y);

            scene.add_child(
                Some(strand_group),
                Object3D::new(
                    format!("Marker {strand}/{i}"),
                    Node::Mesh(Mesh {
                        geometry: marker,
                        material: strand_materials[strand as usize],
                    }),
                )
                .with_translation(position),
            );

            if strand == 0 && i % RUNG_INTERVAL == 0 {
                let rung = scene.add_child(
                    Some(strand_group),
                    Object3D::new(
                        format!("Rung {i}"),
                        Node::Line(Line {
                            start: position,
                            end: strand_point(config, angle + PI, y),
                            material: rung_material.clone(),
                        }),
                    ),
                );
                rungs.push(rung);
            }
        }

        strand_group
    });

    Helix {
        group,
        strands,
        rungs,
    }
}
