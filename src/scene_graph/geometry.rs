use std::f32::consts::{PI, TAU};

use glam::Vec3;
use id_arena::Id;
use itertools::Itertools;

pub type GeometryId = Id<MeshGeometry>;

/// Indexed triangle mesh in object space.
#[derive(Debug, Clone)]
pub struct MeshGeometry {
    pub name: &'static str,
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

/// The primitive shapes the floating-shapes scene draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Box,
    Sphere,
    Cone,
    Octahedron,
    Tetrahedron,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Box,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cone,
        PrimitiveKind::Octahedron,
        PrimitiveKind::Tetrahedron,
    ];

    /// Builds the hero scene's size for this primitive.
    pub fn build(self) -> MeshGeometry {
        match self {
            PrimitiveKind::Box => MeshGeometry::cuboid(0.5, 0.5, 0.5),
            PrimitiveKind::Sphere => MeshGeometry::sphere(0.3, 16, 16),
            PrimitiveKind::Cone => MeshGeometry::cone(0.3, 0.6, 8),
            PrimitiveKind::Octahedron => MeshGeometry::octahedron(0.4),
            PrimitiveKind::Tetrahedron => MeshGeometry::tetrahedron(0.4),
        }
    }
}

impl MeshGeometry {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique undirected triangle edges, as drawn in wireframe mode.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        self.indices
            .chunks_exact(3)
            .flat_map(|tri| [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])])
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .unique()
            .collect()
    }

    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let h = Vec3::new(width, height, depth) * 0.5;
        let positions = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // back
            4, 5, 6, 4, 6, 7, // front
            0, 1, 5, 0, 5, 4, // bottom
            3, 7, 6, 3, 6, 2, // top
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
        ];

        Self {
            name: "Box",
            positions,
            indices,
        }
    }

    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        let row = width_segments + 1;

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                positions.push(Vec3::new(
                    -radius * (u * TAU).cos() * (v * PI).sin(),
                    radius * (v * PI).cos(),
                    radius * (u * TAU).sin() * (v * PI).sin(),
                ));
            }
        }

        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                // The pole rows collapse to a point, so each contributes one triangle per quad.
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            name: "Sphere",
            positions,
            indices,
        }
    }

    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        let half = height * 0.5;
        let mut positions = vec![Vec3::new(0.0, half, 0.0), Vec3::new(0.0, -half, 0.0)];
        let mut indices = Vec::new();

        for i in 0..radial_segments {
            let theta = i as f32 / radial_segments as f32 * TAU;
            positions.push(Vec3::new(radius * theta.sin(), -half, radius * theta.cos()));
        }

        for i in 0..radial_segments {
            let current = 2 + i;
            let next = 2 + (i + 1) % radial_segments;
            indices.extend_from_slice(&[0, current, next]);
            indices.extend_from_slice(&[1, next, current]);
        }

        Self {
            name: "Cone",
            positions,
            indices,
        }
    }

    pub fn octahedron(radius: f32) -> Self {
        let positions = vec![
            Vec3::X * radius,
            Vec3::NEG_X * radius,
            Vec3::Y * radius,
            Vec3::NEG_Y * radius,
            Vec3::Z * radius,
            Vec3::NEG_Z * radius,
        ];

        #[rustfmt::skip]
        let indices = vec![
            0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2,
            1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
        ];

        Self {
            name: "Octahedron",
            positions,
            indices,
        }
    }

    pub fn tetrahedron(radius: f32) -> Self {
        let positions = [
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
        ]
        .into_iter()
        .map(|corner| corner.normalize() * radius)
        .collect();

        Self {
            name: "Tetrahedron",
            positions,
            indices: vec![2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_topology() {
        let cuboid = MeshGeometry::cuboid(0.5, 0.5, 0.5);
        assert_eq!(cuboid.positions.len(), 8);
        assert_eq!(cuboid.triangle_count(), 12);
        // 12 cube edges plus one diagonal per face.
        assert_eq!(cuboid.edges().len(), 18);
    }

    #[test]
    fn platonic_solids() {
        let octahedron = MeshGeometry::octahedron(0.4);
        assert_eq!(octahedron.triangle_count(), 8);
        assert_eq!(octahedron.edges().len(), 12);

        let tetrahedron = MeshGeometry::tetrahedron(0.4);
        assert_eq!(tetrahedron.triangle_count(), 4);
        assert_eq!(tetrahedron.edges().len(), 6);
        for p in &tetrahedron.positions {
            assert!((p.length() - 0.4).abs() < 1e-5);
        }
    }

    #[test]
    fn sphere_points_lie_on_radius() {
        let sphere = MeshGeometry::sphere(0.3, 16, 16);
        assert_eq!(sphere.positions.len(), 17 * 17);
        assert_eq!(sphere.triangle_count(), 16 * 16 * 2 - 2 * 16);
        for p in &sphere.positions {
            assert!((p.length() - 0.3).abs() < 1e-5);
        }
        assert!(sphere.indices.iter().all(|&i| (i as usize) < sphere.positions.len()));
    }

    #[test]
    fn cone_has_apex_and_cap() {
        let cone = MeshGeometry::cone(0.3, 0.6, 8);
        assert_eq!(cone.positions.len(), 10);
        assert_eq!(cone.triangle_count(), 16);
        assert_eq!(cone.positions[0], Vec3::new(0.0, 0.3, 0.0));
    }

    #[test]
    fn every_kind_builds() {
        for kind in PrimitiveKind::ALL {
            let geometry = kind.build();
            assert!(geometry.triangle_count() > 0, "{}", geometry.name);
        }
    }
}
