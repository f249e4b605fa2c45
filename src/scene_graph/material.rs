use id_arena::Id;

use crate::math::Color;

pub type MaterialId = Id<MeshMaterial>;

/// Unlit mesh material, optionally drawn as a wireframe.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshMaterial {
    pub color: Color,
    pub opacity: f32,
    pub wireframe: bool,
}

impl MeshMaterial {
    pub fn solid(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            wireframe: false,
        }
    }

    pub fn wireframe(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            wireframe: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    /// Default sprite size, used when the cloud carries no per-point sizes.
    pub size: f32,
    pub opacity: f32,
    pub blending: Blending,
    /// Scale sprites with distance from the camera.
    pub size_attenuation: bool,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            size: 1.0,
            opacity: 1.0,
            blending: Blending::Normal,
            size_attenuation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineMaterial {
    pub color: Color,
    pub opacity: f32,
}
