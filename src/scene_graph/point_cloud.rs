use std::cell::Cell;

use glam::Vec3;

use crate::math::Color;

/// Per-vertex point data with a dirty flag for the position buffer.
/// The renderer reuses its sprite vertices until the flag is raised.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: Vec<Color>,
    pub sizes: Option<Vec<f32>>,
    positions_dirty: Cell<bool>,
}

impl PointCloud {
    pub fn new(positions: Vec<Vec3>, colors: Vec<Color>, sizes: Option<Vec<f32>>) -> Self {
        debug_assert_eq!(positions.len(), colors.len());
        Self {
            positions,
            colors,
            sizes,
            positions_dirty: Cell::new(true),
        }
    }

    pub fn size_of(&self, index: usize, default_size: f32) -> f32 {
        self.sizes
            .as_ref()
            .and_then(|sizes| sizes.get(index).copied())
            .unwrap_or(default_size)
    }

    /// Flags positions for re-upload after in-place edits.
    pub fn mark_positions_dirty(&mut self) {
        self.positions_dirty.set(true);
    }

    pub fn positions_dirty(&self) -> bool {
        self.positions_dirty.get()
    }

    /// Called once the current positions have been consumed.
    pub fn clear_dirty(&self) {
        self.positions_dirty.set(false);
    }
}

#[cfg(test)]
impl PointCloud {
    pub fn len(&self) -> usize {
        self.positions.len()
    }
}
