use std::f32::consts::TAU;
use std::ops::Range;

use glam::Vec3;
use rand::Rng;

use crate::math::color::accent_mix;
use crate::scene_graph::PointCloud;

/// Points spread uniformly in an origin-centred box of size `extent`, each
/// coloured somewhere between the two accents.
pub fn box_cloud<R: Rng + ?Sized>(rng: &mut R, count: usize, extent: Vec3) -> PointCloud {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);

    for _ in 0..count {
        positions.push(Vec3::new(
            rng.gen_range(-0.5..0.5) * extent.x,
            rng.gen_range(-0.5..0.5) * extent.y,
            rng.gen_range(-0.5..0.5) * extent.z,
        ));
        colors.push(accent_mix(rng.gen()));
    }

    PointCloud::new(positions, colors, None)
}

/// Points in a cylindrical shell around the Y axis with random sprite sizes.
pub fn ring_cloud<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    radius: Range<f32>,
    height: f32,
    size: Range<f32>,
) -> PointCloud {
    let mut positions = Vec::with_capacity(count);
    let mut colors = Vec::with_capacity(count);
    let mut sizes = Vec::with_capacity(count);

    for _ in 0..count {
        let r = rng.gen_range(radius.clone());
        let angle = rng.gen_range(0.0..TAU);
        let y = rng.gen_range(-0.5..0.5) * height;

        positions.push(Vec3::new(angle.cos() * r, y, angle.sin() * r));
        colors.push(accent_mix(rng.gen()));
        sizes.push(rng.gen_range(size.clone()));
    }

    PointCloud::new(positions, colors, Some(sizes))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::math::color::{Color, ACCENT_PRIMARY, ACCENT_SECONDARY};
    use rand::{rngs::StdRng, SeedableRng};

    /// Asserts `color` lies on the segment between the two accents.
    pub(crate) fn assert_accent_blend(color: Color) {
        for channel in [color.r, color.g, color.b] {
            assert!((0.0..=1.0).contains(&channel));
        }

        let t = (color.r - ACCENT_PRIMARY.r) / (ACCENT_SECONDARY.r - ACCENT_PRIMARY.r);
        assert!((-1e-4..=1.0 + 1e-4).contains(&t), "mix ratio {t} out of range");

        let expected = ACCENT_PRIMARY.lerp(ACCENT_SECONDARY, t);
        assert!((expected.g - color.g).abs() < 1e-4);
        assert!((expected.b - color.b).abs() < 1e-4);
    }

    #[test]
    fn box_cloud_stays_in_extent() {
        let mut rng = StdRng::seed_from_u64(7);
        let cloud = box_cloud(&mut rng, 100, Vec3::new(50.0, 50.0, 20.0));

        assert_eq!(cloud.len(), 100);
        assert!(cloud.sizes.is_none());
        for p in &cloud.positions {
            assert!(p.x.abs() <= 25.0 && p.y.abs() <= 25.0 && p.z.abs() <= 10.0);
        }
        cloud.colors.iter().copied().for_each(assert_accent_blend);
    }

    #[test]
    fn ring_cloud_stays_in_shell() {
        let mut rng = StdRng::seed_from_u64(11);
        let cloud = ring_cloud(&mut rng, 50, 4.0..7.0, 8.0, 1.0..4.0);

        assert_eq!(cloud.len(), 50);
        for p in &cloud.positions {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((4.0 - 1e-4..7.0 + 1e-4).contains(&r));
            assert!(p.y.abs() <= 4.0);
        }
        for size in cloud.sizes.as_ref().unwrap() {
            assert!((1.0..4.0).contains(size));
        }
        cloud.colors.iter().copied().for_each(assert_accent_blend);
    }
}
