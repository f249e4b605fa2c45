use bytemuck::{Pod, Zeroable};

/// Linear RGB colour with channels in `[0, 1]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Primary brand accent.
pub const ACCENT_PRIMARY: Color = Color::from_hex(0x667eea);
/// Secondary brand accent.
pub const ACCENT_SECONDARY: Color = Color::from_hex(0x764ba2);
/// Helix rung colour.
pub const RUNG_GREY: Color = Color::from_hex(0x888888);

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

/// Blend between the two accent colours, `mix_ratio` in `[0, 1]`.
pub fn accent_mix(mix_ratio: f32) -> Color {
    ACCENT_PRIMARY.lerp(ACCENT_SECONDARY, mix_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_splits_channels() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn accent_mix_endpoints() {
        assert_eq!(accent_mix(0.0), ACCENT_PRIMARY);
        let end = accent_mix(1.0);
        assert!((end.r - ACCENT_SECONDARY.r).abs() < 1e-6);
        assert!((end.g - ACCENT_SECONDARY.g).abs() < 1e-6);
        assert!((end.b - ACCENT_SECONDARY.b).abs() < 1e-6);
    }

    #[test]
    fn lerp_midpoint() {
        let c = Color::new(0.0, 0.5, 1.0).lerp(Color::new(1.0, 0.5, 0.0), 0.5);
        assert_eq!(c, Color::new(0.5, 0.5, 0.5));
    }
}
