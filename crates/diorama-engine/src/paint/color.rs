/// Linear straight-alpha RGBA color.
///
/// RGB channels may temporarily exceed 1.0 (e.g. after [`Color::lighten`]); the
/// renderer saturates on output.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const FLAME_ORANGE: Color = Color::rgb(1.0, 0.6, 0.0);
    pub const LOG_BROWN: Color = Color::rgb(0.6, 0.3, 0.0);
    pub const GRASS: Color = Color::rgb(0.0, 1.0, 0.0);

    pub const STEEL: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const DARK_STEEL: Color = Color::rgb(0.3, 0.3, 0.3);
    pub const JOINT_BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const EFFECTOR_RED: Color = Color::rgb(0.8, 0.2, 0.2);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Adds `amount` to every RGB channel; alpha is left untouched.
    #[inline]
    pub fn lighten(self, amount: f32) -> Self {
        Self {
            r: self.r + amount,
            g: self.g + amount,
            b: self.b + amount,
            a: self.a,
        }
    }

    /// Clamps all channels to `[0, 1]`.
    #[inline]
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// wgpu clear value.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_keeps_alpha() {
        let c = Color::FLAME_ORANGE.with_alpha(0.4).lighten(0.2);
        let expected = [1.2, 0.8, 0.2, 0.4];
        for (got, want) in c.to_array().iter().zip(expected) {
            assert!((got - want).abs() < 1e-6);
        }
        assert_eq!(c.a, 0.4);
    }

    #[test]
    fn clamped_saturates_every_channel() {
        let c = Color::rgba(1.2, -0.1, 0.5, 3.0).clamped();
        assert_eq!(c, Color::rgba(1.0, 0.0, 0.5, 1.0));
    }
}
