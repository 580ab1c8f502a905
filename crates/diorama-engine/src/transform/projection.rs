use glam::Mat4;

use super::TransformError;

/// Perspective projection parameters (vertical field of view in degrees).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    pub fovy_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    #[inline]
    pub const fn new(fovy_deg: f32, near: f32, far: f32) -> Self {
        Self { fovy_deg, near, far }
    }

    /// Builds a right-handed perspective matrix with a `[0, 1]` depth range.
    pub fn matrix(&self, aspect: f32) -> Result<Mat4, TransformError> {
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(TransformError::InvalidAspect(aspect));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(TransformError::InvalidClipPlanes {
                near: self.near,
                far: self.far,
            });
        }
        Ok(Mat4::perspective_rh(
            self.fovy_deg.to_radians(),
            aspect,
            self.near,
            self.far,
        ))
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(45.0, 0.5, 5.0)
    }
}

/// Width / height, or `None` when either side is degenerate.
#[inline]
pub fn aspect(width: f32, height: f32) -> Option<f32> {
    if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
        Some(width / height)
    } else {
        None
    }
}
