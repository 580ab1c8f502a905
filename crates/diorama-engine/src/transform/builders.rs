use glam::{Mat4, Vec3};

/// Scale applied to an outline pass so edges sit just outside the filled surface.
pub const OUTLINE_EPSILON: f32 = 1.001;

/// Rotation about X, then Y, then Z axes (matrix order `Rx * Ry * Rz`).
#[inline]
pub fn rotate(x_deg: f32, y_deg: f32, z_deg: f32) -> Mat4 {
    Mat4::from_rotation_x(x_deg.to_radians())
        * Mat4::from_rotation_y(y_deg.to_radians())
        * Mat4::from_rotation_z(z_deg.to_radians())
}

/// Rotation of `deg` degrees about `axis`.
///
/// The axis is normalized. A zero-length (or non-finite) axis yields identity.
#[inline]
pub fn rotate_about(deg: f32, axis: Vec3) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, deg.to_radians()),
        None => Mat4::IDENTITY,
    }
}

#[inline]
pub fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

#[inline]
pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

#[inline]
pub fn uniform_scale(s: f32) -> Mat4 {
    Mat4::from_scale(Vec3::splat(s))
}

/// Camera transform for a viewer standing at `eye` looking down -Z.
#[inline]
pub fn view_from_eye(eye: Vec3) -> Mat4 {
    Mat4::from_translation(-eye)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    const EPS: f32 = 1e-5;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    // ── composition order ─────────────────────────────────────────────────

    #[test]
    fn transforms_apply_right_to_left() {
        let m = translate(1.0, 0.0, 0.0) * scale(2.0, 2.0, 2.0);
        // Scale first, then translate.
        assert!(approx(m.transform_point3(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(3.0, 0.0, 0.0)));

        let m = scale(2.0, 2.0, 2.0) * translate(1.0, 0.0, 0.0);
        assert!(approx(m.transform_point3(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn rotate_z_quarter_turn() {
        let m = rotate(0.0, 0.0, 90.0);
        assert!(approx(m.transform_point3(Vec3::X), Vec3::Y));
    }

    #[test]
    fn rotate_orders_x_then_y_then_z() {
        let m = rotate(90.0, 90.0, 0.0);
        let expected = Mat4::from_rotation_x(90f32.to_radians()) * Mat4::from_rotation_y(90f32.to_radians());
        let p = Vec3::new(0.3, -0.7, 1.1);
        assert!(approx(m.transform_point3(p), expected.transform_point3(p)));
    }

    // ── rotate_about ──────────────────────────────────────────────────────

    #[test]
    fn rotate_about_normalizes_axis() {
        let a = rotate_about(30.0, Vec3::new(0.0, 5.0, 0.0));
        let b = rotate(0.0, 30.0, 0.0);
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(approx(a.transform_point3(p), b.transform_point3(p)));
    }

    #[test]
    fn rotate_about_zero_axis_is_identity() {
        let m = rotate_about(45.0, Vec3::ZERO);
        assert_eq!(m, Mat4::IDENTITY);
        assert!(!m.is_nan());
    }

    // ── misc ──────────────────────────────────────────────────────────────

    #[test]
    fn view_from_eye_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.5, 2.0);
        let v = view_from_eye(eye);
        assert!(approx(v.transform_point3(eye), Vec3::ZERO));
    }

    #[test]
    fn uniform_scale_scales_homogeneous_point() {
        let m = uniform_scale(0.1);
        let p = m * Vec4::new(1.0, 1.0, 1.0, 1.0);
        assert!((p.x - 0.1).abs() < EPS && (p.w - 1.0).abs() < EPS);
    }
}
