/// Smooth periodic oscillation between `min` and `max`.
///
/// `wave(min, max, x) = min + (max - min) * 0.5 * (sin x + 1)`: period `2π` in
/// `x`, midpoint at `x = 0`, `max` at `π/2`, `min` at `3π/2`.
#[inline]
pub fn wave(min: f32, max: f32, x: f32) -> f32 {
    min + (max - min) * 0.5 * (x.sin() + 1.0)
}
