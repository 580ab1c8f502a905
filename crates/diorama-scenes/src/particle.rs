//! Single flame particle.
//!
//! A particle flies in a straight line away from [`EMISSION_ORIGIN`] while
//! tumbling about a fixed axis. It fades and whitens with distance and expires
//! once it passes its own `max_distance`. Particles are never destroyed; the
//! pool respawns them in place with freshly sampled [`ParticleParams`].

use diorama_engine::mesh::MeshId;
use diorama_engine::paint::Color;
use diorama_engine::scene::{DrawCmd, DrawList, Layer};
use diorama_engine::transform::{rotate_about, translate, uniform_scale};
use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

/// Point slightly above the floor that every particle flies away from.
pub const EMISSION_ORIGIN: Vec3 = Vec3::new(0.0, 0.2, 0.0);

/// Edge length of a drawn particle cube.
pub const PARTICLE_SIZE: f32 = 0.1;

/// Distance at which particles start lightening toward white.
const WHITEN_START: f32 = 0.3;

/// How the tumbling rotation accumulates between frames.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum SpinMode {
    /// Each frame rotates by `angular_speed * dt`: constant spin rate.
    #[default]
    Incremental,
    /// Each frame rotates by the total angle accumulated so far on top of the
    /// previous rotation, so the spin speeds up over the particle's life.
    Compounding,
}

/// Randomized per-life parameters of a particle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleParams {
    /// Distance from the emission origin at which the particle expires.
    pub max_distance: f32,
    /// Sampled x/z jitter, each component in ±0.045. Not applied to the
    /// start position: every life begins at [`EMISSION_ORIGIN`].
    pub offset: Vec2,
    pub speed: f32,
    /// Tumbling axis; components are 0 or 1, never all zero.
    pub rot_axis: Vec3,
    /// Degrees per second.
    pub angular_speed: f32,
    /// Azimuth, radians.
    pub theta: f32,
    /// Elevation from the vertical, radians.
    pub incline: f32,
}

impl ParticleParams {
    /// Samples a fresh set of parameters.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        let max_distance = rng.random_range(5..=10) as f32 / 10.0;

        let mut shift = || {
            let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            sign * rng.random_range(0..10) as f32 * 0.005
        };
        let offset = Vec2::new(shift(), shift());

        let speed = rng.random_range(50..150) as f32 * 0.01;

        let rot_axis = loop {
            let axis = Vec3::new(
                rng.random_range(0..2) as f32,
                rng.random_range(0..2) as f32,
                rng.random_range(0..2) as f32,
            );
            if axis != Vec3::ZERO {
                break axis;
            }
        };

        let angular_speed = rng.random_range(5..10) as f32;
        let theta = (rng.random_range(0..360) as f32).to_radians();
        let incline = (rng.random_range(0..35) as f32).to_radians();

        Self {
            max_distance,
            offset,
            speed,
            rot_axis,
            angular_speed,
            theta,
            incline,
        }
    }

    /// Unit flight direction: `(sin i · sin θ, cos i, sin i · cos θ)`.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        let (sin_i, cos_i) = self.incline.sin_cos();
        let (sin_t, cos_t) = self.theta.sin_cos();
        Vec3::new(sin_i * sin_t, cos_i, sin_i * cos_t)
    }
}

/// One flame particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    params: ParticleParams,
    spin: SpinMode,

    position: Vec3,
    direction: Vec3,
    angle: f32,
    rotation: Mat4,
}

impl Particle {
    pub fn new(params: ParticleParams) -> Self {
        Self {
            params,
            spin: SpinMode::default(),
            position: EMISSION_ORIGIN,
            direction: params.direction(),
            angle: 0.0,
            rotation: Mat4::IDENTITY,
        }
    }

    pub fn with_spin_mode(mut self, spin: SpinMode) -> Self {
        self.spin = spin;
        self
    }

    /// Respawns in place: new parameters, back at the emission point, no rotation.
    ///
    /// The spin mode is a pool-wide setting and survives the reset.
    pub fn reset(&mut self, params: &ParticleParams) {
        self.params = *params;
        self.position = EMISSION_ORIGIN;
        self.direction = params.direction();
        self.angle = 0.0;
        self.rotation = Mat4::IDENTITY;
    }

    /// Integrates one step of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.direction = self.params.direction();
        self.position += self.params.speed * self.direction * dt;

        let step = self.params.angular_speed * dt;
        self.angle += step;

        let spin = match self.spin {
            SpinMode::Incremental => step,
            SpinMode::Compounding => self.angle,
        };
        self.rotation *= rotate_about(spin, self.params.rot_axis);
    }

    /// Euclidean distance from [`EMISSION_ORIGIN`].
    #[inline]
    pub fn distance(&self) -> f32 {
        self.position.distance(EMISSION_ORIGIN)
    }

    #[inline]
    pub fn past_life(&self) -> bool {
        self.distance() > self.params.max_distance
    }

    /// Opacity `1 - distance`, clamped to `[0, 1]`.
    #[inline]
    pub fn alpha(&self) -> f32 {
        (1.0 - self.distance()).clamp(0.0, 1.0)
    }

    /// Flame orange lightened toward white as the particle travels.
    pub fn color(&self) -> Color {
        let lighten = (self.distance() - WHITEN_START).max(0.0);
        Color::FLAME_ORANGE
            .lighten(lighten)
            .with_alpha(self.alpha())
    }

    /// Model transform relative to `parent`.
    pub fn transform(&self, parent: Mat4) -> Mat4 {
        parent
            * translate(self.position.x, self.position.y, self.position.z)
            * self.rotation
            * uniform_scale(PARTICLE_SIZE)
    }

    /// Records one translucent cube.
    pub fn draw(&self, list: &mut DrawList, parent: Mat4) {
        list.push(
            Layer::TRANSLUCENT,
            DrawCmd::fill(MeshId::Cube, self.transform(parent), self.color()),
        );
    }

    #[inline]
    pub fn params(&self) -> &ParticleParams {
        &self.params
    }

    #[inline]
    pub fn spin_mode(&self) -> SpinMode {
        self.spin
    }

    pub fn set_spin_mode(&mut self, spin: SpinMode) {
        self.spin = spin;
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Accumulated tumbling angle in degrees.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn rotation(&self) -> Mat4 {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPS: f32 = 1e-5;

    fn straight_up() -> ParticleParams {
        ParticleParams {
            max_distance: 1.0,
            offset: Vec2::new(0.045, -0.045),
            speed: 1.0,
            rot_axis: Vec3::Y,
            angular_speed: 5.0,
            theta: 0.0,
            incline: 0.0,
        }
    }

    // ── sampling ──────────────────────────────────────────────────────────

    #[test]
    fn sampled_params_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = ParticleParams::sample(&mut rng);
            assert!((0.5 - EPS..=1.0 + EPS).contains(&p.max_distance));
            assert!(p.offset.x.abs() <= 0.045 + EPS && p.offset.y.abs() <= 0.045 + EPS);
            assert!((0.5 - EPS..=1.49 + EPS).contains(&p.speed));
            assert_ne!(p.rot_axis, Vec3::ZERO);
            assert!((5.0..=9.0).contains(&p.angular_speed));
            assert!(p.theta >= 0.0 && p.theta < 360f32.to_radians());
            assert!(p.incline >= 0.0 && p.incline <= 34f32.to_radians() + EPS);
        }
    }

    #[test]
    fn direction_is_unit_for_every_step() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let mut p = Particle::new(ParticleParams::sample(&mut rng));
            for _ in 0..10 {
                p.update(1.0 / 60.0);
                assert!((p.direction().length() - 1.0).abs() < EPS);
            }
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn one_second_straight_up_expires() {
        let mut p = Particle::new(straight_up());
        assert_eq!(p.position(), EMISSION_ORIGIN);

        p.update(0.9);
        assert!(!p.past_life());

        p.update(0.1);
        assert!((p.position() - (EMISSION_ORIGIN + Vec3::Y)).length() < EPS);

        p.update(0.01);
        assert!(p.past_life());
    }

    #[test]
    fn new_and_reset_start_at_emission_origin() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..50 {
            let mut p = Particle::new(ParticleParams::sample(&mut rng));
            assert_eq!(p.position(), EMISSION_ORIGIN);
            assert_eq!(p.distance(), 0.0);

            p.update(0.5);
            p.reset(&ParticleParams::sample(&mut rng));
            assert_eq!(p.position(), EMISSION_ORIGIN);
            assert_eq!(p.alpha(), 1.0);
        }
    }

    #[test]
    fn reset_returns_to_emission_point() {
        let mut p = Particle::new(straight_up()).with_spin_mode(SpinMode::Compounding);
        p.update(0.8);
        assert!(p.distance() > 0.5);

        p.reset(&straight_up());

        assert!(p.distance() < EPS);
        assert_eq!(p.angle(), 0.0);
        assert_eq!(p.rotation(), Mat4::IDENTITY);
        assert_eq!(p.spin_mode(), SpinMode::Compounding);
    }

    // ── appearance ────────────────────────────────────────────────────────

    #[test]
    fn alpha_fades_and_clamps() {
        let mut p = Particle::new(straight_up());
        assert!((p.alpha() - 1.0).abs() < EPS);

        p.update(0.25);
        assert!((p.alpha() - 0.75).abs() < 1e-4);

        p.update(2.0);
        assert!(p.distance() > 1.0);
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn color_whitens_after_threshold() {
        let mut p = Particle::new(straight_up());
        p.update(0.2);
        assert_eq!(p.color().g, Color::FLAME_ORANGE.g);

        p.update(0.3);
        let c = p.color();
        assert!((c.g - (Color::FLAME_ORANGE.g + 0.2)).abs() < 1e-4);
        assert!((c.a - 0.5).abs() < 1e-4);
    }

    #[test]
    fn draw_records_translucent_cube() {
        let p = Particle::new(straight_up());
        let mut list = DrawList::new();
        p.draw(&mut list, Mat4::IDENTITY);

        assert_eq!(list.len(), 1);
        let item = &list.items()[0];
        assert_eq!(item.key.layer, Layer::TRANSLUCENT);
        assert_eq!(item.cmd.mesh, MeshId::Cube);
        let corner = item.cmd.transform.transform_point3(Vec3::splat(0.5));
        assert!((corner - (EMISSION_ORIGIN + Vec3::splat(0.05))).length() < EPS);
    }

    // ── spin ──────────────────────────────────────────────────────────────

    #[test]
    fn incremental_spin_matches_total_angle() {
        let mut p = Particle::new(straight_up());
        for _ in 0..4 {
            p.update(0.5);
        }
        let expected = rotate_about(10.0, Vec3::Y);
        assert!(p.rotation().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn compounding_spin_outpaces_incremental() {
        let mut p = Particle::new(straight_up()).with_spin_mode(SpinMode::Compounding);
        for _ in 0..4 {
            p.update(0.5);
        }
        // 2.5 + 5 + 7.5 + 10 degrees about Y.
        let expected = rotate_about(25.0, Vec3::Y);
        assert!(p.rotation().abs_diff_eq(expected, 1e-4));
        assert!((p.angle() - 10.0).abs() < EPS);
    }
}
