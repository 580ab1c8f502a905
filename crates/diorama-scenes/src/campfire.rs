//! Campfire: crossed logs on a patch of grass with a particle flame.

use diorama_engine::input::MouseButton;
use diorama_engine::mesh::MeshId;
use diorama_engine::paint::{Color, Material};
use diorama_engine::scene::DrawList;
use diorama_engine::time::SceneTime;
use diorama_engine::transform::{rotate, scale, translate, Projection};
use glam::{Mat4, Vec3};

use crate::camera::Orbit;
use crate::error::SceneError;
use crate::particle::SpinMode;
use crate::pool::ParticlePool;
use crate::scene::Scene;

pub const CAMPFIRE_VIEWER: Vec3 = Vec3::new(0.0, 0.5, 2.0);
pub const DEFAULT_PARTICLES: usize = 12;

/// When the campfire injects random respawns on top of lifetime pruning.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DropoutPolicy {
    #[default]
    Never,
    EveryFrame,
    /// Every `n`th frame, counting from the first.
    EveryNthFrame(u32),
}

impl DropoutPolicy {
    #[inline]
    fn applies(self, frame: u64) -> bool {
        match self {
            DropoutPolicy::Never => false,
            DropoutPolicy::EveryFrame => true,
            DropoutPolicy::EveryNthFrame(n) => frame % u64::from(n.max(1)) == 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampfireConfig {
    pub particles: usize,
    /// Fixed seed for a reproducible flame; OS entropy otherwise.
    pub seed: Option<u64>,
    pub spin: SpinMode,
    pub dropout: DropoutPolicy,
}

impl Default for CampfireConfig {
    fn default() -> Self {
        Self {
            particles: DEFAULT_PARTICLES,
            seed: None,
            spin: SpinMode::default(),
            dropout: DropoutPolicy::default(),
        }
    }
}

pub struct Campfire {
    pool: ParticlePool,
    orbit: Orbit,
    dropout: DropoutPolicy,
    frame: u64,
}

impl Campfire {
    pub fn new(config: CampfireConfig) -> Result<Self, SceneError> {
        if config.dropout == DropoutPolicy::EveryNthFrame(0) {
            return Err(SceneError::ZeroDropoutInterval);
        }

        let mut pool = ParticlePool::new(config.particles, config.seed)?;
        pool.set_spin_mode(config.spin);

        log::info!(
            "campfire: {} particles, spin {:?}, dropout {:?}, seed {:?}",
            pool.len(),
            config.spin,
            config.dropout,
            config.seed
        );

        Ok(Self {
            pool,
            orbit: Orbit::interactive(CAMPFIRE_VIEWER),
            dropout: config.dropout,
            frame: 0,
        })
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    fn draw_ground(list: &mut DrawList, camera: Mat4) {
        list.surface(
            MeshId::Cube,
            camera * scale(1.5, 0.001, 1.5),
            Color::GRASS,
            Material::Textured,
        );

        let log_size = scale(0.5, 0.1, 0.1);
        let logs = [
            translate(-0.06, 0.15, 0.0) * rotate(0.0, 0.0, 40.0),
            translate(0.06, 0.15, 0.0) * rotate(0.0, 0.0, -40.0),
            translate(0.0, 0.15, 0.06) * rotate(40.0, 90.0, 0.0),
            translate(0.0, 0.15, -0.06) * rotate(-40.0, 90.0, 0.0),
        ];
        for placement in logs {
            list.surface(
                MeshId::Cube,
                camera * placement * log_size,
                Color::LOG_BROWN,
                Material::Textured,
            );
        }
    }
}

impl Scene for Campfire {
    fn title(&self) -> &str {
        "Campfire"
    }

    fn projection(&self) -> Projection {
        Projection::new(60.0, 0.5, 5.0)
    }

    fn clear_color(&self) -> Color {
        Color::rgb(0.9, 0.9, 0.9)
    }

    fn on_pointer_button(&mut self, button: MouseButton) {
        self.orbit.on_pointer_button(button);
    }

    /// Draws last frame's particles, then integrates and recycles them.
    fn frame_step(&mut self, time: &SceneTime, list: &mut DrawList) {
        self.orbit.tick();
        let camera = self.orbit.transform();

        Self::draw_ground(list, camera);
        self.pool.draw(list, camera);

        self.pool.update(time.delta);
        self.pool.prune();
        if self.dropout.applies(self.frame) {
            self.pool.dropout();
        }

        self.frame += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diorama_engine::scene::Layer;

    fn seeded(dropout: DropoutPolicy) -> Campfire {
        Campfire::new(CampfireConfig {
            seed: Some(42),
            dropout,
            ..CampfireConfig::default()
        })
        .unwrap()
    }

    fn at(time: f32, delta: f32, frame_index: u64) -> SceneTime {
        SceneTime {
            time,
            delta,
            frame_index,
        }
    }

    #[test]
    fn rejects_bad_config() {
        let empty = CampfireConfig {
            particles: 0,
            ..CampfireConfig::default()
        };
        assert_eq!(Campfire::new(empty).err(), Some(SceneError::EmptyPool));

        let zero = CampfireConfig {
            dropout: DropoutPolicy::EveryNthFrame(0),
            ..CampfireConfig::default()
        };
        assert_eq!(Campfire::new(zero).err(), Some(SceneError::ZeroDropoutInterval));
    }

    #[test]
    fn frame_records_ground_then_flame() {
        let mut fire = seeded(DropoutPolicy::Never);
        let mut list = DrawList::new();
        fire.frame_step(&at(1.0, 1.0 / 60.0, 0), &mut list);

        // grass + 4 logs + 12 particles
        assert_eq!(list.len(), 17);

        let layers: Vec<Layer> = list.iter_in_paint_order().map(|i| i.key.layer).collect();
        assert!(layers[..5].iter().all(|l| *l == Layer::OPAQUE));
        assert!(layers[5..].iter().all(|l| *l == Layer::TRANSLUCENT));
    }

    #[test]
    fn particles_never_outlive_their_distance() {
        let mut fire = seeded(DropoutPolicy::EveryNthFrame(3));
        let mut list = DrawList::new();
        for frame in 0..600 {
            list.clear();
            fire.frame_step(&at(frame as f32 / 60.0, 1.0 / 60.0, frame), &mut list);
            assert!(fire.pool().particles().iter().all(|p| !p.past_life()));
            assert_eq!(fire.pool().len(), DEFAULT_PARTICLES);
        }
    }

    #[test]
    fn zero_delta_freezes_particles() {
        let mut fire = seeded(DropoutPolicy::Never);
        let before = fire.pool().particles().to_vec();
        let mut list = DrawList::new();
        fire.frame_step(&at(5.0, 0.0, 0), &mut list);
        assert_eq!(fire.pool().particles(), before.as_slice());
    }

    #[test]
    fn dropout_policy_schedule() {
        assert!(!DropoutPolicy::Never.applies(0));
        assert!(DropoutPolicy::EveryFrame.applies(7));
        assert!(DropoutPolicy::EveryNthFrame(4).applies(8));
        assert!(!DropoutPolicy::EveryNthFrame(4).applies(9));
    }

    #[test]
    fn mouse_steers_orbit() {
        let mut fire = seeded(DropoutPolicy::Never);
        fire.on_pointer_button(MouseButton::Left);
        let mut list = DrawList::new();
        fire.frame_step(&at(0.0, 0.0, 0), &mut list);
        assert!((fire.orbit().angles().x - 0.5).abs() < 1e-6);
    }
}
