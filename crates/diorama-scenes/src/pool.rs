//! Fixed-capacity particle pool.

use diorama_engine::scene::DrawList;
use glam::Mat4;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SceneError;
use crate::particle::{Particle, ParticleParams, SpinMode};

/// A fixed number of particles, recycled in place.
///
/// The pool owns its random source so that a seeded pool replays the same
/// sequence of respawns.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Box<[Particle]>,
    rng: StdRng,
    spin: SpinMode,
}

impl ParticlePool {
    /// Creates `count` freshly sampled particles.
    ///
    /// With `seed` set the pool is deterministic; otherwise it seeds from the OS.
    pub fn new(count: usize, seed: Option<u64>) -> Result<Self, SceneError> {
        if count == 0 {
            return Err(SceneError::EmptyPool);
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let particles = (0..count)
            .map(|_| Particle::new(ParticleParams::sample(&mut rng)))
            .collect();

        Ok(Self {
            particles,
            rng,
            spin: SpinMode::default(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always false; an empty pool cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn spin_mode(&self) -> SpinMode {
        self.spin
    }

    pub fn set_spin_mode(&mut self, spin: SpinMode) {
        self.spin = spin;
        for p in self.particles.iter_mut() {
            p.set_spin_mode(spin);
        }
    }

    pub fn update(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.update(dt);
        }
    }

    /// Records every particle in pool order.
    pub fn draw(&self, list: &mut DrawList, parent: Mat4) {
        for p in self.particles.iter() {
            p.draw(list, parent);
        }
    }

    /// With probability 1/2, respawns one uniformly chosen particle.
    ///
    /// Returns the respawned index, if any.
    pub fn dropout(&mut self) -> Option<usize> {
        if !self.rng.random_bool(0.5) {
            return None;
        }
        let index = self.rng.random_range(0..self.particles.len());
        self.respawn(index);
        log::trace!("dropout respawned particle {index}");
        Some(index)
    }

    /// Respawns every particle past its lifetime distance; returns how many.
    pub fn prune(&mut self) -> usize {
        let mut respawned = 0;
        for index in 0..self.particles.len() {
            if self.particles[index].past_life() {
                self.respawn(index);
                respawned += 1;
            }
        }
        if respawned > 0 {
            log::trace!("pruned {respawned} expired particles");
        }
        respawned
    }

    /// Resamples the particle at `index` in place.
    pub fn respawn(&mut self, index: usize) {
        let params = ParticleParams::sample(&mut self.rng);
        self.particles[index].reset(&params);
    }
}
