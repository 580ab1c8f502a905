use std::time::Duration;

use clap::{Parser, ValueEnum};
use diorama_scenes::campfire::DEFAULT_PARTICLES;
use diorama_scenes::particle::SpinMode;
use diorama_scenes::{
    Campfire, CampfireConfig, DropoutPolicy, Robot, RobotConfig, Scene, SceneError,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SceneArg {
    #[default]
    Campfire,
    Robot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SpinArg {
    /// Constant tumbling rate
    #[default]
    Incremental,
    /// Tumbling that speeds up over each particle's life
    Compounding,
}

impl From<SpinArg> for SpinMode {
    fn from(arg: SpinArg) -> Self {
        match arg {
            SpinArg::Incremental => SpinMode::Incremental,
            SpinArg::Compounding => SpinMode::Compounding,
        }
    }
}

/// Real-time campfire and walking robot scenes.
///
/// Mouse buttons steer the campfire orbit (left/right pitch, middle spins,
/// the active button again freezes). Escape or Q quits.
#[derive(Debug, Parser)]
#[command(name = "diorama", version, about)]
pub struct Cli {
    /// Scene to show
    #[arg(long, value_enum, default_value_t = SceneArg::Campfire)]
    pub scene: SceneArg,

    /// Number of flame particles
    #[arg(long, default_value_t = DEFAULT_PARTICLES)]
    pub particles: usize,

    /// Seed for a reproducible flame
    #[arg(long)]
    pub seed: Option<u64>,

    /// Particle tumbling mode
    #[arg(long, value_enum, default_value_t = SpinArg::Incremental)]
    pub spin: SpinArg,

    /// Respawn a random particle (with probability 1/2) every N frames
    #[arg(long, value_name = "N")]
    pub dropout_every: Option<u32>,

    /// Log filter, overrides RUST_LOG (e.g. "debug" or "diorama_scenes=trace")
    #[arg(long)]
    pub log: Option<String>,

    /// Icosphere subdivision level for robot joints
    #[arg(long, default_value_t = 1)]
    pub icosphere_subdivisions: u32,

    /// Report raw frame deltas instead of clamping long stalls to 250 ms
    #[arg(long)]
    pub unclamped_dt: bool,

    #[arg(long, default_value_t = 500.0)]
    pub width: f64,

    #[arg(long, default_value_t = 500.0)]
    pub height: f64,
}

impl Cli {
    pub fn dropout_policy(&self) -> DropoutPolicy {
        match self.dropout_every {
            None => DropoutPolicy::Never,
            Some(1) => DropoutPolicy::EveryFrame,
            Some(n) => DropoutPolicy::EveryNthFrame(n),
        }
    }

    pub fn max_frame_delta(&self) -> Option<Duration> {
        (!self.unclamped_dt).then(|| Duration::from_millis(250))
    }

    pub fn build_scene(&self) -> Result<Box<dyn Scene>, SceneError> {
        Ok(match self.scene {
            SceneArg::Campfire => Box::new(Campfire::new(CampfireConfig {
                particles: self.particles,
                seed: self.seed,
                spin: self.spin.into(),
                dropout: self.dropout_policy(),
            })?),
            SceneArg::Robot => Box::new(Robot::new(RobotConfig::default())),
        })
    }
}
