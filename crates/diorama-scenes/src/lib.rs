//! Diorama scenes.
//!
//! The simulation core behind the two scenes: a fixed pool of flame particles
//! (campfire) and a waveform-driven articulated figure (walking robot). Scenes
//! advance from a [`SceneTime`](diorama_engine::time::SceneTime) and record their
//! output into a [`DrawList`](diorama_engine::scene::DrawList); they never touch
//! the GPU.

pub mod camera;
pub mod campfire;
pub mod error;
pub mod particle;
pub mod pool;
pub mod pose;
pub mod robot;
pub mod scene;
pub mod wave;

pub use campfire::{Campfire, CampfireConfig, DropoutPolicy};
pub use error::SceneError;
pub use robot::{Robot, RobotConfig};
pub use scene::Scene;
