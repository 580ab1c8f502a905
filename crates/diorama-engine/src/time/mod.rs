//! Time subsystem.
//!
//! Provides a wall-clock driven scene clock decoupled from the runtime.
//! Intended usage:
//! - one `SceneClock` per window (or per render loop)
//! - call `tick()` once per presented frame to obtain `SceneTime`
//! - tests drive `on_sample()` directly with synthetic millisecond samples

mod scene_clock;

pub use scene_clock::{SceneClock, SceneTime, SCENE_TIME_MODULUS_MS};
