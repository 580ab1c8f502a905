//! Walking robot on a scrolling checkerboard floor.

use diorama_engine::input::MouseButton;
use diorama_engine::paint::Color;
use diorama_engine::scene::DrawList;
use diorama_engine::time::SceneTime;
use diorama_engine::transform::Projection;
use glam::Vec3;

use crate::camera::Orbit;
use crate::pose::{draw_robot, JointAngles, WALK_FREQUENCY};
use crate::scene::Scene;

pub const ROBOT_VIEWER: Vec3 = Vec3::new(0.0, 0.5, 1.8);

#[derive(Debug, Clone, PartialEq)]
pub struct RobotConfig {
    /// Scene time multiplier for the gait.
    pub walk_frequency: f32,
    /// Spin the scene about Y every frame.
    pub turntable: bool,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            walk_frequency: WALK_FREQUENCY,
            turntable: true,
        }
    }
}

pub struct Robot {
    orbit: Orbit,
    config: RobotConfig,
    last_pose: Option<JointAngles>,
}

impl Robot {
    pub fn new(config: RobotConfig) -> Self {
        log::info!(
            "robot: walk frequency {}, turntable {}",
            config.walk_frequency,
            config.turntable
        );
        Self {
            orbit: Orbit::turntable(ROBOT_VIEWER),
            config,
            last_pose: None,
        }
    }

    /// Joint angles used by the most recent frame.
    pub fn last_pose(&self) -> Option<JointAngles> {
        self.last_pose
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }
}

impl Scene for Robot {
    fn title(&self) -> &str {
        "Walking Robot"
    }

    fn projection(&self) -> Projection {
        Projection::new(45.0, 0.5, 5.0)
    }

    fn clear_color(&self) -> Color {
        Color::WHITE
    }

    fn on_pointer_button(&mut self, button: MouseButton) {
        log::debug!("robot ignores {button:?}; the orbit is fixed to Y");
    }

    fn frame_step(&mut self, time: &SceneTime, list: &mut DrawList) {
        if self.config.turntable {
            self.orbit.tick();
        }
        let pose = draw_robot(
            list,
            self.orbit.transform(),
            time.time,
            self.config.walk_frequency,
        );
        self.last_pose = Some(pose);
    }
}
