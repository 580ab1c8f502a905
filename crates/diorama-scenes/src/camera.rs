//! Orbiting scene camera.
//!
//! The camera sits at a fixed viewer position while the scene turns under it:
//! `translate(-viewer) * rotate(θx, θy, θz)`.

use diorama_engine::input::MouseButton;
use diorama_engine::transform::{rotate, view_from_eye};
use glam::{Mat4, Vec3};

/// Orbit advance per frame, degrees.
pub const ORBIT_STEP_DEG: f32 = 0.5;

/// Pitch range of the interactive orbit, degrees.
pub const PITCH_LIMITS: (f32, f32) = (-10.0, 70.0);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    viewer: Vec3,
    theta: [f32; 3],
    axis: Option<Axis>,
    /// Direction of pitch motion (+1 / -1).
    sign: f32,
    /// Button that selected the current axis; pressing it again freezes.
    active_button: Option<MouseButton>,
    interactive: bool,
}

impl Orbit {
    /// Endless spin about Y that ignores the mouse.
    pub fn turntable(viewer: Vec3) -> Self {
        Self {
            viewer,
            theta: [0.0; 3],
            axis: Some(Axis::Y),
            sign: 1.0,
            active_button: None,
            interactive: false,
        }
    }

    /// Mouse-steered orbit, initially spinning about Y.
    ///
    /// Left pitches up, right pitches down, middle spins about Y. Pressing the
    /// button that is already active freezes the orbit.
    pub fn interactive(viewer: Vec3) -> Self {
        Self {
            viewer,
            theta: [0.0; 3],
            axis: Some(Axis::Y),
            sign: 1.0,
            active_button: Some(MouseButton::Middle),
            interactive: true,
        }
    }

    pub fn on_pointer_button(&mut self, button: MouseButton) {
        if !self.interactive {
            return;
        }

        if self.active_button == Some(button) {
            self.axis = None;
            self.active_button = None;
            log::debug!("orbit frozen at {:?}", self.theta);
            return;
        }

        let (axis, sign) = match button {
            MouseButton::Left => (Axis::X, 1.0),
            MouseButton::Right => (Axis::X, -1.0),
            MouseButton::Middle => (Axis::Y, 1.0),
            MouseButton::Other(_) => return,
        };

        self.axis = Some(axis);
        self.sign = sign;
        self.active_button = Some(button);
    }

    /// Advances the active axis by one step.
    pub fn tick(&mut self) {
        let Some(axis) = self.axis else { return };

        let step = match axis {
            Axis::X => ORBIT_STEP_DEG * self.sign,
            Axis::Y | Axis::Z => ORBIT_STEP_DEG,
        };

        let theta = &mut self.theta[axis.index()];
        *theta += step;
        if *theta > 360.0 {
            *theta -= 360.0;
        }

        if self.interactive {
            let x = &mut self.theta[Axis::X.index()];
            *x = x.clamp(PITCH_LIMITS.0, PITCH_LIMITS.1);
        }
    }

    /// Orbit angles in degrees.
    #[inline]
    pub fn angles(&self) -> Vec3 {
        Vec3::from_array(self.theta)
    }

    #[inline]
    pub fn axis(&self) -> Option<Axis> {
        self.axis
    }

    #[inline]
    pub fn viewer(&self) -> Vec3 {
        self.viewer
    }

    /// Scene-to-eye transform.
    pub fn transform(&self) -> Mat4 {
        let [x, y, z] = self.theta;
        view_from_eye(self.viewer) * rotate(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn turntable_wraps_past_full_turn() {
        let mut orbit = Orbit::turntable(Vec3::ZERO);
        for _ in 0..721 {
            orbit.tick();
        }
        assert!((orbit.angles().y - 0.5).abs() < EPS);
    }

    #[test]
    fn turntable_ignores_mouse() {
        let mut orbit = Orbit::turntable(Vec3::ZERO);
        orbit.on_pointer_button(MouseButton::Left);
        orbit.tick();
        assert_eq!(orbit.axis(), Some(Axis::Y));
        assert_eq!(orbit.angles().x, 0.0);
    }

    #[test]
    fn buttons_select_pitch_direction() {
        let mut orbit = Orbit::interactive(Vec3::ZERO);
        orbit.on_pointer_button(MouseButton::Left);
        for _ in 0..10 {
            orbit.tick();
        }
        assert!((orbit.angles().x - 5.0).abs() < EPS);

        orbit.on_pointer_button(MouseButton::Right);
        for _ in 0..4 {
            orbit.tick();
        }
        assert!((orbit.angles().x - 3.0).abs() < EPS);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut orbit = Orbit::interactive(Vec3::ZERO);
        orbit.on_pointer_button(MouseButton::Left);
        for _ in 0..500 {
            orbit.tick();
        }
        assert_eq!(orbit.angles().x, PITCH_LIMITS.1);

        orbit.on_pointer_button(MouseButton::Right);
        for _ in 0..500 {
            orbit.tick();
        }
        assert_eq!(orbit.angles().x, PITCH_LIMITS.0);
    }

    #[test]
    fn same_button_freezes_and_reselect_resumes() {
        let mut orbit = Orbit::interactive(Vec3::ZERO);
        orbit.tick();

        // Middle is active from the start.
        orbit.on_pointer_button(MouseButton::Middle);
        assert_eq!(orbit.axis(), None);
        let frozen = orbit.angles();
        orbit.tick();
        assert_eq!(orbit.angles(), frozen);

        orbit.on_pointer_button(MouseButton::Middle);
        assert_eq!(orbit.axis(), Some(Axis::Y));
    }

    #[test]
    fn transform_moves_world_away_from_viewer() {
        let orbit = Orbit::turntable(Vec3::new(0.0, 0.5, 2.0));
        let p = orbit.transform().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, -0.5, -2.0)).length() < EPS);
    }
}
