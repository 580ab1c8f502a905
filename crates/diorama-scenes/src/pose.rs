//! Waveform-driven articulated figure.
//!
//! Every joint angle is a pure function of scene time; nothing is carried
//! between frames. The figure is a torso with two arms (shoulder + elbow, with a
//! hand ornament) and two legs (hip + knee, no ornament), a head, and a floor.

use diorama_engine::mesh::MeshId;
use diorama_engine::paint::{Color, Material};
use diorama_engine::scene::{DrawCmd, DrawList, Layer};
use diorama_engine::transform::{rotate, scale, translate, uniform_scale};
use glam::{Mat4, Vec3};

use crate::wave::wave;

/// Scene time multiplier feeding every joint waveform.
pub const WALK_FREQUENCY: f32 = 6.0;

/// Scale from model units (limb links are 2 long) to scene units.
const BODY_SCALE: f32 = 0.1 * 0.8;

/// Joint angles in degrees for one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct JointAngles {
    pub left_shoulder: f32,
    pub left_elbow: f32,
    pub right_shoulder: f32,
    pub right_elbow: f32,
    pub left_knee: f32,
    pub right_knee: f32,
}

impl JointAngles {
    /// Angles at `scene_time` seconds with the default walking frequency.
    pub fn at(scene_time: f32) -> Self {
        Self::at_frequency(scene_time, WALK_FREQUENCY)
    }

    pub fn at_frequency(scene_time: f32, frequency: f32) -> Self {
        let t = scene_time * frequency;
        Self {
            left_shoulder: wave(-45.0, 45.0, t),
            left_elbow: wave(30.0, 90.0, t),
            right_shoulder: -wave(-45.0, 45.0, t),
            right_elbow: 90.0 - wave(0.0, 40.0, t),
            left_knee: -wave(0.0, 80.0, t),
            // Negated phase: legs swing in anti-phase.
            right_knee: -wave(0.0, 80.0, -t),
        }
    }
}

/// Vertical torso offset for scaled time `t`; always positive.
#[inline]
pub fn torso_bob(t: f32) -> f32 {
    0.63 + 0.04 * ((2.0 * t).sin() + 0.8)
}

/// Rotation about the hinge axis (local Z), degrees.
#[inline]
fn hinge(deg: f32) -> Mat4 {
    rotate(0.0, 0.0, deg)
}

/// Grey block with black edges.
fn block(list: &mut DrawList, transform: Mat4, color: Color) {
    list.solid(MeshId::Cube, transform, color);
}

/// Black ball with grey edges.
fn joint(list: &mut DrawList, transform: Mat4) {
    list.push(
        Layer::OPAQUE,
        DrawCmd::fill(MeshId::Icosphere, transform, Color::JOINT_BLACK),
    );
    list.outline(MeshId::Icosphere, transform, Color::STEEL);
}

fn effector(list: &mut DrawList, transform: Mat4) {
    list.solid(MeshId::Pyramid, transform, Color::EFFECTOR_RED);
}

/// Draws one two-link limb hanging from `parent`.
///
/// The upper link rotates by `shoulder_deg` about the hinge at `parent`'s origin;
/// the lower link rotates by `elbow_deg` about the end of the upper link. Links
/// are 2 units long. With `do_end` an inverted pyramid closes the limb.
pub fn draw_limb(
    list: &mut DrawList,
    parent: Mat4,
    elbow_deg: f32,
    shoulder_deg: f32,
    do_end: bool,
) {
    let shoulder = parent * hinge(shoulder_deg);
    let elbow = shoulder * translate(0.0, -2.0, 0.0) * hinge(elbow_deg);
    let link = scale(1.0, 2.0, 1.0);

    block(list, shoulder * translate(0.0, -1.0, 0.0) * link, Color::STEEL);
    block(list, elbow * translate(0.0, -1.0, 0.0) * link, Color::STEEL);
    joint(list, elbow * uniform_scale(0.75));

    effector(list, elbow * translate(0.0, -2.0, 0.0));
    if do_end {
        effector(list, elbow * translate(0.0, -2.4, 0.0) * rotate(180.0, 0.0, 0.0));
    }
}

/// Records the floor and the figure at `scene_time`.
///
/// `camera` is the scene-to-eye transform; the torso bob is applied in eye space
/// so the figure bounces regardless of the orbit.
pub fn draw_robot(list: &mut DrawList, camera: Mat4, scene_time: f32, frequency: f32) -> JointAngles {
    let a = JointAngles::at_frequency(scene_time, frequency);
    let t = scene_time * frequency;

    list.surface(
        MeshId::Square,
        camera * rotate(90.0, 0.0, 0.0) * uniform_scale(4.0),
        Color::STEEL,
        Material::Floor,
    );

    let body = translate(0.0, torso_bob(t), 0.0)
        * camera
        * rotate(0.0, 90.0, 0.0)
        * uniform_scale(BODY_SCALE);
    list.push_transform(body);

    let facing = rotate(0.0, -90.0, 0.0);
    let at = |x: f32, y: f32| translate(x, y, 0.0);
    let swing = |deg: f32| rotate(-deg, 0.0, 0.0);

    // Arms
    draw_limb(list, at(-2.0, 0.0) * facing, a.left_elbow, a.left_shoulder, true);
    joint(list, at(-1.0, 0.0) * swing(a.left_shoulder) * scale(1.5, 0.5, 0.5));
    joint(list, at(-2.0, 0.0) * swing(a.left_shoulder) * uniform_scale(0.6));

    draw_limb(list, at(2.0, 0.0) * facing, a.right_elbow, a.right_shoulder, true);
    joint(list, at(1.0, 0.0) * swing(a.right_shoulder) * scale(1.5, 0.5, 0.5));
    joint(list, at(2.0, 0.0) * swing(a.right_shoulder) * uniform_scale(0.6));

    block(list, at(0.0, -1.5) * scale(2.1, 4.0, 1.5), Color::DARK_STEEL);

    // Legs swing opposite to the arm on the same side.
    draw_limb(list, at(-0.8, -3.5) * facing, a.left_knee, a.right_shoulder, false);
    joint(list, at(-0.8, -3.5) * swing(a.right_shoulder) * uniform_scale(0.7));

    draw_limb(list, at(0.8, -3.5) * facing, a.right_knee, a.left_shoulder, false);
    joint(list, at(0.8, -3.5) * swing(a.left_shoulder) * uniform_scale(0.7));

    // Head
    joint(list, at(0.0, 0.75) * uniform_scale(0.4));
    block(list, at(0.0, 1.25) * uniform_scale(1.2), Color::STEEL);

    list.pop_transform();
    a
}

/// Eye-space position of the figure's origin, for framing checks.
pub fn body_origin(camera: Mat4, scene_time: f32, frequency: f32) -> Vec3 {
    let t = scene_time * frequency;
    (translate(0.0, torso_bob(t), 0.0) * camera).transform_point3(Vec3::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diorama_engine::scene::DrawMode;

    const EPS: f32 = 1e-3;

    #[test]
    fn knees_move_in_anti_phase() {
        for i in -50..50 {
            let t = i as f32 * 0.173;
            let right = JointAngles::at(t).right_knee;
            let left_mirrored = JointAngles::at(-t).left_knee;
            assert!((right - left_mirrored).abs() < EPS, "t = {t}");
        }
    }

    #[test]
    fn shoulders_mirror_each_other() {
        for i in 0..40 {
            let a = JointAngles::at(i as f32 * 0.05);
            assert!((a.left_shoulder + a.right_shoulder).abs() < EPS);
        }
    }

    #[test]
    fn angles_stay_in_joint_ranges() {
        for i in 0..300 {
            let a = JointAngles::at(i as f32 * 0.011);
            assert!((-45.0 - EPS..=45.0 + EPS).contains(&a.left_shoulder));
            assert!((30.0 - EPS..=90.0 + EPS).contains(&a.left_elbow));
            assert!((50.0 - EPS..=90.0 + EPS).contains(&a.right_elbow));
            assert!((-80.0 - EPS..=EPS).contains(&a.left_knee));
            assert!((-80.0 - EPS..=EPS).contains(&a.right_knee));
        }
    }

    #[test]
    fn rest_pose_at_time_zero() {
        let a = JointAngles::at(0.0);
        assert!(a.left_shoulder.abs() < EPS);
        assert!((a.left_elbow - 60.0).abs() < EPS);
        assert!((a.right_elbow - 70.0).abs() < EPS);
        assert!((a.left_knee + 40.0).abs() < EPS);
        assert!((a.right_knee + 40.0).abs() < EPS);
    }

    #[test]
    fn torso_bob_never_goes_negative() {
        for i in 0..100 {
            let y = torso_bob(i as f32 * 0.1);
            assert!(y >= 0.63 + 0.04 * -0.2 - EPS);
        }
    }

    #[test]
    fn limb_places_elbow_at_link_end() {
        let mut list = DrawList::new();
        draw_limb(&mut list, Mat4::IDENTITY, 0.0, 90.0, true);

        // fill + outline for: upper, lower, elbow, pyramid, end pyramid
        assert_eq!(list.len(), 10);

        let elbow = &list.items()[4].cmd;
        assert_eq!(elbow.mesh, MeshId::Icosphere);
        assert_eq!(elbow.mode, DrawMode::Fill);
        let center = elbow.transform.transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(2.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn leg_has_no_end_ornament() {
        let mut list = DrawList::new();
        draw_limb(&mut list, Mat4::IDENTITY, -40.0, 10.0, false);
        assert_eq!(list.len(), 8);
        let pyramids = list
            .items()
            .iter()
            .filter(|item| item.cmd.mesh == MeshId::Pyramid)
            .count();
        assert_eq!(pyramids, 2);
    }

    #[test]
    fn robot_draws_floor_first_and_balances_stack() {
        let mut list = DrawList::new();
        draw_robot(&mut list, Mat4::IDENTITY, 1.25, WALK_FREQUENCY);

        // floor + 2 arms (10 + 4) + torso 2 + 2 legs (8 + 2) + head 4
        assert_eq!(list.len(), 55);

        let floor = &list.items()[0].cmd;
        assert_eq!(floor.mesh, MeshId::Square);
        assert_eq!(floor.material, Material::Floor);
        assert_eq!(list.current_transform(), Mat4::IDENTITY);
    }

    #[test]
    fn body_commands_carry_the_bob() {
        let mut list = DrawList::new();
        let t = 0.4;
        draw_robot(&mut list, Mat4::IDENTITY, t, WALK_FREQUENCY);

        // Torso block follows the arms; its centre sits 1.5 model units below the origin.
        let torso = list
            .items()
            .iter()
            .find(|item| item.cmd.color == Color::DARK_STEEL)
            .map(|item| item.cmd.transform.transform_point3(Vec3::ZERO));
        let expected = body_origin(Mat4::IDENTITY, t, WALK_FREQUENCY) - Vec3::new(0.0, 1.5 * BODY_SCALE, 0.0);
        assert!(torso.is_some_and(|p| (p - expected).length() < EPS));
    }
}
