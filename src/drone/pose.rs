//! Turning a path position into a camera pose.
//!
//! Each frame builds a fresh *desired* pose (curve point, procedural bob and
//! drift, focus-biased heading, pitch limit, bank) and then eases the
//! *current* pose toward it. Only the current pose is ever written to the
//! camera.

use std::f32::consts::{FRAC_PI_4, PI, TAU};

use glam::{Quat, Vec2, Vec3};

use super::config::DroneCameraConfig;
use crate::path::DronePath;
use crate::transform::look_rotation;

pub(crate) const WORLD_UP: Vec3 = Vec3::Z;

/// Tangent lookahead as a fraction of the loop length.
const TANGENT_LOOKAHEAD: f32 = 1e-3;

/// How quickly the lateral drift chases its target signal, per second.
const NOISE_RESPONSE: f32 = 1.5;

/// Share of the angle between path heading and focus direction the camera
/// turns through.
const FOCUS_BLEND: f32 = 0.8;

const MAX_PITCH: f32 = FRAC_PI_4;

/// Smoothed pose plus the filter state behind it.
#[derive(Clone, Debug)]
pub(crate) struct PoseState {
    pub position: Vec3,
    pub rotation: Quat,
    /// False until the first pose has been produced or synced; the next
    /// smoothing step snaps instead of blending.
    pub initialized: bool,
    noise: Vec2,
    previous_target: Option<Vec3>,
}

impl Default for PoseState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            initialized: false,
            noise: Vec2::ZERO,
            previous_target: None,
        }
    }
}

impl PoseState {
    /// Forces the next smoothing step to snap.
    pub fn reset(&mut self) {
        self.initialized = false;
        self.previous_target = None;
    }

    /// Seeds the smoothed pose from an existing camera.
    pub fn sync(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation.normalize();
        self.initialized = true;
        self.previous_target = None;
    }

    /// Computes the pose the camera should be heading toward at `path_s`.
    pub fn desired(
        &mut self,
        path: &DronePath,
        config: &DroneCameraConfig,
        path_s: f32,
        anim_time: f32,
        dt: f32,
    ) -> (Vec3, Quat) {
        let u = path.parameter_at(path_s);
        let mut position = path.point_at_parameter(u);

        let ahead = path.point_at(path_s + path.length() * TANGENT_LOOKAHEAD);
        let tangent = (ahead - position).try_normalize().unwrap_or(WORLD_UP);

        position.z += config.bob_amplitude * (anim_time * config.bob_frequency * TAU).sin();

        let drift_target = Vec2::new((anim_time * 2.3).sin(), (anim_time * 1.7).cos())
            * config.noise_amplitude;
        self.noise = self
            .noise
            .lerp(drift_target, 1.0 - (-dt * NOISE_RESPONSE).exp());

        let side = tangent.cross(WORLD_UP).try_normalize().unwrap_or(Vec3::X);
        position += side * self.noise.x;
        position.z += self.noise.y;

        let forward = toward_focus(tangent, position, config.focus_target);
        let forward = clamp_pitch(forward, tangent);
        let mut rotation = look_rotation(forward, WORLD_UP);

        if self.initialized && config.bank_factor > 0.0 && dt > 0.0 {
            if let Some(previous) = self.previous_target {
                let velocity = (position - previous) / dt;
                let right = forward.cross(WORLD_UP).try_normalize().unwrap_or(side);
                let bank = (velocity.dot(right) * config.bank_factor)
                    .clamp(-config.max_bank, config.max_bank);
                rotation = (Quat::from_axis_angle(forward, bank) * rotation).normalize();
            }
        }
        self.previous_target = Some(position);

        (position, rotation)
    }

    /// Eases the smoothed pose toward the target, or snaps on the first call.
    pub fn smooth_toward(&mut self, position: Vec3, rotation: Quat, damping: f32, dt: f32) {
        if !self.initialized {
            self.position = position;
            self.rotation = rotation;
            self.initialized = true;
            return;
        }

        let alpha = 1.0 - (-dt * damping).exp();
        self.position = self.position.lerp(position, alpha);
        self.rotation = self.rotation.slerp(rotation, alpha).normalize();
    }
}

/// Turns `tangent` most of the way toward `focus` as seen from `position`.
fn toward_focus(tangent: Vec3, position: Vec3, focus: Vec3) -> Vec3 {
    let Some(to_focus) = (focus - position).try_normalize() else {
        return tangent;
    };

    let angle = tangent.angle_between(to_focus);
    if !angle.is_finite() || angle < 1e-6 {
        return tangent;
    }

    let axis = tangent.cross(to_focus).try_normalize().unwrap_or_else(|| {
        // Focus is straight behind: swing around the vertical if possible.
        let reference = if tangent.dot(WORLD_UP).abs() < 0.99 {
            WORLD_UP
        } else {
            Vec3::X
        };
        reference.reject_from_normalized(tangent).normalize()
    });

    let turn = (angle * FOCUS_BLEND).min(PI);
    (Quat::from_axis_angle(axis, turn) * tangent).normalize_or(tangent)
}

/// Limits pitch to ±45° while keeping the horizontal heading.
fn clamp_pitch(forward: Vec3, fallback: Vec3) -> Vec3 {
    let pitch = forward.z.clamp(-1.0, 1.0).asin();
    if pitch.abs() <= MAX_PITCH {
        return forward;
    }

    let heading = forward
        .with_z(0.0)
        .try_normalize()
        .or_else(|| fallback.with_z(0.0).try_normalize())
        .unwrap_or(Vec3::Y);
    let pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
    heading * pitch.cos() + WORLD_UP * pitch.sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_blend_turns_most_of_the_way() {
        let tangent = Vec3::X;
        let forward = toward_focus(tangent, Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0));
        let turned = tangent.angle_between(forward);
        assert!((turned - 0.8 * std::f32::consts::FRAC_PI_2).abs() < 1e-4);
        assert!(forward.z.abs() < 1e-5);
    }

    #[test]
    fn focus_blend_handles_degenerate_geometry() {
        // Focus at the camera itself.
        assert_eq!(toward_focus(Vec3::X, Vec3::ONE, Vec3::ONE), Vec3::X);

        // Focus straight behind: still finite, turned around the vertical.
        let behind = toward_focus(Vec3::X, Vec3::ZERO, Vec3::new(-10.0, 0.0, 0.0));
        assert!(behind.is_finite());
        assert!(behind.z.abs() < 1e-5);
        assert!((Vec3::X.angle_between(behind) - 0.8 * PI).abs() < 1e-3);
    }

    #[test]
    fn pitch_is_limited_to_forty_five_degrees() {
        let steep = Vec3::new(1.0, 0.0, -5.0).normalize();
        let clamped = clamp_pitch(steep, Vec3::X);
        assert!((clamped.z.asin() + MAX_PITCH).abs() < 1e-5);
        assert!(clamped.y.abs() < 1e-6 && clamped.x > 0.0);
        assert!((clamped.length() - 1.0).abs() < 1e-5);

        let vertical = clamp_pitch(Vec3::Z, Vec3::Y);
        assert!(vertical.abs_diff_eq(Vec3::new(0.0, MAX_PITCH.cos(), MAX_PITCH.sin()), 1e-5));

        let gentle = Vec3::new(1.0, 0.0, 0.2).normalize();
        assert_eq!(clamp_pitch(gentle, Vec3::X), gentle);
    }

    #[test]
    fn first_smoothing_step_snaps() {
        let mut pose = PoseState::default();
        let target = Vec3::new(3.0, 4.0, 5.0);
        let rotation = Quat::from_rotation_z(1.0);
        pose.smooth_toward(target, rotation, 0.1, 0.001);
        assert_eq!(pose.position, target);
        assert!(pose.initialized);

        pose.smooth_toward(Vec3::ZERO, rotation, 2.0, 0.05);
        let expected = 1.0 - (-0.1f32).exp();
        assert!((target.distance(pose.position) / target.length() - expected).abs() < 1e-4);
    }
}
