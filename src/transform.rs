//! Camera transforms the controller reads from and writes into.
//!
//! The controller never owns the camera it moves. Callers hand it a
//! [`CameraTransform`] each frame: a plain [`Transform`], a component inside
//! a `hecs::World`, or any scene-node wrapper that implements the trait.

use glam::{Mat4, Quat, Vec3};

/// Position, rotation, and scale of a node in world space.
///
/// # Example
///
/// ```
/// use dronecam::{Transform, Vec3, Quat};
///
/// let transform = Transform::new()
///     .position(Vec3::new(0.0, -20.0, 8.0))
///     .rotation(Quat::from_rotation_z(0.5));
/// assert_eq!(transform.scale, Vec3::ONE);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// World-space position (translation).
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Scale factors for each axis.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates an identity transform (origin, no rotation, unit scale).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transform positioned at the given location.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Sets the position component.
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the rotation component.
    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Converts this transform to a 4×4 matrix in SRT order.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// A camera node the drone controller can drive.
///
/// Getters return `None` when the underlying node has no value for that
/// component (for example a scene node that has not been attached yet);
/// the controller then falls back to the origin or identity rotation.
pub trait CameraTransform {
    fn position(&self) -> Option<Vec3>;
    fn rotation(&self) -> Option<Quat>;
    fn set_position(&mut self, position: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
}

impl CameraTransform for Transform {
    fn position(&self) -> Option<Vec3> {
        Some(self.position)
    }

    fn rotation(&self) -> Option<Quat> {
        Some(self.rotation)
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
}

/// Builds the rotation that points a camera's local `-Z` along `forward`
/// with its local `+Y` as close to `up` as possible.
///
/// Falls back to an alternate up axis when `forward` is parallel to `up`,
/// and to identity when `forward` is zero.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(forward) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    let right = forward
        .cross(up)
        .try_normalize()
        .or_else(|| forward.cross(Vec3::Y).try_normalize())
        .unwrap_or(Vec3::X);
    let up = right.cross(forward);

    Quat::from_mat3(&glam::Mat3::from_cols(right, up, -forward)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_rotation_points_forward() {
        let forward = Vec3::new(1.0, 1.0, 0.2).normalize();
        let rotation = look_rotation(forward, Vec3::Z);
        assert!((rotation * Vec3::NEG_Z).abs_diff_eq(forward, 1e-5));
        // Camera up stays on the world-up side.
        assert!((rotation * Vec3::Y).z > 0.9);
    }

    #[test]
    fn look_rotation_handles_degenerate_input() {
        let straight_up = look_rotation(Vec3::Z, Vec3::Z);
        assert!((straight_up * Vec3::NEG_Z).abs_diff_eq(Vec3::Z, 1e-5));
        assert!(straight_up.is_finite());

        assert_eq!(look_rotation(Vec3::ZERO, Vec3::Z), Quat::IDENTITY);
    }

    #[test]
    fn transform_handle_round_trip() {
        let mut transform = Transform::from_position(Vec3::splat(2.0));
        CameraTransform::set_rotation(&mut transform, Quat::from_rotation_z(1.0));
        assert_eq!(CameraTransform::position(&transform), Some(Vec3::splat(2.0)));
        assert_eq!(
            CameraTransform::rotation(&transform),
            Some(Quat::from_rotation_z(1.0))
        );
        assert!(transform
            .matrix()
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::splat(2.0), 1e-6));
    }
}
