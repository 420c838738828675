use glam::{Mat4, Quat, Vec3};

/// A render camera: position, orientation, and projection settings.
///
/// Produced by [`DroneCamera::camera`](crate::DroneCamera::camera) each frame
/// for renderers that want a view/projection pair rather than a transform.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub fov: f32, // radians
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Y,
            up: Vec3::Z,
            fov: std::f32::consts::FRAC_PI_3,
            near: 0.1,
            far: 5000.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a camera from a world pose. The rotation maps local `-Z` to
    /// forward and local `+Y` to up.
    pub fn from_pose(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            forward: (rotation * Vec3::NEG_Z).normalize_or(Vec3::Y),
            up: (rotation * Vec3::Y).normalize_or(Vec3::Z),
            ..Default::default()
        }
    }

    pub fn with_fov(mut self, fov_degrees: f32) -> Self {
        self.fov = fov_degrees.to_radians();
        self
    }

    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Compute the right vector from forward and up.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).normalize_or(Vec3::X)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::look_rotation;

    #[test]
    fn pose_round_trips_through_look_rotation() {
        let forward = Vec3::new(0.3, 1.0, -0.2).normalize();
        let camera = Camera::from_pose(Vec3::ONE, look_rotation(forward, Vec3::Z));
        assert!(camera.forward.abs_diff_eq(forward, 1e-5));
        assert!(camera.up.z > 0.0);
        assert!(camera.right().dot(forward).abs() < 1e-5);

        let eye = camera.view_matrix().transform_point3(Vec3::ONE);
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-5));
    }
}
