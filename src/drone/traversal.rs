//! Arc-length cursor and speed shaping.

use glam::Vec3;

use super::config::DroneCameraConfig;
use crate::path::DronePath;

/// Where the drone is along its path and whether it is moving.
#[derive(Clone, Debug, Default)]
pub(crate) struct Traversal {
    /// Arc length travelled, kept in `[0, path length)`.
    pub path_s: f32,
    pub flying: bool,
    /// Seconds spent flying since the last start.
    pub ramp_elapsed: f32,
    /// Monotonic clock for the procedural motion. Never reset.
    pub anim_time: f32,
    /// Speed used for the most recent step, after slowdown and ramp.
    pub effective_speed: f32,
}

impl Traversal {
    pub fn start(&mut self) {
        self.flying = true;
        self.ramp_elapsed = 0.0;
    }

    pub fn stop(&mut self) {
        self.flying = false;
        self.effective_speed = 0.0;
    }

    /// Advances the clocks and, while flying, the cursor. `dt` must already
    /// be clamped.
    pub fn advance(
        &mut self,
        path: &DronePath,
        config: &DroneCameraConfig,
        current_position: Vec3,
        dt: f32,
    ) {
        self.anim_time += dt;

        let mut speed = config.speed
            * poi_speed_factor(
                current_position,
                &config.points_of_interest,
                config.poi_slowdown_radius,
                config.poi_min_speed_factor,
            );

        if !self.flying {
            self.effective_speed = 0.0;
            return;
        }

        self.ramp_elapsed += dt;
        speed *= ramp_factor(self.ramp_elapsed, config.ramp_time);

        self.effective_speed = speed;
        self.path_s = path.wrap_distance(self.path_s + speed * dt);
    }
}

/// Speed multiplier near points of interest.
///
/// Falls linearly from `1.0` at `radius` to `min_factor` at the nearest
/// point itself.
pub(crate) fn poi_speed_factor(
    position: Vec3,
    pois: &[Vec3],
    radius: f32,
    min_factor: f32,
) -> f32 {
    let Some(nearest) = pois
        .iter()
        .map(|poi| poi.distance(position))
        .min_by(f32::total_cmp)
    else {
        return 1.0;
    };

    if radius <= 0.0 || nearest >= radius {
        return 1.0;
    }
    min_factor + (1.0 - min_factor) * (nearest / radius)
}

/// Linear ease-in over `ramp_time` seconds.
pub(crate) fn ramp_factor(elapsed: f32, ramp_time: f32) -> f32 {
    if ramp_time <= 0.0 || elapsed >= ramp_time {
        return 1.0;
    }
    (elapsed / ramp_time).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poi_factor_interpolates_inside_radius() {
        let pois = [Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)];
        assert_eq!(poi_speed_factor(Vec3::ZERO, &pois, 10.0, 0.3), 0.3);
        let halfway = poi_speed_factor(Vec3::new(5.0, 0.0, 0.0), &pois, 10.0, 0.3);
        assert!((halfway - 0.65).abs() < 1e-6);
        assert_eq!(poi_speed_factor(Vec3::new(50.0, 0.0, 0.0), &pois, 10.0, 0.3), 1.0);
        assert_eq!(poi_speed_factor(Vec3::ZERO, &[], 10.0, 0.3), 1.0);
    }

    #[test]
    fn ramp_is_linear_then_flat() {
        assert_eq!(ramp_factor(0.0, 2.0), 0.0);
        assert!((ramp_factor(0.5, 2.0) - 0.25).abs() < 1e-6);
        assert_eq!(ramp_factor(2.5, 2.0), 1.0);
        assert_eq!(ramp_factor(0.0, 0.0), 1.0);
    }

    #[test]
    fn stopped_cursor_does_not_move() {
        let path = DronePath::new(vec![
            Vec3::ZERO,
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::new(25.0, 40.0, 0.0),
        ])
        .unwrap();
        let config = DroneCameraConfig {
            ramp_time: 0.0,
            ..Default::default()
        };
        let mut traversal = Traversal::default();

        traversal.advance(&path, &config, Vec3::ZERO, 0.05);
        assert_eq!(traversal.path_s, 0.0);
        assert!(traversal.anim_time > 0.0);

        traversal.start();
        traversal.advance(&path, &config, Vec3::ZERO, 0.05);
        assert!((traversal.path_s - config.speed * 0.05).abs() < 1e-5);
        assert_eq!(traversal.effective_speed, config.speed);
    }
}
