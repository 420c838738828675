//! Tunables for [`DroneCamera`](crate::DroneCamera).

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub const MIN_SPEED: f32 = 0.1;
pub const MIN_DAMPING: f32 = 0.1;
pub const MIN_POI_RADIUS: f32 = 0.1;

/// Every tunable of the drone camera in one serializable snapshot.
///
/// Persist it however the host application stores settings; missing fields
/// take their defaults when deserializing. Values are not validated here:
/// [`DroneCamera::apply_config`](crate::DroneCamera::apply_config) routes
/// each one through the clamping setter.
///
/// Angles are in radians. The world is Z-up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneCameraConfig {
    /// Cruise speed along the path, in units per second.
    pub speed: f32,
    /// Rate at which the smoothed pose chases the desired pose.
    pub damping: f32,
    /// Seconds to ease in from rest after [`start`](crate::DroneCamera::start).
    pub ramp_time: f32,
    /// Point the camera keeps turning toward.
    pub focus_target: Vec3,
    /// Locations that slow the drone when it passes near them.
    pub points_of_interest: Vec<Vec3>,
    /// Distance at which slowdown begins.
    pub poi_slowdown_radius: f32,
    /// Fraction of cruise speed kept right at a point of interest.
    pub poi_min_speed_factor: f32,
    /// Vertical bob amplitude in units.
    pub bob_amplitude: f32,
    /// Vertical bob frequency in Hz.
    pub bob_frequency: f32,
    /// Amplitude of the smoothed lateral and vertical drift.
    pub noise_amplitude: f32,
    /// Radians of roll per unit of lateral speed.
    pub bank_factor: f32,
    /// Maximum roll in radians.
    pub max_bank: f32,
    /// Whether overlays should draw the flight line.
    pub show_path_preview: bool,
}

impl Default for DroneCameraConfig {
    fn default() -> Self {
        Self {
            speed: 6.0,
            damping: 3.0,
            ramp_time: 2.0,
            focus_target: Vec3::ZERO,
            points_of_interest: Vec::new(),
            poi_slowdown_radius: 15.0,
            poi_min_speed_factor: 0.35,
            bob_amplitude: 0.15,
            bob_frequency: 0.25,
            noise_amplitude: 0.2,
            bank_factor: 0.02,
            max_bank: 0.35,
            show_path_preview: false,
        }
    }
}
