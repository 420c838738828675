//! A cinematic drone camera that flies a closed spline path.
//!
//! [`DroneCamera`] follows a looping Catmull-Rom path at a constant ground
//! speed (arc-length paced), slows near points of interest, eases in after
//! [`start`](DroneCamera::start), and layers gentle bob, drift, and banking
//! on top while keeping its gaze biased toward a focus target.
//!
//! # Example
//!
//! ```
//! use dronecam::{DroneCamera, Transform, Vec3, generators};
//!
//! let mut drone = DroneCamera::new();
//! drone.set_path_generator(generators::orbit_ring(Vec3::ZERO, 40.0, 15.0, 8));
//! drone.set_focus_target(Vec3::new(0.0, 0.0, 5.0));
//! drone.start();
//!
//! let mut camera = Transform::new();
//! // In the frame loop:
//! drone.update(Some(&mut camera), 1.0 / 60.0);
//! assert!(camera.position.length() > 30.0);
//! ```

mod config;
mod pose;
mod traversal;

pub use config::{DroneCameraConfig, MIN_DAMPING, MIN_POI_RADIUS, MIN_SPEED};

use glam::{Quat, Vec3};
use hecs::{Entity, World};
use tracing::{debug, info, trace, warn};

use crate::camera::Camera;
use crate::generators::PathGenerator;
use crate::path::DronePath;
use crate::preview::PathPreview;
use crate::transform::{CameraTransform, Transform};

use pose::PoseState;
use traversal::Traversal;

/// Longest single integration step, in seconds.
pub const MAX_STEP: f32 = 0.05;

/// Path-following camera controller.
///
/// The controller owns its path, configuration, and smoothed pose; the
/// camera node it moves is borrowed for the duration of each
/// [`update`](Self::update). Without a flyable path every update is a no-op.
#[derive(Default)]
pub struct DroneCamera {
    generator: Option<PathGenerator>,
    path: DronePath,
    config: DroneCameraConfig,
    traversal: Traversal,
    pose: PoseState,
}

impl std::fmt::Debug for DroneCamera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DroneCamera")
            .field("has_generator", &self.generator.is_some())
            .field("path", &self.path)
            .field("config", &self.config)
            .field("traversal", &self.traversal)
            .field("pose", &self.pose)
            .finish()
    }
}

impl DroneCamera {
    /// Create a controller with default settings and no path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a controller from a configuration snapshot.
    pub fn with_config(config: DroneCameraConfig) -> Self {
        let mut drone = Self::default();
        drone.apply_config(config);
        drone
    }

    // ---- path -----------------------------------------------------------

    /// Store `generator` and build the path from it immediately.
    ///
    /// The cursor returns to the start of the loop and the next update snaps
    /// the camera onto the path instead of blending.
    pub fn set_path_generator<F>(&mut self, generator: F)
    where
        F: Fn() -> Vec<Vec3> + Send + Sync + 'static,
    {
        self.generator = Some(Box::new(generator));
        self.regenerate_path();
    }

    /// Re-run the stored generator and rebuild all derived path data.
    pub fn regenerate_path(&mut self) {
        let Some(generator) = &self.generator else {
            debug!("no path generator set; nothing to regenerate");
            return;
        };

        self.path = match DronePath::new(generator()) {
            Ok(path) => {
                debug!(
                    points = path.points().len(),
                    length = path.length(),
                    "drone path rebuilt"
                );
                path
            }
            Err(err) => {
                warn!(%err, "rejected generated drone path");
                DronePath::default()
            }
        };
        self.traversal.path_s = 0.0;
        self.pose.reset();
    }

    /// Drop the generator and the path.
    pub fn clear_path(&mut self) {
        self.generator = None;
        self.path = DronePath::default();
        self.traversal.path_s = 0.0;
        self.pose.reset();
    }

    /// Returns true if a path with at least two distinct points is loaded.
    pub fn has_path(&self) -> bool {
        self.path.is_flyable()
    }

    /// The current path, possibly empty.
    pub fn path(&self) -> &DronePath {
        &self.path
    }

    /// Control points of the current path, e.g. for a minimap overlay.
    pub fn path_points(&self) -> &[Vec3] {
        self.path.points()
    }

    /// Loop length in world units; zero without a flyable path.
    pub fn path_length(&self) -> f32 {
        self.path.length()
    }

    /// Distance travelled along the loop, in `[0, path_length)`.
    pub fn path_distance(&self) -> f32 {
        self.traversal.path_s
    }

    /// Fraction of the loop completed, in `[0, 1)`. Zero without a path.
    pub fn progress(&self) -> f32 {
        if !self.has_path() {
            return 0.0;
        }
        self.traversal.path_s / self.path.length()
    }

    // ---- flight ---------------------------------------------------------

    /// Start flying. The ramp-in restarts from rest; the cursor continues
    /// from wherever it stopped.
    ///
    /// # Example
    ///
    /// ```
    /// use dronecam::{DroneCamera, Vec3, generators};
    ///
    /// let mut drone = DroneCamera::new();
    /// drone.set_path_generator(generators::orbit_ring(Vec3::ZERO, 10.0, 5.0, 6));
    /// drone.start();
    /// assert!(drone.is_flying());
    /// drone.stop();
    /// assert!(!drone.is_flying());
    /// ```
    pub fn start(&mut self) {
        if !self.has_path() {
            debug!("drone started without a flyable path");
        }
        self.traversal.start();
        info!(progress = self.progress(), "drone flight started");
    }

    /// Stop moving along the path. The cursor stays where it is.
    pub fn stop(&mut self) {
        if self.traversal.flying {
            info!(progress = self.progress(), "drone flight stopped");
        }
        self.traversal.stop();
    }

    /// Start if stopped, stop if flying.
    pub fn toggle(&mut self) {
        if self.traversal.flying {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Returns true between [`start`](Self::start) and [`stop`](Self::stop).
    pub fn is_flying(&self) -> bool {
        self.traversal.flying
    }

    /// Speed applied during the last update after slowdown and ramp-in.
    pub fn effective_speed(&self) -> f32 {
        self.traversal.effective_speed
    }

    /// Advance the flight by `dt` seconds and write the smoothed pose to
    /// `transform`.
    ///
    /// `dt` is clamped to [`MAX_STEP`]. Passing `None` still advances the
    /// flight; nothing is written. Without a flyable path the call does
    /// nothing at all.
    pub fn update(&mut self, transform: Option<&mut dyn CameraTransform>, dt: f32) {
        if !self.has_path() {
            return;
        }
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_STEP)
        } else {
            0.0
        };

        self.traversal
            .advance(&self.path, &self.config, self.pose.position, dt);

        let (position, rotation) = self.pose.desired(
            &self.path,
            &self.config,
            self.traversal.path_s,
            self.traversal.anim_time,
            dt,
        );
        self.pose
            .smooth_toward(position, rotation, self.config.damping, dt);

        trace!(
            s = self.traversal.path_s,
            speed = self.traversal.effective_speed,
            "drone step"
        );

        if let Some(transform) = transform {
            transform.set_position(self.pose.position);
            transform.set_rotation(self.pose.rotation);
        }
    }

    /// [`update`](Self::update) for a camera stored as a [`Transform`]
    /// component in an ECS world.
    pub fn update_entity(&mut self, world: &World, entity: Entity, dt: f32) {
        match world.get::<&mut Transform>(entity) {
            Ok(mut transform) => {
                self.update(Some(&mut *transform as &mut dyn CameraTransform), dt)
            }
            Err(err) => {
                debug!(?entity, %err, "camera entity has no transform");
                self.update(None, dt);
            }
        }
    }

    /// Adopt the pose of an existing camera so the next update blends from
    /// it instead of snapping.
    ///
    /// Missing or unusable values (non-finite position, zero or non-finite
    /// rotation) fall back to the origin and identity rotation.
    pub fn sync_from_transform(&mut self, transform: &dyn CameraTransform) {
        let position = transform
            .position()
            .filter(|p| p.is_finite())
            .unwrap_or(Vec3::ZERO);
        let rotation = transform
            .rotation()
            .filter(|q| q.is_finite() && q.length_squared() > 1e-6)
            .map(Quat::normalize)
            .unwrap_or(Quat::IDENTITY);
        self.pose.sync(position, rotation);
    }

    /// [`sync_from_transform`](Self::sync_from_transform) for an ECS camera.
    /// Returns false if the entity has no [`Transform`].
    pub fn sync_from_entity(&mut self, world: &World, entity: Entity) -> bool {
        match world.get::<&Transform>(entity) {
            Ok(transform) => {
                self.sync_from_transform(&*transform);
                true
            }
            Err(err) => {
                debug!(?entity, %err, "cannot sync from camera entity");
                false
            }
        }
    }

    /// Smoothed camera position.
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Smoothed camera rotation.
    pub fn rotation(&self) -> Quat {
        self.pose.rotation
    }

    /// Returns false until the first pose has been produced or synced.
    pub fn is_initialized(&self) -> bool {
        self.pose.initialized
    }

    /// Current pose as a render camera.
    pub fn camera(&self) -> Camera {
        Camera::from_pose(self.pose.position, self.pose.rotation)
    }

    /// Closed polyline of the flight path for overlays, or `None` if the
    /// preview is switched off or there is no path.
    pub fn path_preview(&self, samples: usize) -> Option<PathPreview> {
        if !self.config.show_path_preview || !self.has_path() {
            return None;
        }
        Some(PathPreview::from_path(&self.path, samples))
    }

    // ---- configuration --------------------------------------------------

    /// Current values of every tunable.
    pub fn config(&self) -> &DroneCameraConfig {
        &self.config
    }

    /// Apply every field of `config` through its clamping setter.
    pub fn apply_config(&mut self, config: DroneCameraConfig) {
        self.set_speed(config.speed);
        self.set_damping(config.damping);
        self.set_ramp_time(config.ramp_time);
        self.set_focus_target(config.focus_target);
        self.set_points_of_interest(config.points_of_interest);
        self.set_poi_slowdown_radius(config.poi_slowdown_radius);
        self.set_poi_min_speed_factor(config.poi_min_speed_factor);
        self.set_bob_amplitude(config.bob_amplitude);
        self.set_bob_frequency(config.bob_frequency);
        self.set_noise_amplitude(config.noise_amplitude);
        self.set_bank_factor(config.bank_factor);
        self.set_max_bank(config.max_bank);
        self.set_show_path_preview(config.show_path_preview);
    }

    /// Cruise speed in units per second.
    pub fn speed(&self) -> f32 {
        self.config.speed
    }

    /// Cruise speed in units per second, floored at [`MIN_SPEED`].
    pub fn set_speed(&mut self, speed: f32) {
        self.config.speed = speed.max(MIN_SPEED);
    }

    /// Smoothing rate; higher values follow the path more tightly.
    pub fn damping(&self) -> f32 {
        self.config.damping
    }

    /// Smoothing rate, floored at [`MIN_DAMPING`].
    pub fn set_damping(&mut self, damping: f32) {
        self.config.damping = damping.max(MIN_DAMPING);
    }

    /// Ease-in duration in seconds.
    pub fn ramp_time(&self) -> f32 {
        self.config.ramp_time
    }

    /// Ease-in duration after [`start`](Self::start); zero disables it.
    pub fn set_ramp_time(&mut self, seconds: f32) {
        self.config.ramp_time = seconds.max(0.0);
    }

    /// Point the camera's gaze is biased toward.
    pub fn focus_target(&self) -> Vec3 {
        self.config.focus_target
    }

    /// Move the focus target. Non-finite targets are ignored.
    pub fn set_focus_target(&mut self, target: Vec3) {
        if target.is_finite() {
            self.config.focus_target = target;
        }
    }

    /// Move the focus target vertically, keeping its ground position.
    pub fn set_focus_height(&mut self, height: f32) {
        if height.is_finite() {
            self.config.focus_target.z = height;
        }
    }

    /// Locations that slow the drone down.
    pub fn points_of_interest(&self) -> &[Vec3] {
        &self.config.points_of_interest
    }

    /// Replace the points of interest. Non-finite points are dropped.
    pub fn set_points_of_interest(&mut self, mut points: Vec<Vec3>) {
        points.retain(|p| p.is_finite());
        self.config.points_of_interest = points;
    }

    /// Distance from a point of interest at which slowdown begins.
    pub fn poi_slowdown_radius(&self) -> f32 {
        self.config.poi_slowdown_radius
    }

    /// Slowdown radius, floored at [`MIN_POI_RADIUS`].
    pub fn set_poi_slowdown_radius(&mut self, radius: f32) {
        self.config.poi_slowdown_radius = radius.max(MIN_POI_RADIUS);
    }

    /// Fraction of cruise speed kept right at a point of interest.
    pub fn poi_min_speed_factor(&self) -> f32 {
        self.config.poi_min_speed_factor
    }

    /// Minimum speed fraction, clamped to `[0, 1]`.
    pub fn set_poi_min_speed_factor(&mut self, factor: f32) {
        self.config.poi_min_speed_factor = if factor.is_nan() {
            0.0
        } else {
            factor.clamp(0.0, 1.0)
        };
    }

    /// Vertical bob amplitude in units.
    pub fn bob_amplitude(&self) -> f32 {
        self.config.bob_amplitude
    }

    /// Bob amplitude, floored at zero.
    pub fn set_bob_amplitude(&mut self, amplitude: f32) {
        self.config.bob_amplitude = amplitude.max(0.0);
    }

    /// Vertical bob frequency in Hz.
    pub fn bob_frequency(&self) -> f32 {
        self.config.bob_frequency
    }

    /// Bob frequency in Hz, floored at zero.
    pub fn set_bob_frequency(&mut self, frequency: f32) {
        self.config.bob_frequency = frequency.max(0.0);
    }

    /// Amplitude of the slow lateral and vertical drift.
    pub fn noise_amplitude(&self) -> f32 {
        self.config.noise_amplitude
    }

    /// Drift amplitude; zero keeps the camera on the curve.
    pub fn set_noise_amplitude(&mut self, amplitude: f32) {
        self.config.noise_amplitude = amplitude.max(0.0);
    }

    /// Radians of roll per unit of lateral speed.
    pub fn bank_factor(&self) -> f32 {
        self.config.bank_factor
    }

    /// Roll per unit of lateral speed; zero disables banking.
    pub fn set_bank_factor(&mut self, factor: f32) {
        self.config.bank_factor = factor.max(0.0);
    }

    /// Largest roll angle in radians.
    pub fn max_bank(&self) -> f32 {
        self.config.max_bank
    }

    /// Roll limit in radians, floored at zero.
    pub fn set_max_bank(&mut self, radians: f32) {
        self.config.max_bank = radians.max(0.0);
    }

    /// Whether [`path_preview`](Self::path_preview) returns anything.
    pub fn show_path_preview(&self) -> bool {
        self.config.show_path_preview
    }

    /// Switch the flight-line preview on or off.
    pub fn set_show_path_preview(&mut self, show: bool) {
        self.config.show_path_preview = show;
    }
}
