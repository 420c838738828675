//! # dronecam
//!
//! **A cinematic drone camera for Rust engines.**
//!
//! Give it a loop of waypoints and a camera to move; it flies the loop at an
//! even pace with gentle bob, drift, and banking, eases in when started,
//! slows down near points of interest, and keeps its gaze drifting toward a
//! focus target.
//!
//! ## Quick Start
//!
//! ```
//! use dronecam::*;
//!
//! let mut drone = DroneCamera::new();
//! drone.set_path_generator(generators::scenic_flyover(Vec3::ZERO, 120.0, 30.0, 16));
//! drone.set_focus_target(Vec3::new(0.0, 0.0, 10.0));
//! drone.set_points_of_interest(vec![Vec3::new(120.0, 0.0, 0.0)]);
//! drone.start();
//!
//! let mut camera = Transform::new();
//! for _ in 0..120 {
//!     drone.update(Some(&mut camera), 1.0 / 60.0);
//! }
//! assert!(drone.progress() > 0.0);
//! ```
//!
//! ## Conventions
//!
//! - **Z is up.** Bob, altitude, pitch limits, and focus height all act on Z.
//! - **Cameras look down local `-Z`** with local `+Y` as up, matching
//!   [`Mat4::look_to_rh`].
//! - **The camera is borrowed, not owned.** Anything implementing
//!   [`CameraTransform`] can be driven, including a [`Transform`] component
//!   in a [`hecs::World`].
//!
//! Logging goes through [`tracing`]; install a subscriber to see path
//! rebuilds and flight state changes.

mod arc_length;
mod camera;
mod drone;
pub mod generators;
mod path;
mod preview;
mod spline;
mod transform;

pub use arc_length::{ARC_LENGTH_SAMPLES, ArcLengthTable};
pub use camera::Camera;
pub use drone::{
    DroneCamera, DroneCameraConfig, MAX_STEP, MIN_DAMPING, MIN_POI_RADIUS, MIN_SPEED,
};
pub use generators::PathGenerator;
pub use path::{DronePath, MIN_PATH_LENGTH, PathError};
pub use preview::{PathPreview, PreviewVertex};
pub use spline::{catmull_rom, closed_catmull_rom};
pub use transform::{CameraTransform, Transform, look_rotation};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec3};

// ECS support
pub use hecs::{Entity, World};
