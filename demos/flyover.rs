//! Headless flyover: flies a point-of-interest tour for a few simulated
//! seconds and logs the camera pose.
//!
//! Run with `RUST_LOG=dronecam=debug,flyover=info cargo run --example flyover`.

use dronecam::{DroneCamera, DroneCameraConfig, Transform, Vec3, World, generators};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let landmarks = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(120.0, 20.0, 4.0),
        Vec3::new(90.0, 140.0, 12.0),
        Vec3::new(-40.0, 90.0, 2.0),
    ];

    let mut drone = DroneCamera::with_config(DroneCameraConfig {
        speed: 12.0,
        focus_target: Vec3::new(40.0, 60.0, 5.0),
        points_of_interest: landmarks.clone(),
        poi_slowdown_radius: 30.0,
        show_path_preview: true,
        ..Default::default()
    });
    drone.set_path_generator(generators::poi_tour(landmarks, 25.0, 18.0));

    let mut world = World::new();
    let camera = world.spawn((Transform::from_position(Vec3::new(0.0, -50.0, 30.0)),));
    drone.sync_from_entity(&world, camera);
    drone.start();

    if let Some(preview) = drone.path_preview(256) {
        info!(
            vertices = preview.vertices().len(),
            length = drone.path_length(),
            "path preview ready"
        );
    }

    let dt = 1.0 / 60.0;
    for frame in 0..(60 * 20) {
        drone.update_entity(&world, camera, dt);

        if frame % 60 == 0 {
            let view = drone.camera();
            info!(
                second = frame / 60,
                progress = drone.progress(),
                speed = drone.effective_speed(),
                position = ?view.position,
                forward = ?view.forward,
                "drone pose"
            );
        }
    }
}
