//! Built-in path generators.
//!
//! A generator is any `Fn() -> Vec<Vec3>`; these helpers build the common
//! ones. Each returns a closure that captures its inputs by value, so it can
//! be handed straight to
//! [`DroneCamera::set_path_generator`](crate::DroneCamera::set_path_generator)
//! and re-run later with [`regenerate_path`](crate::DroneCamera::regenerate_path).
//!
//! All generators work in a Z-up world.

use std::f32::consts::TAU;

use glam::Vec3;

/// A boxed path generator as stored by the controller.
pub type PathGenerator = Box<dyn Fn() -> Vec<Vec3> + Send + Sync>;

/// A flat ring of `count` points around `center` at `height` above it.
///
/// `count` is raised to at least 3 so the ring encloses an area.
pub fn orbit_ring(
    center: Vec3,
    radius: f32,
    height: f32,
    count: usize,
) -> impl Fn() -> Vec<Vec3> + Send + Sync + 'static {
    let count = count.max(3);
    move || {
        (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * TAU;
                center + Vec3::new(angle.cos() * radius, angle.sin() * radius, height)
            })
            .collect()
    }
}

/// A sweeping loop around `center` whose radius and altitude undulate, giving
/// a flight line that dips in and climbs out instead of a flat circle.
pub fn scenic_flyover(
    center: Vec3,
    radius: f32,
    height: f32,
    count: usize,
) -> impl Fn() -> Vec<Vec3> + Send + Sync + 'static {
    let count = count.max(4);
    move || {
        (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * TAU;
                // Two lobes in radius, three in altitude, so the pattern
                // does not repeat every half loop.
                let r = radius * (1.0 + 0.25 * (2.0 * angle).sin());
                let z = height * (1.0 + 0.35 * (3.0 * angle).cos());
                center + Vec3::new(angle.cos() * r, angle.sin() * r, z)
            })
            .collect()
    }
}

/// One waypoint per point of interest, visited in the given order.
///
/// Each waypoint is pushed `standoff` units away from the tour's centroid
/// (horizontally) and raised `altitude` units above its point of interest,
/// so the camera passes beside and above each subject rather than through
/// it. A single point of interest gets a small ring around it instead.
pub fn poi_tour(
    points_of_interest: Vec<Vec3>,
    standoff: f32,
    altitude: f32,
) -> impl Fn() -> Vec<Vec3> + Send + Sync + 'static {
    move || match points_of_interest.len() {
        0 => Vec::new(),
        1 => orbit_ring(points_of_interest[0], standoff.max(1.0), altitude, 6)(),
        n => {
            let centroid = points_of_interest.iter().copied().sum::<Vec3>() / n as f32;
            points_of_interest
                .iter()
                .enumerate()
                .map(|(i, &poi)| {
                    let outward = (poi - centroid).with_z(0.0);
                    let outward = outward.try_normalize().unwrap_or_else(|| {
                        let angle = i as f32 / n as f32 * TAU;
                        Vec3::new(angle.cos(), angle.sin(), 0.0)
                    });
                    poi + outward * standoff + Vec3::Z * altitude
                })
                .collect()
        }
    }
}
