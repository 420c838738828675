//! Closed flight paths with precomputed arc-length data.

use glam::Vec3;
use thiserror::Error;

use crate::arc_length::{ARC_LENGTH_SAMPLES, ArcLengthTable};
use crate::spline::closed_catmull_rom;

/// Lengths below this are treated as zero.
const MIN_RAW_LENGTH: f32 = 1e-6;

/// Floor applied to the usable length so progress and wrapping never divide
/// by something tiny.
///
/// A loop shorter than this is stretched in time, not stalled: distances
/// along the floored length are scaled back onto the measured curve.
pub const MIN_PATH_LENGTH: f32 = 1.0;

/// Errors that can occur when building a [`DronePath`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A control point contained NaN or infinity.
    #[error("control point {index} is not finite: {point}")]
    NonFinitePoint { index: usize, point: Vec3 },
}

/// A closed loop of control points plus its arc-length lookup table.
///
/// The last point connects back to the first. Paths with fewer than two
/// points, or whose points all coincide, are kept but are not
/// [flyable](Self::is_flyable).
///
/// # Example
///
/// ```
/// use dronecam::{DronePath, Vec3};
///
/// let path = DronePath::new(vec![
///     Vec3::new(0.0, 0.0, 10.0),
///     Vec3::new(50.0, 0.0, 10.0),
///     Vec3::new(50.0, 50.0, 12.0),
///     Vec3::new(0.0, 50.0, 12.0),
/// ])
/// .unwrap();
///
/// assert!(path.is_flyable());
/// assert!(path.length() > 200.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DronePath {
    points: Vec<Vec3>,
    raw_length: f32,
    length: f32,
    table: ArcLengthTable,
}

impl DronePath {
    /// Builds a path from control points, sampling the closed curve to
    /// measure it.
    pub fn new(points: Vec<Vec3>) -> Result<Self, PathError> {
        if let Some((index, &point)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(PathError::NonFinitePoint { index, point });
        }

        if points.len() < 2 {
            return Ok(Self {
                points,
                ..Default::default()
            });
        }

        let table = ArcLengthTable::build(ARC_LENGTH_SAMPLES, |u| closed_catmull_rom(&points, u));
        let raw_length = table.total_length();
        let length = if raw_length > MIN_RAW_LENGTH {
            raw_length.max(MIN_PATH_LENGTH)
        } else {
            0.0
        };

        Ok(Self {
            points,
            raw_length,
            length,
            table,
        })
    }

    /// Control points in traversal order.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Usable loop length, floored to [`MIN_PATH_LENGTH`]; zero if the path
    /// cannot be flown.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Measured curve length before flooring.
    pub fn raw_length(&self) -> f32 {
        self.raw_length
    }

    pub fn table(&self) -> &ArcLengthTable {
        &self.table
    }

    /// Returns true if the path has at least two distinct points.
    pub fn is_flyable(&self) -> bool {
        !self.points.is_empty() && self.length > 0.0
    }

    /// Wraps an arc length into `[0, length)`.
    pub fn wrap_distance(&self, s: f32) -> f32 {
        if self.length <= 0.0 || !s.is_finite() {
            return 0.0;
        }
        let wrapped = s.rem_euclid(self.length);
        if wrapped >= self.length { 0.0 } else { wrapped }
    }

    /// Spline parameter at arc length `s` (wrapped around the loop).
    pub fn parameter_at(&self, s: f32) -> f32 {
        let s = self.wrap_distance(s);
        if self.length <= 0.0 {
            return 0.0;
        }
        self.table.parameter_at(s * self.raw_length / self.length)
    }

    /// Point on the curve at spline parameter `u`.
    pub fn point_at_parameter(&self, u: f32) -> Vec3 {
        closed_catmull_rom(&self.points, u)
    }

    /// Point on the curve at arc length `s` (wrapped around the loop).
    pub fn point_at(&self, s: f32) -> Vec3 {
        self.point_at_parameter(self.parameter_at(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(count: usize, radius: f32) -> Vec<Vec3> {
        (0..count)
            .map(|i| {
                let a = i as f32 / count as f32 * std::f32::consts::TAU;
                Vec3::new(a.cos() * radius, a.sin() * radius, 10.0)
            })
            .collect()
    }

    #[test]
    fn ring_length_approximates_circumference() {
        let path = DronePath::new(ring(16, 20.0)).unwrap();
        let circumference = std::f32::consts::TAU * 20.0;
        assert!(path.is_flyable());
        assert!((path.length() - circumference).abs() < circumference * 0.01);
        assert_eq!(path.length(), path.raw_length());
    }

    #[test]
    fn short_paths_are_not_flyable() {
        let empty = DronePath::new(Vec::new()).unwrap();
        assert!(!empty.is_flyable());
        assert_eq!(empty.length(), 0.0);

        let single = DronePath::new(vec![Vec3::ONE]).unwrap();
        assert!(!single.is_flyable());
        assert_eq!(single.point_at(3.0), Vec3::ONE);

        let stacked = DronePath::new(vec![Vec3::ONE, Vec3::ONE, Vec3::ONE]).unwrap();
        assert!(!stacked.is_flyable());
        assert_eq!(stacked.wrap_distance(5.0), 0.0);
    }

    #[test]
    fn tiny_paths_are_floored() {
        let path = DronePath::new(vec![Vec3::ZERO, Vec3::new(0.1, 0.0, 0.0)]).unwrap();
        assert!(path.raw_length() < 1.0);
        assert_eq!(path.length(), MIN_PATH_LENGTH);

        // Halfway along the floored length is halfway around the real loop.
        let halfway = path.point_at(0.5 * MIN_PATH_LENGTH);
        assert!(halfway.abs_diff_eq(Vec3::new(0.1, 0.0, 0.0), 1e-3));
        let late = path.point_at(0.9 * MIN_PATH_LENGTH);
        assert!(late.distance(path.point_at(0.0)) > 1e-3);
    }

    #[test]
    fn rejects_non_finite_points() {
        let err = DronePath::new(vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, PathError::NonFinitePoint { index: 1, .. }));
    }

    #[test]
    fn wraps_distance_without_a_seam() {
        let path = DronePath::new(ring(8, 30.0)).unwrap();
        let len = path.length();
        assert!((path.wrap_distance(len + 2.0) - 2.0).abs() < 1e-3);
        assert!((path.wrap_distance(-2.0) - (len - 2.0)).abs() < 1e-3);

        let before = path.point_at(len - 0.01);
        let after = path.point_at(0.01);
        assert!(before.distance(after) < 0.05);
    }
}
