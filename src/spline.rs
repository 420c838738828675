//! Closed Catmull-Rom curve evaluation.
//!
//! The curve passes through every control point and wraps from the last point
//! back to the first, so the whole loop is C¹ with no seam. The parameter `u`
//! covers the full loop over `[0, 1)`; each of the `N` segments gets an equal
//! `1 / N` slice of it regardless of its length (see [`crate::ArcLengthTable`]
//! for distance-based pacing).

use glam::Vec3;

/// Evaluates the closed Catmull-Rom curve through `points` at parameter `u`.
///
/// `u` is wrapped into `[0, 1)` first, so any finite value is accepted.
/// A single point yields that point for every `u`; an empty slice yields
/// [`Vec3::ZERO`].
///
/// # Example
///
/// ```
/// use dronecam::{closed_catmull_rom, Vec3};
///
/// let square = [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y];
/// // The curve passes through every control point.
/// assert!(closed_catmull_rom(&square, 0.25).abs_diff_eq(Vec3::X, 1e-5));
/// ```
pub fn closed_catmull_rom(points: &[Vec3], u: f32) -> Vec3 {
    let n = points.len();
    match n {
        0 => return Vec3::ZERO,
        1 => return points[0],
        _ => {}
    }

    let scaled = wrap_unit(u) * n as f32;
    let segment = scaled.floor();
    let t = scaled - segment;
    let i = segment as isize;

    let at = |offset: isize| points[(i + offset).rem_euclid(n as isize) as usize];

    catmull_rom(at(-1), at(0), at(1), at(2), t)
}

/// Standard uniform Catmull-Rom segment between `p1` and `p2`.
///
/// Uses the usual basis matrix scaled by 0.5:
///
/// ```text
///         | 0  2  0  0 |
/// 0.5  ·  |-1  0  1  0 |
///         | 2 -5  4 -1 |
///         |-1  3 -3  1 |
/// ```
#[inline]
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

/// Wraps `u` into `[0, 1)`.
///
/// Non-finite input maps to 0.
#[inline]
pub(crate) fn wrap_unit(u: f32) -> f32 {
    if !u.is_finite() {
        return 0.0;
    }
    let wrapped = u.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}
