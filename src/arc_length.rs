//! Arc-length reparameterization for closed curves.
//!
//! Raw spline parameters do not advance at a constant distance per unit:
//! long segments get the same `1 / N` slice of `u` as short ones. The
//! [`ArcLengthTable`] samples the curve densely once, records the cumulative
//! distance at each sample, and then maps distances back to parameters with a
//! binary search plus linear interpolation.

use glam::Vec3;

/// Number of uniform intervals used when sampling a path.
pub const ARC_LENGTH_SAMPLES: usize = 512;

/// Piecewise-linear mapping between spline parameter `u` and arc length `s`.
///
/// The two sample vectors are index-aligned. `u_samples` runs uniformly from
/// `0` to `1` inclusive (the closing sample lands back on the start of the
/// loop), and `s_samples` holds the cumulative chord length at each `u`, so
/// `s_samples[0] == 0` and the last entry is the total length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArcLengthTable {
    u_samples: Vec<f32>,
    s_samples: Vec<f32>,
}

impl ArcLengthTable {
    /// Samples `curve` at `intervals + 1` uniform parameters in `[0, 1]`.
    ///
    /// `intervals` of zero produces an empty table.
    pub fn build(intervals: usize, curve: impl Fn(f32) -> Vec3) -> Self {
        if intervals == 0 {
            return Self::default();
        }

        let mut u_samples = Vec::with_capacity(intervals + 1);
        let mut s_samples = Vec::with_capacity(intervals + 1);

        let mut previous = curve(0.0);
        let mut total = 0.0;
        u_samples.push(0.0);
        s_samples.push(0.0);

        for i in 1..=intervals {
            let u = i as f32 / intervals as f32;
            let point = curve(u);
            total += point.distance(previous);
            previous = point;
            u_samples.push(u);
            s_samples.push(total);
        }

        Self {
            u_samples,
            s_samples,
        }
    }

    /// Total arc length covered by the table.
    pub fn total_length(&self) -> f32 {
        self.s_samples.last().copied().unwrap_or(0.0)
    }

    /// Parameter samples, uniformly spaced.
    pub fn u_samples(&self) -> &[f32] {
        &self.u_samples
    }

    /// Cumulative arc length at each parameter sample.
    pub fn s_samples(&self) -> &[f32] {
        &self.s_samples
    }

    /// Returns true if the table spans no distance.
    pub fn is_degenerate(&self) -> bool {
        self.s_samples.len() < 2 || self.total_length() <= 0.0
    }

    /// Maps an arc length to a spline parameter.
    ///
    /// Distances before the first sample clamp to the first parameter and
    /// distances past the last sample clamp to the last one. A degenerate
    /// table always returns `0.0`.
    pub fn parameter_at(&self, s: f32) -> f32 {
        if self.is_degenerate() || !s.is_finite() {
            return 0.0;
        }

        let (Some(&first), Some(&last)) = (self.s_samples.first(), self.s_samples.last()) else {
            return 0.0;
        };
        if s <= first {
            return self.u_samples[0];
        }
        if s >= last {
            return self.u_samples[self.u_samples.len() - 1];
        }

        // First index whose distance exceeds `s`; always in 1..len here.
        let hi = self.s_samples.partition_point(|&sample| sample <= s);
        let lo = hi - 1;

        let (s0, s1) = (self.s_samples[lo], self.s_samples[hi]);
        let (u0, u1) = (self.u_samples[lo], self.u_samples[hi]);
        let span = s1 - s0;
        if span <= f32::EPSILON {
            return u0;
        }
        u0 + (u1 - u0) * ((s - s0) / span)
    }

    /// Maps a spline parameter in `[0, 1]` to its arc length.
    ///
    /// This is the forward direction of [`parameter_at`](Self::parameter_at),
    /// interpolating between the uniform parameter samples.
    pub fn length_at(&self, u: f32) -> f32 {
        if self.is_degenerate() || !u.is_finite() {
            return 0.0;
        }

        let intervals = self.u_samples.len() - 1;
        let scaled = u.clamp(0.0, 1.0) * intervals as f32;
        let lo = (scaled.floor() as usize).min(intervals - 1);
        let t = scaled - lo as f32;
        self.s_samples[lo] + (self.s_samples[lo + 1] - self.s_samples[lo]) * t
    }
}
