use bevy::math::Vec3;

use crate::config::ARC_LENGTH_DIVISIONS;
use crate::error::CurveError;

/// Knot spacing below this is treated as coincident points.
const KNOT_EPSILON: f32 = 1e-4;

/// A smooth spline through an ordered list of control points.
///
/// Centripetal Catmull-Rom: passes through every control point and is C¹
/// continuous. End tangents use phantom points reflected through the first
/// and last control points. The arc-length table is built once at
/// construction so repeated `point_at` calls are cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPath {
    points: Vec<Vec3>,
    /// Cumulative chord length at `ARC_LENGTH_DIVISIONS + 1` evenly spaced
    /// parameter values.
    arc_lengths: Vec<f32>,
}

impl ControlPath {
    pub fn new(points: Vec<Vec3>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewControlPoints { got: points.len() });
        }
        let mut path = Self {
            points,
            arc_lengths: Vec::new(),
        };
        path.arc_lengths = path.compute_arc_lengths(ARC_LENGTH_DIVISIONS);
        if path.length() <= f32::EPSILON {
            return Err(CurveError::ZeroLength);
        }
        Ok(path)
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total arc length, approximated by the chord sum of the length table.
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Evaluate at parameter `t` in `[0, 1]` (not arc-length uniform).
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let p = (n - 1) as f32 * t.clamp(0.0, 1.0);
        let mut segment = p.floor() as usize;
        let mut weight = p - segment as f32;
        if segment >= n - 1 {
            segment = n - 2;
            weight = 1.0;
        }

        let p1 = self.points[segment];
        let p2 = self.points[segment + 1];
        let p0 = if segment > 0 {
            self.points[segment - 1]
        } else {
            p1 * 2.0 - p2
        };
        let p3 = if segment + 2 < n {
            self.points[segment + 2]
        } else {
            p2 * 2.0 - p1
        };

        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < KNOT_EPSILON {
            dt1 = 1.0;
        }
        if dt0 < KNOT_EPSILON {
            dt0 = dt1;
        }
        if dt2 < KNOT_EPSILON {
            dt2 = dt1;
        }

        Vec3::new(
            nonuniform_cubic(p0.x, p1.x, p2.x, p3.x, dt0, dt1, dt2, weight),
            nonuniform_cubic(p0.y, p1.y, p2.y, p3.y, dt0, dt1, dt2, weight),
            nonuniform_cubic(p0.z, p1.z, p2.z, p3.z, dt0, dt1, dt2, weight),
        )
    }

    /// Evaluate at arc-length fraction `u` in `[0, 1]`.
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// `divisions + 1` parameter-uniform points, start and end included.
    pub fn points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point(i as f32 / divisions as f32))
            .collect()
    }

    /// Map an arc-length fraction to a spline parameter by binary search over
    /// the cached length table, interpolating linearly within a division.
    pub fn u_to_t(&self, u: f32) -> f32 {
        let lengths = &self.arc_lengths;
        let count = lengths.len();
        let target = u.clamp(0.0, 1.0) * self.length();

        // Largest i with lengths[i] <= target.
        let i = match lengths.partition_point(|&l| l <= target) {
            0 => 0,
            k => k - 1,
        };
        if i >= count - 1 {
            return 1.0;
        }
        let before = lengths[i];
        let segment = lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            (target - before) / segment
        } else {
            0.0
        };
        (i as f32 + fraction) / (count - 1) as f32
    }

    /// A new path through the parameter-uniform points of this one between
    /// `start` and `end` (fractions of `resolution + 1` evaluated points).
    pub fn slice(&self, start: f32, end: f32, resolution: usize) -> Result<Self, CurveError> {
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) || start >= end {
            return Err(CurveError::InvalidSlice { start, end });
        }
        let points = self.points(resolution);
        let len = points.len() as f32;
        let from = (start * len).floor() as usize;
        let to = ((end * len).floor() as usize).min(points.len());
        if to.saturating_sub(from) < 2 {
            return Err(CurveError::InvalidSlice { start, end });
        }
        Self::new(points[from..to].to_vec())
    }

    /// The same curve traversed end to start, rebuilt from `resolution + 1`
    /// evaluated points.
    pub fn reversed(&self, resolution: usize) -> Result<Self, CurveError> {
        let mut points = self.points(resolution);
        points.reverse();
        Self::new(points)
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for i in 1..=divisions {
            let current = self.point(i as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }
}

impl TryFrom<Vec<Vec3>> for ControlPath {
    type Error = CurveError;

    fn try_from(points: Vec<Vec3>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<ControlPath> for Vec<Vec3> {
    fn from(path: ControlPath) -> Self {
        path.points
    }
}

/// One axis of a non-uniform Catmull-Rom segment between `x1` and `x2`.
#[allow(clippy::too_many_arguments)]
fn nonuniform_cubic(
    x0: f32,
    x1: f32,
    x2: f32,
    x3: f32,
    dt0: f32,
    dt1: f32,
    dt2: f32,
    w: f32,
) -> f32 {
    let mut t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
    let mut t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
    t1 *= dt1;
    t2 *= dt1;

    let c0 = x1;
    let c1 = t1;
    let c2 = -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2;
    let c3 = 2.0 * x1 - 2.0 * x2 + t1 + t2;
    c0 + w * (c1 + w * (c2 + w * c3))
}
