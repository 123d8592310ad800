use std::f32::consts::{PI, TAU};

use bevy::math::Vec3;

use crate::config::{BANK_PER_CURVATURE, MAX_BANK_RAD};
use crate::error::CurveError;

use super::ControlPath;

/// One entry of a [`SampleTable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: Vec3,
    /// Arc length from the path start to this sample.
    pub distance: f32,
}

/// Orientation derived at one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleFrame {
    /// Bearing in the horizontal plane, `atan2(dx, dz)`.
    pub heading: f32,
    /// Climb angle, positive uphill.
    pub grade: f32,
    /// Cant into the curve, proportional to turn rate and clamped.
    pub bank: f32,
}

/// Arc-length-uniform resampling of a [`ControlPath`].
///
/// Samples are `interval` apart along the curve. The last sample never
/// overshoots the path end, so the final gap may be shorter than `interval`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    samples: Vec<Sample>,
    interval: f32,
}

impl SampleTable {
    /// Resample `path` every `interval` metres of arc length.
    pub fn sample(path: &ControlPath, interval: f32) -> Result<Self, CurveError> {
        if interval.is_nan() || interval <= 0.0 {
            return Err(CurveError::NonPositiveInterval(interval));
        }
        let length = path.length();
        if length <= f32::EPSILON {
            return Err(CurveError::ZeroLength);
        }

        let divisions = (length / interval).floor() as usize;
        let samples = (0..=divisions)
            .map(|i| {
                let distance = interval * i as f32;
                let u = (distance / length).min(1.0);
                Sample {
                    position: path.point_at(u),
                    distance: distance.min(length),
                }
            })
            .collect();

        Ok(Self { samples, interval })
    }

    /// Resample `path` into `divisions` equal arc-length steps
    /// (`divisions + 1` samples, both ends included).
    pub fn by_count(path: &ControlPath, divisions: usize) -> Self {
        let divisions = divisions.max(1);
        let length = path.length();
        let samples = (0..=divisions)
            .map(|i| {
                let u = i as f32 / divisions as f32;
                Sample {
                    position: path.point_at(u),
                    distance: length * u,
                }
            })
            .collect();
        Self {
            samples,
            interval: length / divisions as f32,
        }
    }

    /// Wrap already-spaced positions, accumulating chord distance.
    pub fn from_positions(positions: &[Vec3]) -> Self {
        let mut distance = 0.0;
        let mut previous = positions.first().copied();
        let samples: Vec<Sample> = positions
            .iter()
            .map(|&position| {
                if let Some(prev) = previous {
                    distance += prev.distance(position);
                }
                previous = Some(position);
                Sample { position, distance }
            })
            .collect();
        let interval = if samples.len() > 1 {
            distance / (samples.len() - 1) as f32
        } else {
            0.0
        };
        Self { samples, interval }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.samples.iter().map(|s| s.position).collect()
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.samples.get(index).map(|s| s.position)
    }

    /// Distance covered by the whole table.
    pub fn total_distance(&self) -> f32 {
        self.samples.last().map_or(0.0, |s| s.distance)
    }

    /// Quantized lookup: sample `floor(ratio * len)`, clamped to the table.
    ///
    /// Not interpolated; consecutive ratios inside one sample's span return
    /// the same point.
    pub fn point_at_ratio(&self, ratio: f32) -> Vec3 {
        let Some(last) = self.samples.len().checked_sub(1) else {
            return Vec3::ZERO;
        };
        let index = (ratio * self.samples.len() as f32).floor().max(0.0) as usize;
        self.samples[index.min(last)].position
    }

    /// Position at `ratio` and the unit direction toward the following
    /// sample. The index is clamped so a successor always exists.
    ///
    /// `None` when the table has fewer than two samples.
    pub fn tangent_at_ratio(&self, ratio: f32) -> Option<(Vec3, Vec3)> {
        let len = self.samples.len();
        if len < 2 {
            return None;
        }
        let index = ((ratio * len as f32).floor().max(0.0) as usize).min(len - 2);
        let here = self.samples[index].position;
        let next = self.samples[index + 1].position;
        Some((here, (next - here).normalize_or_zero()))
    }

    /// Heading, grade and bank at every sample.
    pub fn frames(&self) -> Vec<SampleFrame> {
        let n = self.samples.len();
        (0..n)
            .map(|i| {
                let here = self.samples[i].position;
                let (from, to) = if i + 1 < n {
                    (here, self.samples[i + 1].position)
                } else if i > 0 {
                    (self.samples[i - 1].position, here)
                } else {
                    (here, here)
                };
                let delta = to - from;
                let horizontal = Vec3::new(delta.x, 0.0, delta.z).length();

                let bank = if i > 0 && i + 1 < n {
                    let incoming = heading_between(self.samples[i - 1].position, here);
                    let outgoing = heading_between(here, self.samples[i + 1].position);
                    let turn = wrap_pi(outgoing - incoming);
                    let span = self.samples[i + 1].distance - self.samples[i - 1].distance;
                    if span > 0.0 {
                        (turn / (span * 0.5) * BANK_PER_CURVATURE)
                            .clamp(-MAX_BANK_RAD, MAX_BANK_RAD)
                    } else {
                        0.0
                    }
                } else {
                    0.0
                };

                SampleFrame {
                    heading: delta.x.atan2(delta.z),
                    grade: delta.y.atan2(horizontal),
                    bank,
                }
            })
            .collect()
    }
}

/// Horizontal bearing from `a` to `b`, measured as `atan2(dx, dz)`.
pub fn heading_between(a: Vec3, b: Vec3) -> f32 {
    (b.x - a.x).atan2(b.z - a.z)
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_tau(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle into `[-π, π)`.
pub fn wrap_pi(angle: f32) -> f32 {
    wrap_tau(angle + PI) - PI
}
