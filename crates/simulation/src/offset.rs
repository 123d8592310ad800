//! Lateral offsetting of sampled centerlines.
//!
//! Each point is pushed sideways along the bisector of the turn it sits on.
//! The turn angle is wrapped into `[0, 2π)` before halving, so a positive
//! margin always lands right of the direction of travel and a negative margin
//! left of it, on straights and on bends of either hand.

use std::f32::consts::{PI, TAU};

use bevy::math::Vec3;

use crate::curve::{wrap_tau, SampleTable};
use crate::error::BuildError;

/// A centerline displaced by a signed lateral margin.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetTable {
    points: Vec<Vec3>,
    bisectors: Vec<f32>,
    margin: f32,
}

impl OffsetTable {
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Bisector angle used at each point.
    pub fn bisectors(&self) -> &[f32] {
        &self.bisectors
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check that no offset segment runs backwards relative to the
    /// centerline segment it was derived from.
    ///
    /// A reversed segment means the margin exceeds the local radius of
    /// curvature and the offset line has folded over itself.
    pub fn validate_against(&self, centerline: &[Vec3]) -> Result<(), BuildError> {
        if centerline.len() != self.points.len() {
            return Err(BuildError::MismatchedTables {
                left: centerline.len(),
                right: self.points.len(),
            });
        }
        for i in 0..self.points.len().saturating_sub(1) {
            let base = horizontal(centerline[i + 1] - centerline[i]);
            let shifted = horizontal(self.points[i + 1] - self.points[i]);
            if base.length_squared() > 0.0 && base.dot(shifted) <= 0.0 {
                return Err(BuildError::SelfIntersectingOffset {
                    index: i,
                    margin: self.margin,
                });
            }
        }
        Ok(())
    }
}

/// Offset every sample of `table` by `margin`.
pub fn offset(table: &SampleTable, margin: f32) -> OffsetTable {
    offset_points(&table.positions(), margin)
}

/// Offset a raw point sequence by `margin`.
pub fn offset_points(points: &[Vec3], margin: f32) -> OffsetTable {
    let n = points.len();
    let mut out = Vec::with_capacity(n);
    let mut bisectors = Vec::with_capacity(n);

    for i in 0..n {
        let now = points[i];
        let rear = if i > 0 { points[i - 1] } else { now };
        let next = if i + 1 < n { points[i + 1] } else { now };

        // Bearings from the neighbours toward this point.
        let mut rear_angle = wrap_tau((now.x - rear.x).atan2(now.z - rear.z));
        let mut next_angle = wrap_tau((now.x - next.x).atan2(now.z - next.z));
        if i == 0 {
            rear_angle = next_angle + PI;
        } else if i + 1 == n {
            next_angle = rear_angle + PI;
        }

        let bisector = rear_angle + turn_span(rear_angle, next_angle) * 0.5;
        out.push(Vec3::new(
            now.x - bisector.sin() * margin,
            now.y,
            now.z - bisector.cos() * margin,
        ));
        bisectors.push(bisector);
    }

    OffsetTable {
        points: out,
        bisectors,
        margin,
    }
}

/// Which of the two platform-edge conventions a corner uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerSide {
    /// Bearings toward the point; corner pulled back along the bisector.
    Near,
    /// Bearings away from the point; corner pushed out along the mirrored
    /// bisector.
    Far,
}

/// A single bisector corner at `now`, computed afresh from its neighbours.
///
/// Platform slabs compute their edges this way so they can carry their own
/// margin independent of any cached [`OffsetTable`].
pub fn bisector_corner(rear: Vec3, now: Vec3, next: Vec3, margin: f32, side: CornerSide) -> Vec3 {
    match side {
        CornerSide::Near => {
            let a = wrap_tau((now.x - rear.x).atan2(now.z - rear.z));
            let b = wrap_tau((now.x - next.x).atan2(now.z - next.z));
            let angle = a + turn_span(a, b) * 0.5;
            Vec3::new(
                now.x - angle.sin() * margin,
                now.y,
                now.z - angle.cos() * margin,
            )
        }
        CornerSide::Far => {
            let a = wrap_tau((rear.x - now.x).atan2(rear.z - now.z));
            let b = wrap_tau((next.x - now.x).atan2(next.z - now.z));
            let angle = a - turn_span(a, b) * 0.5;
            Vec3::new(
                now.x + angle.sin() * margin,
                now.y,
                now.z + angle.cos() * margin,
            )
        }
    }
}

/// `to - from` wrapped into `[0, 2π)`.
fn turn_span(from: f32, to: f32) -> f32 {
    let span = to - from;
    if span < 0.0 {
        span + TAU
    } else {
        span
    }
}

fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ControlPath;

    fn straight_table() -> SampleTable {
        let path = ControlPath::new(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0)]).unwrap();
        SampleTable::sample(&path, 1.0).unwrap()
    }

    fn curved_table() -> SampleTable {
        let path = ControlPath::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 20.0),
            Vec3::new(20.0, 0.0, 30.0),
        ])
        .unwrap();
        SampleTable::sample(&path, 0.5).unwrap()
    }

    #[test]
    fn test_straight_platform_margin_is_exact() {
        let table = straight_table();
        let offset = offset(&table, 0.7);
        assert_eq!(offset.len(), table.len());
        for (p, o) in table.positions().iter().zip(offset.points()) {
            let lateral = *o - *p;
            assert!((lateral.length() - 0.7).abs() < 1e-4, "lateral {lateral:?}");
            // Perpendicular to a line running along +Z.
            assert!(lateral.z.abs() < 1e-4);
            assert_eq!(o.y, p.y);
        }
    }

    #[test]
    fn test_positive_margin_side_on_straight() {
        let offset = offset(&straight_table(), 0.7);
        // Travelling +Z, a positive margin lands on -X.
        assert!(offset.points().iter().all(|p| (p.x + 0.7).abs() < 1e-4));
    }

    #[test]
    fn test_offset_symmetry_on_straight_input() {
        let table = straight_table();
        let left = offset(&table, 1.3);
        let right = offset(&table, -1.3);
        let centre = table.positions();
        for i in 1..centre.len() - 1 {
            let mid = (left.points()[i] + right.points()[i]) * 0.5;
            assert!(mid.distance(centre[i]) < 1e-4);
        }
    }

    #[test]
    fn test_offset_keeps_side_through_curves() {
        let table = curved_table();
        let centre = table.positions();
        let offset = offset(&table, 1.0);
        for i in 1..centre.len() - 1 {
            let forward = horizontal(centre[i + 1] - centre[i - 1]).normalize();
            let lateral = horizontal(offset.points()[i] - centre[i]);
            // Cross product sign stays the same along the whole line.
            let cross = forward.z * lateral.x - forward.x * lateral.z;
            assert!(cross < 0.0, "side flipped at {i}");
            assert!((lateral.length() - 1.0).abs() < 0.01);
        }
    }

    #[test]
    fn test_offset_is_deterministic() {
        let table = curved_table();
        assert_eq!(offset(&table, 0.7), offset(&table, 0.7));
    }

    #[test]
    fn test_bisectors_are_reported() {
        let offset = offset(&straight_table(), 0.7);
        assert_eq!(offset.bisectors().len(), offset.len());
        assert_eq!(offset.margin(), 0.7);
    }

    #[test]
    fn test_validate_accepts_mild_curve() {
        let table = curved_table();
        let offset = offset(&table, 0.7);
        assert!(offset.validate_against(&table.positions()).is_ok());
    }

    #[test]
    fn test_validate_rejects_folded_offset() {
        // A hairpin with a margin far wider than its radius.
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.5, 0.0, 1.5),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];
        // Negative margin offsets toward the inside of this right-hand turn.
        let offset = offset_points(&points, -5.0);
        let err = offset.validate_against(&points).unwrap_err();
        assert!(matches!(err, BuildError::SelfIntersectingOffset { margin, .. } if margin == -5.0));
    }

    #[test]
    fn test_validate_rejects_length_mismatch() {
        let table = straight_table();
        let offset = offset(&table, 0.7);
        let err = offset.validate_against(&table.positions()[1..]).unwrap_err();
        assert!(matches!(err, BuildError::MismatchedTables { .. }));
    }

    #[test]
    fn test_corner_sides_agree_on_straight() {
        let rear = Vec3::new(0.0, 0.0, 0.0);
        let now = Vec3::new(0.0, 0.0, 1.0);
        let next = Vec3::new(0.0, 0.0, 2.0);
        let near = bisector_corner(rear, now, next, 0.7, CornerSide::Near);
        let far = bisector_corner(rear, now, next, 0.7, CornerSide::Far);
        assert!((near.x + 0.7).abs() < 1e-5);
        assert!((far.x - 0.7).abs() < 1e-5);
        assert!((near.z - 1.0).abs() < 1e-5 && (far.z - 1.0).abs() < 1e-5);
    }
}
