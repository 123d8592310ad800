//! Island platform slab between two parallel tracks.

use bevy::math::Vec3;

use crate::config::{PLATFORM_DROP, PLATFORM_THICKNESS};
use crate::curve::SampleTable;
use crate::error::BuildError;
use crate::offset::{bisector_corner, CornerSide};

use super::types::{Slab, StructureDescriptor, StructureKind};

/// Walk both track tables in lockstep and emit one slab per step, its four
/// corners pulled `margin` in from each track toward the other.
///
/// `near` is the track whose platform edge sits on the right of travel and
/// `far` the one whose edge sits on the left. Both tables must have the
/// same number of samples. The last few samples are left uncovered so the
/// slab stops short of the track ends.
pub fn build_platform(
    label: &str,
    near: &SampleTable,
    far: &SampleTable,
    rail_y: f32,
    margin: f32,
) -> Result<StructureDescriptor, BuildError> {
    if near.len() != far.len() {
        return Err(BuildError::MismatchedTables {
            left: near.len(),
            right: far.len(),
        });
    }
    let n = near.len();
    if n < 6 {
        return Err(BuildError::EmptyInput("platform"));
    }

    let a = near.positions();
    let b = far.positions();
    let top = rail_y - PLATFORM_DROP;
    let level = |v: Vec3| Vec3::new(v.x, top, v.z);

    // Reflect the first neighbour to stand in for the missing rear sample.
    let mut prev_near = level(bisector_corner(a[0] * 2.0 - a[1], a[0], a[1], margin, CornerSide::Near));
    let mut prev_far = level(bisector_corner(b[0] * 2.0 - b[1], b[0], b[1], margin, CornerSide::Far));

    let mut out = StructureDescriptor::new(label, StructureKind::Platform);
    for i in 1..n - 4 {
        let near_corner = level(bisector_corner(a[i - 1], a[i], a[i + 1], margin, CornerSide::Near));
        let far_corner = level(bisector_corner(b[i - 1], b[i], b[i + 1], margin, CornerSide::Far));

        out.slabs.push(Slab {
            corners: [prev_near, near_corner, far_corner, prev_far],
            thickness: PLATFORM_THICKNESS,
        });

        prev_near = near_corner;
        prev_far = far_corner;
    }
    Ok(out)
}
