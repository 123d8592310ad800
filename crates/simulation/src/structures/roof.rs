//! Gable roof over an island platform, with a pillar at every bay.

use bevy::math::Vec3;

use crate::config::{
    ROOF_DROP, ROOF_PILLAR_DROP, ROOF_PILLAR_HEIGHT, ROOF_PILLAR_WIDTH, ROOF_PITCH_DEG,
    ROOF_THICKNESS,
};
use crate::curve::SampleTable;
use crate::error::BuildError;
use crate::offset::offset;

use super::types::{BoxPiece, Slab, StructureDescriptor, StructureKind};

/// Build the roof from two bay tables (one sample per bay boundary on each
/// track).
///
/// The ridge runs along the running midpoint of the two tracks' edge lines
/// (each track offset `margin` toward the other). Each bay gets one panel
/// per side falling from the ridge to that track's edge, and one pillar
/// under the middle of the ridge segment.
pub fn build_roof(
    label: &str,
    near: &SampleTable,
    far: &SampleTable,
    roof_y: f32,
    margin: f32,
) -> Result<StructureDescriptor, BuildError> {
    let near_edge = offset(near, margin);
    let far_edge = offset(far, -margin);
    if near_edge.len() != far_edge.len() {
        return Err(BuildError::MismatchedTables {
            left: near_edge.len(),
            right: far_edge.len(),
        });
    }
    if near_edge.len() < 2 {
        return Err(BuildError::EmptyInput("roof"));
    }

    let eave_y = roof_y - ROOF_DROP;
    let ridge: Vec<Vec3> = near_edge
        .points()
        .iter()
        .zip(far_edge.points())
        .map(|(a, b)| {
            let m = (*a + *b) * 0.5;
            Vec3::new(m.x, eave_y, m.z)
        })
        .collect();

    let pitch = ROOF_PITCH_DEG.to_radians().tan();
    let mut out = StructureDescriptor::new(label, StructureKind::Roof);

    for i in 0..ridge.len() - 1 {
        let (r0, r1) = (ridge[i], ridge[i + 1]);
        let mid = (r0 + r1) * 0.5;
        out.boxes.push(BoxPiece::axis_aligned(
            Vec3::new(mid.x, roof_y - ROOF_PILLAR_DROP, mid.z),
            Vec3::new(ROOF_PILLAR_WIDTH, ROOF_PILLAR_HEIGHT, ROOF_PILLAR_WIDTH),
        ));

        for edge in [near_edge.points(), far_edge.points()] {
            let e0 = eave(edge[i], r0, eave_y, pitch);
            let e1 = eave(edge[i + 1], r1, eave_y, pitch);
            out.slabs.push(Slab {
                corners: [r0, r1, e1, e0],
                thickness: ROOF_THICKNESS,
            });
        }
    }
    Ok(out)
}

/// Eave corner: the edge point lowered in proportion to its horizontal
/// distance from the ridge.
fn eave(edge: Vec3, ridge: Vec3, ridge_y: f32, pitch: f32) -> Vec3 {
    let run = Vec3::new(edge.x - ridge.x, 0.0, edge.z - ridge.z).length();
    Vec3::new(edge.x, ridge_y - run * pitch, edge.z)
}
