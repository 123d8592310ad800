//! Running rails and tunnel walls derived from offset lines.

use bevy::math::Vec3;

use crate::curve::SampleTable;
use crate::error::BuildError;
use crate::offset::offset;

use super::types::{BoxPiece, Polyline, StructureDescriptor, StructureKind};

/// Centerline plus left and right rails at half the gauge either side.
pub fn build_rails(
    label: &str,
    table: &SampleTable,
    gauge: f32,
) -> Result<StructureDescriptor, BuildError> {
    if gauge <= 0.0 {
        return Err(BuildError::InvalidParameter {
            name: "gauge",
            value: gauge,
        });
    }
    if table.len() < 2 {
        return Err(BuildError::EmptyInput("rails"));
    }

    let centre = table.positions();
    let right = offset(table, gauge * 0.5);
    let left = offset(table, -gauge * 0.5);
    right.validate_against(&centre)?;
    left.validate_against(&centre)?;

    let mut out = StructureDescriptor::new(label, StructureKind::Rails);
    out.lines.push(Polyline { points: centre });
    out.lines.push(Polyline {
        points: left.points().to_vec(),
    });
    out.lines.push(Polyline {
        points: right.points().to_vec(),
    });
    Ok(out)
}

/// Wall panels standing on both offset lines, `margin` either side of the
/// centerline.
pub fn build_tunnel_walls(
    label: &str,
    table: &SampleTable,
    margin: f32,
    height: f32,
    thickness: f32,
) -> Result<StructureDescriptor, BuildError> {
    if height <= 0.0 {
        return Err(BuildError::InvalidParameter {
            name: "wall height",
            value: height,
        });
    }
    if table.len() < 2 {
        return Err(BuildError::EmptyInput("tunnel walls"));
    }

    let centre = table.positions();
    let lift = Vec3::Y * (height * 0.5);
    let mut out = StructureDescriptor::new(label, StructureKind::TunnelWall);

    for side in [margin, -margin] {
        let face = offset(table, side);
        face.validate_against(&centre)?;
        for pair in face.points().windows(2) {
            out.boxes
                .push(BoxPiece::between(pair[0] + lift, pair[1] + lift, height, thickness));
        }
    }
    Ok(out)
}
