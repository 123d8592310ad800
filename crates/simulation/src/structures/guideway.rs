//! Elevated guideway: piers under the track and girders between them.

use std::f32::consts::FRAC_PI_2;

use bevy::math::{Quat, Vec3};

use crate::config::{GIRDER_DEPTH, GIRDER_DROP, GIRDER_WIDTH, PIER_GROUND_CLEARANCE, PIER_WIDTH};
use crate::curve::SampleTable;
use crate::error::BuildError;

use super::types::{BoxPiece, StructureDescriptor, StructureKind};

/// Piers at every `pier_every`-th sample and a girder from each pier to the
/// next one.
///
/// Pier height follows the sample's elevation. Samples too low to clear the
/// ground get a girder but no pier.
pub fn build_guideway(
    label: &str,
    table: &SampleTable,
    pier_every: usize,
) -> Result<StructureDescriptor, BuildError> {
    if pier_every == 0 {
        return Err(BuildError::InvalidParameter {
            name: "pier_every",
            value: 0.0,
        });
    }
    if table.len() < 2 {
        return Err(BuildError::EmptyInput("guideway"));
    }

    let mut out = StructureDescriptor::new(label, StructureKind::Guideway);
    let positions = table.positions();

    for i in (0..positions.len()).step_by(pier_every) {
        let p = positions[i];
        let shaft = p.y - PIER_GROUND_CLEARANCE;
        if shaft > 0.0 {
            out.boxes.push(BoxPiece::axis_aligned(
                Vec3::new(p.x, p.y * 0.5, p.z),
                Vec3::new(PIER_WIDTH, shaft, PIER_WIDTH),
            ));
        }
        if let Some(&next) = positions.get(i + pier_every) {
            out.boxes.push(girder(p, next));
        }
    }

    Ok(out)
}

/// A girder sized to the horizontal distance between two anchors, turned to
/// their bearing and tilted to their grade.
pub fn girder(start: Vec3, end: Vec3) -> BoxPiece {
    let d = end - start;
    let run = (d.x * d.x + d.z * d.z).sqrt();
    let bearing = d.x.atan2(d.z);
    let grade = d.y.atan2(run);
    BoxPiece {
        center: Vec3::new(
            (start.x + end.x) * 0.5,
            start.y + d.y * 0.5 - GIRDER_DROP,
            (start.z + end.z) * 0.5,
        ),
        size: Vec3::new(run, GIRDER_DEPTH, GIRDER_WIDTH),
        rotation: Quat::from_rotation_y(bearing - FRAC_PI_2) * Quat::from_rotation_z(grade),
    }
}
