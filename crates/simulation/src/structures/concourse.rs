//! The roof deck over the station concourse: slab, beams, ceiling panels,
//! columns, hanger props, sign boards and lights.

use std::f32::consts::FRAC_PI_2;

use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::DOOR_INTERVAL;
use crate::error::BuildError;

use super::types::{
    BoxPiece, CylinderPiece, LightPlacement, StructureDescriptor, StructureKind,
};

const BEAM_XS: [f32; 10] = [5.5, 4.0, 2.8, 1.7, 0.6, -0.6, -1.7, -2.9, -4.0, -4.5];
const COLUMN_XS: [f32; 2] = [2.8, -2.9];
const LIGHT_XS: [f32; 2] = [2.55, -2.9];
const PROP_XS: [f32; 8] = [4.05, 3.95, 1.75, 1.65, -1.65, -1.75, -3.95, -4.05];
const BOARD_XS: [f32; 4] = [4.0, 1.7, -1.7, -4.0];

const CROSS_BEAMS: usize = 49;
const CEILING_PANELS: usize = 6;
const PROP_ROWS: usize = 47;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcourseParams {
    /// Height of the main beam line.
    pub beam_y: f32,
    /// Centre of the deck along Z.
    pub beam_z: f32,
    pub light_intensity: f32,
    pub light_range: f32,
}

impl Default for ConcourseParams {
    fn default() -> Self {
        Self {
            beam_y: 9.4,
            beam_z: 20.0,
            light_intensity: 2.0,
            light_range: 10.0,
        }
    }
}

/// Bay spacing of the ceiling, one door interval plus a walkway.
pub fn ceiling_spacing() -> f32 {
    DOOR_INTERVAL + 2.0
}

/// Full deck length along Z: five bays plus three beam spacings.
pub fn deck_width() -> f32 {
    let cs = ceiling_spacing();
    cs * 5.0 + cs / 9.0 * 3.0
}

pub fn build_concourse(
    label: &str,
    params: &ConcourseParams,
) -> Result<StructureDescriptor, BuildError> {
    if params.light_range <= 0.0 {
        return Err(BuildError::InvalidParameter {
            name: "light range",
            value: params.light_range,
        });
    }

    let cs = ceiling_spacing();
    let bs = cs / 9.0;
    let deck = deck_width();
    let (beam_y, beam_z) = (params.beam_y, params.beam_z);
    let z0 = beam_z - deck * 0.5;

    let mut out = StructureDescriptor::new(label, StructureKind::Concourse);

    out.boxes.push(BoxPiece::axis_aligned(
        Vec3::new(0.5, beam_y + 0.5, beam_z),
        Vec3::new(10.0, 0.1, deck),
    ));

    // Longitudinal beams; the outermost one sits up against the slab.
    for (i, x) in BEAM_XS.iter().enumerate() {
        let y = if i + 1 == BEAM_XS.len() { beam_y + 0.5 } else { beam_y };
        out.boxes.push(BoxPiece::axis_aligned(
            Vec3::new(*x, y, beam_z),
            Vec3::new(0.1, 0.1, deck),
        ));
    }

    for i in 0..CROSS_BEAMS {
        let z = z0 + i as f32 * deck / (CROSS_BEAMS - 1) as f32;
        out.boxes.push(BoxPiece::axis_aligned(
            Vec3::new(0.5, beam_y + 0.3, z),
            Vec3::new(10.0, 0.05, 0.05),
        ));
    }

    for i in 0..CEILING_PANELS {
        let z = z0 + bs * 1.5 + i as f32 * cs;
        out.boxes.push(BoxPiece::axis_aligned(
            Vec3::new(0.5, beam_y - 0.1, z),
            Vec3::new(9.0, 0.05, cs - bs),
        ));
        for x in COLUMN_XS {
            out.cylinders.push(CylinderPiece {
                center: Vec3::new(x, beam_y - 1.5, z),
                radius: 0.3,
                height: 3.0,
            });
        }
        for x in LIGHT_XS {
            out.lights.push(LightPlacement {
                position: Vec3::new(x, beam_y - 1.05, z),
                intensity: params.light_intensity,
                range: params.light_range,
            });
        }
    }

    for i in 0..PROP_ROWS {
        let z = z0 + (i as f32 + 0.5) * deck / PROP_ROWS as f32;
        for x in PROP_XS {
            out.cylinders.push(CylinderPiece {
                center: Vec3::new(x, beam_y - 0.8, z),
                radius: 0.01,
                height: 0.5,
            });
        }
    }

    for x in BOARD_XS {
        out.boxes.push(BoxPiece {
            center: Vec3::new(x, beam_y - 1.05, beam_z),
            size: Vec3::new(deck, 0.04, 0.3),
            rotation: Quat::from_rotation_y(FRAC_PI_2),
        });
    }

    Ok(out)
}
