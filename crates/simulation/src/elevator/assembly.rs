//! Static parts of one shaft and the door groups that animate on it.

use std::f32::consts::FRAC_PI_2;

use bevy::math::Vec3;

use crate::config::{ELEVATOR_DOOR_SECS, ELEVATOR_DOOR_TRAVEL, ELEVATOR_FLOOR_HEIGHT};
use crate::error::BuildError;
use crate::platform_doors::{DoorGroup, DoorLeaf};
use crate::structures::{BoxPiece, StructureDescriptor, StructureKind};

/// Gap between the two leaves of one doorway, and the car doors' setback
/// behind the landing doors.
const LEAF_SPACING: f32 = 0.2;
const CAR_SETBACK: f32 = 0.05;

/// Everything one shaft is built from.
///
/// Door leaves here are whole frames: `frame` is one leaf's boxes at the
/// lower landing, and each leaf's position is an offset to add to it.
#[derive(Debug, Clone)]
pub struct ElevatorAssembly {
    pub shell: StructureDescriptor,
    pub frame: Vec<BoxPiece>,
    pub lower: DoorGroup,
    pub upper: DoorGroup,
    pub car: DoorGroup,
}

pub fn build_elevator(
    label: &str,
    floor_y: f32,
    z: f32,
    x_shift: f32,
) -> Result<ElevatorAssembly, BuildError> {
    if !floor_y.is_finite() || !z.is_finite() || !x_shift.is_finite() {
        return Err(BuildError::InvalidParameter {
            name: "elevator position",
            value: floor_y + z + x_shift,
        });
    }

    let at = |x: f32, dy: f32, dz: f32| Vec3::new(x + x_shift, floor_y + dy, z + dz);
    let glass = |centre: Vec3, size: Vec3| BoxPiece::axis_aligned(centre, size);

    let mut shell = StructureDescriptor::new(label, StructureKind::ElevatorShell);
    shell.boxes.extend([
        glass(at(2.7, 0.0, 0.0), Vec3::new(1.2, 1.0, 0.05)),
        glass(at(2.7, 0.0, 2.0), Vec3::new(1.2, 1.0, 0.05)),
        glass(at(2.1, 0.0, 1.0), Vec3::new(0.05, 1.0, 2.0)),
        glass(at(3.3, 0.0, 1.0), Vec3::new(0.05, 1.0, 2.0)),
        // Corner post running past both floors.
        glass(at(3.3, 0.0, 1.0), Vec3::new(0.1, 3.0, 0.1)),
    ]);

    let frame = vec![
        BoxPiece::axis_aligned(at(3.0, -0.35, 1.0), Vec3::new(0.1, 0.3, 0.01)),
        BoxPiece::axis_aligned(at(3.0, 0.4, 1.0), Vec3::new(0.1, 0.2, 0.01)),
        BoxPiece::axis_aligned(at(3.075, 0.0, 1.0), Vec3::new(0.05, 1.0, 0.01)),
        BoxPiece::axis_aligned(at(2.925, 0.0, 1.0), Vec3::new(0.05, 1.0, 0.01)),
    ];

    let pair = |y: f32, dz: f32| {
        let leaf = |x: f32| DoorLeaf {
            rest: Vec3::new(x, y, dz),
            heading: FRAC_PI_2,
            size: Vec3::new(LEAF_SPACING, 1.0, 0.01),
        };
        DoorGroup::new(
            vec![leaf(0.0), leaf(-LEAF_SPACING)],
            ELEVATOR_DOOR_TRAVEL,
            ELEVATOR_DOOR_SECS,
        )
    };

    Ok(ElevatorAssembly {
        shell,
        frame,
        lower: pair(0.0, 0.0),
        upper: pair(ELEVATOR_FLOOR_HEIGHT, 0.0),
        car: pair(0.0, -CAR_SETBACK),
    })
}
