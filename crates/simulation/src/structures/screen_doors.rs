//! Platform screen doors: sliding leaves and the fixed fence between them.

use std::f32::consts::FRAC_PI_2;

use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::{
    DOOR_DROP, DOOR_LEAF_HEIGHT, DOOR_LEAF_THICKNESS, DOOR_LIFT, DOOR_SLIDE_SECS, DOOR_TRAVEL,
    DOOR_WIDTH, FENCE_HEIGHT, FENCE_OVERLAP, FENCE_THICKNESS,
};
use crate::curve::SampleTable;
use crate::error::BuildError;
use crate::platform_doors::{DoorGroup, DoorLeaf};

use super::types::{BoxPiece, StructureDescriptor, StructureKind};

/// Which side of the track, looking along the direction of travel, the
/// platform edge is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformSide {
    Left,
    Right,
}

impl PlatformSide {
    fn sign(self) -> f32 {
        match self {
            PlatformSide::Left => -1.0,
            PlatformSide::Right => 1.0,
        }
    }
}

/// Fence geometry plus the door group that animates the leaves.
#[derive(Debug, Clone)]
pub struct ScreenDoorSet {
    pub fence: StructureDescriptor,
    pub doors: DoorGroup,
}

/// One door unit per pair of consecutive samples of `table`.
///
/// `table` is normally sampled every door interval so that each unit lines
/// up with one car. Units sit `setback` from the track centre on `side`.
pub fn build_screen_doors(
    label: &str,
    table: &SampleTable,
    setback: f32,
    side: PlatformSide,
    doors_per_unit: usize,
) -> Result<ScreenDoorSet, BuildError> {
    if doors_per_unit == 0 {
        return Err(BuildError::InvalidParameter {
            name: "doors_per_unit",
            value: 0.0,
        });
    }
    if table.len() < 2 {
        return Err(BuildError::EmptyInput("screen doors"));
    }

    let mut fence = StructureDescriptor::new(label, StructureKind::ScreenDoorFence);
    let mut leaves = Vec::new();

    for pair in table.positions().windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let angle = (p2.x - p1.x).atan2(p2.z - p1.z);
        let half = p1.distance(p2) * 0.5;
        let mid_x = p1.x + angle.sin() * half;
        let mid_z = p1.z + angle.cos() * half;

        let side_angle = angle + side.sign() * FRAC_PI_2;
        let centre = Vec3::new(
            mid_x - side_angle.sin() * setback,
            p1.y - DOOR_DROP,
            mid_z - side_angle.cos() * setback,
        );

        let span = p1.distance(p2);
        place_unit(centre, angle, span, doors_per_unit, &mut fence, &mut leaves);
    }

    Ok(ScreenDoorSet {
        fence,
        doors: DoorGroup::new(leaves, DOOR_TRAVEL, DOOR_SLIDE_SECS),
    })
}

/// Lay out `count` doors evenly over `span`, centred on `centre` and running
/// along `angle`. Fences fill the gaps between doors; the two end fences
/// are half length (plus a small overlap) so neighbouring units meet
/// without doubling up.
pub fn place_unit(
    centre: Vec3,
    angle: f32,
    span: f32,
    count: usize,
    fence: &mut StructureDescriptor,
    leaves: &mut Vec<DoorLeaf>,
) {
    let spacing = span / count as f32;
    let half = (count as f32 - 1.0) * 0.5;
    let dir = Vec3::new(angle.sin(), 0.0, angle.cos());
    let rotation = Quat::from_rotation_y(angle);

    let fence_point = spacing * 0.5;
    let fence_length = spacing - DOOR_WIDTH;
    let end_fence = fence_length * 0.5 + FENCE_OVERLAP;
    let end_shift = end_fence * 0.5 - FENCE_OVERLAP;

    let fence_box = |along: f32, length: f32| BoxPiece {
        center: centre + dir * along,
        size: Vec3::new(FENCE_THICKNESS, FENCE_HEIGHT, length),
        rotation,
    };

    for i in 0..count {
        let along = (i as f32 - half) * spacing;
        let door_centre = centre + dir * along;
        let leaf_size = Vec3::new(DOOR_LEAF_THICKNESS, DOOR_LEAF_HEIGHT, DOOR_WIDTH * 0.5);

        for shift in [DOOR_WIDTH * 0.25, -DOOR_WIDTH * 0.25] {
            leaves.push(DoorLeaf {
                rest: door_centre + dir * shift + Vec3::Y * DOOR_LIFT,
                heading: angle,
                size: leaf_size,
            });
        }

        if i == 0 {
            fence
                .boxes
                .push(fence_box(along - fence_point + end_shift, end_fence));
        }
        if i + 1 == count {
            fence
                .boxes
                .push(fence_box(along + fence_point - end_shift, end_fence));
        } else {
            fence.boxes.push(fence_box(along + fence_point, fence_length));
        }
    }
}
