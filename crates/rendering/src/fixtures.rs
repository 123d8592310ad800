//! Moving fixtures: platform door leaves, elevator cabs and their door
//! frames, and escalator steps.

use bevy::prelude::*;

use simulation::config::ESCALATOR_STEP_DEPTH;
use simulation::elevator::Elevators;
use simulation::escalator::Escalators;
use simulation::network::NetworkLayout;
use simulation::platform_doors::PlatformDoors;
use simulation::structures::{BoxPiece, StructureDescriptor};

use crate::meshes::MeshData;

const STEP_WIDTH: f32 = 0.8;
const STEP_THICKNESS: f32 = 0.05;
const CAB_FLOOR_THICKNESS: f32 = 0.05;

#[derive(Component, Debug, Clone, Copy)]
pub struct DoorLeafVisual {
    pub group: usize,
    pub leaf: usize,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ElevatorLeafVisual {
    pub shaft: usize,
    pub leaf: usize,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ElevatorCab {
    pub shaft: usize,
    base: Vec3,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct EscalatorStep {
    pub belt: usize,
    pub step: usize,
    rotation: Quat,
}

#[derive(Component)]
pub struct Fixture;

/// Floor plate of the cab, inside the shell's glass walls at the lower
/// landing.
pub fn cab_floor(shell: &StructureDescriptor) -> Option<BoxPiece> {
    let walls = shell.boxes.get(..4)?;
    let min = walls
        .iter()
        .map(|b| b.center - b.size * 0.5)
        .reduce(Vec3::min)?;
    let max = walls
        .iter()
        .map(|b| b.center + b.size * 0.5)
        .reduce(Vec3::max)?;
    let centre = Vec3::new((min.x + max.x) * 0.5, min.y, (min.z + max.z) * 0.5);
    Some(BoxPiece::axis_aligned(
        centre,
        Vec3::new(max.x - min.x, CAB_FLOOR_THICKNESS, max.z - min.z),
    ))
}

/// Orientation of a step lying along the belt from `bottom` to `top`.
pub fn step_rotation(bottom: Vec3, top: Vec3) -> Quat {
    let run = top - bottom;
    Quat::from_rotation_y(run.x.atan2(run.z))
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_fixtures(
    mut commands: Commands,
    layout: Res<NetworkLayout>,
    doors: Res<PlatformDoors>,
    elevators: Res<Elevators>,
    escalators: Res<Escalators>,
    existing: Query<Entity, With<Fixture>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !layout.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    let leaf_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.75, 0.85, 0.9, 0.6),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let metal = materials.add(StandardMaterial {
        base_color: Color::srgb(0.6, 0.6, 0.62),
        metallic: 0.6,
        ..default()
    });

    for (group_index, group) in doors.groups.iter().enumerate() {
        for (leaf_index, leaf) in group.leaves().iter().enumerate() {
            commands.spawn((
                Mesh3d(meshes.add(Cuboid::new(leaf.size.x, leaf.size.y, leaf.size.z))),
                MeshMaterial3d(leaf_material.clone()),
                Transform::from_translation(leaf.rest)
                    .with_rotation(Quat::from_rotation_y(leaf.heading)),
                DoorLeafVisual {
                    group: group_index,
                    leaf: leaf_index,
                },
                Fixture,
            ));
        }
    }

    for (shaft_index, shaft) in elevators.shafts.iter().enumerate() {
        let assembly = shaft.assembly();
        let mut frame = MeshData::new();
        for piece in &assembly.frame {
            frame.add_box(piece);
        }
        let frame = meshes.add(frame.into_mesh());
        for leaf_index in 0..shaft.leaf_offsets().len() {
            commands.spawn((
                Mesh3d(frame.clone()),
                MeshMaterial3d(metal.clone()),
                Transform::IDENTITY,
                ElevatorLeafVisual {
                    shaft: shaft_index,
                    leaf: leaf_index,
                },
                Fixture,
            ));
        }
        if let Some(floor) = cab_floor(&assembly.shell) {
            commands.spawn((
                Mesh3d(meshes.add(Cuboid::new(floor.size.x, floor.size.y, floor.size.z))),
                MeshMaterial3d(metal.clone()),
                Transform::from_translation(floor.center),
                ElevatorCab {
                    shaft: shaft_index,
                    base: floor.center,
                },
                Fixture,
            ));
        }
    }

    let step_mesh = meshes.add(Cuboid::new(STEP_WIDTH, STEP_THICKNESS, ESCALATOR_STEP_DEPTH));
    for (belt_index, belt) in escalators.belts.iter().enumerate() {
        let [bottom, top] = belt.landing_positions();
        let rotation = step_rotation(bottom, top);
        for (step_index, position) in belt.step_positions().into_iter().enumerate() {
            commands.spawn((
                Mesh3d(step_mesh.clone()),
                MeshMaterial3d(metal.clone()),
                Transform::from_translation(position).with_rotation(rotation),
                EscalatorStep {
                    belt: belt_index,
                    step: step_index,
                    rotation,
                },
                Fixture,
            ));
        }
    }
}

pub fn sync_door_leaves(
    doors: Res<PlatformDoors>,
    mut leaves: Query<(&DoorLeafVisual, &mut Transform)>,
) {
    if !doors.is_changed() {
        return;
    }
    for (visual, mut transform) in &mut leaves {
        if let Some(position) = doors
            .get(visual.group)
            .and_then(|g| g.leaf_position(visual.leaf))
        {
            transform.translation = position;
        }
    }
}

pub fn sync_elevators(
    elevators: Res<Elevators>,
    mut leaves: Query<(&ElevatorLeafVisual, &mut Transform), Without<ElevatorCab>>,
    mut cabs: Query<(&ElevatorCab, &mut Transform), Without<ElevatorLeafVisual>>,
) {
    if !elevators.is_changed() {
        return;
    }
    let offsets: Vec<Vec<Vec3>> = elevators.shafts.iter().map(|s| s.leaf_offsets()).collect();
    for (visual, mut transform) in &mut leaves {
        if let Some(offset) = offsets.get(visual.shaft).and_then(|o| o.get(visual.leaf)) {
            transform.translation = *offset;
        }
    }
    for (cab, mut transform) in &mut cabs {
        if let Some(shaft) = elevators.shafts.get(cab.shaft) {
            transform.translation = cab.base + Vec3::Y * shaft.car_offset();
        }
    }
}

pub fn sync_escalators(
    escalators: Res<Escalators>,
    mut steps: Query<(&EscalatorStep, &mut Transform)>,
) {
    if !escalators.is_changed() {
        return;
    }
    let positions: Vec<Vec<Vec3>> = escalators
        .belts
        .iter()
        .map(|b| b.step_positions())
        .collect();
    for (step, mut transform) in &mut steps {
        if let Some(position) = positions.get(step.belt).and_then(|p| p.get(step.step)) {
            *transform = Transform::from_translation(*position).with_rotation(step.rotation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::elevator::build_elevator;
    use simulation::structures::StructureKind;

    #[test]
    fn test_cab_floor_sits_inside_the_shell() {
        let assembly = build_elevator("test", 7.0, -20.0, 0.0).expect("elevator");
        let floor = cab_floor(&assembly.shell).expect("floor");
        // Glass walls span x 2.1..3.3 and z -20..-18 around the shaft.
        assert!((floor.center.x - 2.7).abs() < 0.05, "{}", floor.center);
        assert!((floor.center.z + 19.0).abs() < 0.05, "{}", floor.center);
        assert!((floor.center.y - 6.5).abs() < 1e-5);
        assert!(floor.size.x > 1.0 && floor.size.z > 1.9);
    }

    #[test]
    fn test_cab_floor_needs_walls() {
        let shell = StructureDescriptor::new("empty", StructureKind::ElevatorShell);
        assert!(cab_floor(&shell).is_none());
    }

    #[test]
    fn test_step_rotation_follows_belt() {
        let rotation = step_rotation(Vec3::ZERO, Vec3::new(5.0, 3.0, 0.0));
        let depth_axis = rotation * Vec3::Z;
        assert!(depth_axis.distance(Vec3::X) < 1e-5, "{depth_axis}");
    }
}
