//! Static scenery: every structure descriptor and the colored centerline of
//! each line, respawned whenever the network layout changes.

use bevy::prelude::*;

use simulation::network::NetworkLayout;
use simulation::structures::{Polyline, StructureKind};

use crate::meshes::{line_mesh, solid_mesh};

#[derive(Component)]
pub struct Scenery;

/// Surface look of one structure kind.
pub fn kind_material(kind: StructureKind) -> StandardMaterial {
    let (color, roughness) = match kind {
        StructureKind::Rails => (Color::srgb(0.35, 0.33, 0.3), 0.4),
        StructureKind::Guideway => (Color::srgb(0.62, 0.62, 0.6), 0.9),
        StructureKind::Platform => (Color::srgb(0.72, 0.7, 0.66), 0.8),
        StructureKind::Roof => (Color::srgb(0.5, 0.55, 0.6), 0.6),
        StructureKind::ScreenDoorFence => (Color::srgb(0.85, 0.85, 0.88), 0.5),
        StructureKind::Catenary => (Color::srgb(0.3, 0.3, 0.32), 0.5),
        StructureKind::TunnelWall => (Color::srgb(0.45, 0.43, 0.4), 0.95),
        StructureKind::Bridge => (Color::srgb(0.55, 0.2, 0.15), 0.7),
        StructureKind::Concourse => (Color::srgb(0.8, 0.78, 0.74), 0.8),
        StructureKind::ElevatorShell => {
            return StandardMaterial {
                base_color: Color::srgba(0.7, 0.85, 0.9, 0.3),
                alpha_mode: AlphaMode::Blend,
                perceptual_roughness: 0.1,
                ..default()
            }
        }
        StructureKind::Escalator => (Color::srgb(0.4, 0.4, 0.42), 0.5),
    };
    StandardMaterial {
        base_color: color,
        perceptual_roughness: roughness,
        ..default()
    }
}

fn line_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    }
}

pub fn spawn_scenery(
    mut commands: Commands,
    layout: Res<NetworkLayout>,
    existing: Query<Entity, With<Scenery>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !layout.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    let mut spawned = 0;
    for structure in &layout.structures {
        let solid = solid_mesh(structure);
        if !solid.is_empty() {
            commands.spawn((
                Mesh3d(meshes.add(solid.into_mesh())),
                MeshMaterial3d(materials.add(kind_material(structure.kind))),
                Transform::IDENTITY,
                Name::new(structure.label.clone()),
                Scenery,
            ));
            spawned += 1;
        }
        if let Some(mesh) = line_mesh(&structure.lines) {
            commands.spawn((
                Mesh3d(meshes.add(mesh)),
                MeshMaterial3d(materials.add(line_material(Color::srgb(0.15, 0.15, 0.15)))),
                Transform::IDENTITY,
                Scenery,
            ));
        }
        for light in &structure.lights {
            commands.spawn((
                PointLight {
                    intensity: light.intensity,
                    range: light.range,
                    shadows_enabled: false,
                    ..default()
                },
                Transform::from_translation(light.position),
                Scenery,
            ));
        }
    }

    for line in &layout.lines {
        let polyline = Polyline {
            points: line.table.positions(),
        };
        let [r, g, b] = line.color;
        if let Some(mesh) = line_mesh(&[polyline]) {
            commands.spawn((
                Mesh3d(meshes.add(mesh)),
                MeshMaterial3d(materials.add(line_material(Color::linear_rgb(r, g, b)))),
                Transform::IDENTITY,
                Name::new(line.label.clone()),
                Scenery,
            ));
        }
    }
    info!(
        "Spawned scenery: {} structure meshes, {} line paths",
        spawned,
        layout.lines.len()
    );
}

pub fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(40.0, 80.0, -20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });
}
