//! Train cars: six textured faces per car, placed from the fleet every
//! frame.
//!
//! Face textures come from each train's livery. A face without a texture,
//! or whose texture fails to load, shows the livery colour instead; failed
//! paths are kept in [`TextureFailures`] for the UI.

use std::collections::HashMap;

use bevy::asset::AssetLoadFailedEvent;
use bevy::prelude::*;

use simulation::config::{CAR_BODY_WIDTH, CAR_HEIGHT, CAR_RIDE_HEIGHT, TRAIN_WIDTH};
use simulation::livery::{CarFace, Livery};
use simulation::network::NetworkLayout;
use simulation::train_motion::{CarPlacement, TrainFleet};

use crate::meshes::MeshData;

/// One car of one train, indexed like `TrainFleet::trains[train].cars()[car]`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainCar {
    pub train: usize,
    pub car: usize,
}

/// Loaded livery textures and the face materials that use each one.
#[derive(Resource, Default)]
pub struct LiveryTextures {
    handles: HashMap<String, Handle<Image>>,
    users: HashMap<String, Vec<(Handle<StandardMaterial>, Color)>>,
}

impl LiveryTextures {
    fn path_of(&self, id: AssetId<Image>) -> Option<&str> {
        self.handles
            .iter()
            .find(|(_, handle)| handle.id() == id)
            .map(|(path, _)| path.as_str())
    }
}

/// A texture that could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureFailure {
    pub path: String,
    pub error: String,
}

#[derive(Resource, Debug, Default)]
pub struct TextureFailures {
    failures: Vec<TextureFailure>,
}

impl TextureFailures {
    /// Remember a failure. Returns false if `path` already failed.
    pub fn record(&mut self, path: &str, error: String) -> bool {
        if self.failures.iter().any(|f| f.path == path) {
            return false;
        }
        self.failures.push(TextureFailure {
            path: path.to_string(),
            error,
        });
        true
    }

    pub fn failures(&self) -> &[TextureFailure] {
        &self.failures
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// One face of the car body. The car travels along local +Z, so the front
/// is at +Z and the `Right` face (local +X) rides on the left of travel.
pub fn car_face_mesh(face: CarFace) -> MeshData {
    let (hx, hy, hz) = (CAR_BODY_WIDTH * 0.5, CAR_HEIGHT * 0.5, TRAIN_WIDTH * 0.5);
    let v = Vec3::new;
    let (corners, normal) = match face {
        CarFace::Right => (
            [v(hx, -hy, hz), v(hx, -hy, -hz), v(hx, hy, -hz), v(hx, hy, hz)],
            Vec3::X,
        ),
        CarFace::Left => (
            [v(-hx, -hy, -hz), v(-hx, -hy, hz), v(-hx, hy, hz), v(-hx, hy, -hz)],
            Vec3::NEG_X,
        ),
        CarFace::Top => (
            [v(-hx, hy, hz), v(hx, hy, hz), v(hx, hy, -hz), v(-hx, hy, -hz)],
            Vec3::Y,
        ),
        CarFace::Bottom => (
            [v(-hx, -hy, -hz), v(hx, -hy, -hz), v(hx, -hy, hz), v(-hx, -hy, hz)],
            Vec3::NEG_Y,
        ),
        CarFace::Front => (
            [v(-hx, -hy, hz), v(hx, -hy, hz), v(hx, hy, hz), v(-hx, hy, hz)],
            Vec3::Z,
        ),
        CarFace::Back => (
            [v(hx, -hy, -hz), v(-hx, -hy, -hz), v(-hx, hy, -hz), v(hx, hy, -hz)],
            Vec3::NEG_Z,
        ),
    };
    let mut data = MeshData::new();
    data.add_quad(corners, normal);
    data
}

/// World transform of a car body from its placement on the route. Local
/// +Z points along travel.
pub fn car_transform(placement: &CarPlacement) -> Transform {
    Transform::from_translation(placement.position + Vec3::Y * CAR_RIDE_HEIGHT)
        .looking_to(-placement.forward, Vec3::Y)
}

fn livery_color(livery: &Livery) -> Color {
    let [r, g, b] = livery.color;
    Color::linear_rgb(r, g, b)
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Spawn every car of every train whenever the layout is (re)installed.
#[allow(clippy::too_many_arguments)]
pub fn spawn_train_cars(
    mut commands: Commands,
    layout: Res<NetworkLayout>,
    fleet: Res<TrainFleet>,
    existing: Query<Entity, With<TrainCar>>,
    asset_server: Res<AssetServer>,
    mut textures: ResMut<LiveryTextures>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !layout.is_changed() {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    textures.users.clear();

    let face_meshes: Vec<(CarFace, Handle<Mesh>)> = CarFace::ALL
        .iter()
        .map(|&face| (face, meshes.add(car_face_mesh(face).into_mesh())))
        .collect();

    for (train_index, train) in fleet.trains.iter().enumerate() {
        let livery = layout.liveries.get(train_index).cloned().unwrap_or_default();
        let color = livery_color(&livery);
        let mut face_materials: HashMap<Option<String>, Handle<StandardMaterial>> = HashMap::new();

        for car_index in 0..train.car_count() {
            let faces = livery.faces_for(car_index, train.car_count());
            let parent = commands
                .spawn((
                    TrainCar {
                        train: train_index,
                        car: car_index,
                    },
                    Transform::default(),
                    Visibility::Hidden,
                    Name::new(format!("{} car {}", train.label, car_index + 1)),
                ))
                .id();

            for (face, mesh) in &face_meshes {
                let path = faces.texture(*face).map(str::to_string);
                let material = face_materials
                    .entry(path.clone())
                    .or_insert_with(|| match &path {
                        Some(path) => {
                            let image = textures
                                .handles
                                .entry(path.clone())
                                .or_insert_with(|| asset_server.load(path.clone()))
                                .clone();
                            let material = materials.add(StandardMaterial {
                                base_color_texture: Some(image),
                                ..default()
                            });
                            textures
                                .users
                                .entry(path.clone())
                                .or_default()
                                .push((material.clone(), color));
                            material
                        }
                        None => materials.add(StandardMaterial {
                            base_color: color,
                            ..default()
                        }),
                    })
                    .clone();
                commands.entity(parent).with_child((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::IDENTITY,
                ));
            }
        }
    }
    debug!("Spawned cars for {} trains", fleet.trains.len());
}

/// Swap failed livery textures for the livery colour and remember them.
pub fn handle_texture_failures(
    mut events: EventReader<AssetLoadFailedEvent<Image>>,
    textures: Res<LiveryTextures>,
    mut failures: ResMut<TextureFailures>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in events.read() {
        let Some(path) = textures.path_of(event.id) else {
            continue;
        };
        if failures.record(path, event.error.to_string()) {
            error!("Failed to load livery texture {}: {}", path, event.error);
        }
        for (handle, color) in textures.users.get(path).into_iter().flatten() {
            if let Some(material) = materials.get_mut(handle) {
                material.base_color_texture = None;
                material.base_color = *color;
            }
        }
    }
}

pub fn sync_train_cars(
    fleet: Res<TrainFleet>,
    mut cars: Query<(&TrainCar, &mut Transform, &mut Visibility)>,
) {
    for (car, mut transform, mut visibility) in &mut cars {
        let placement = fleet
            .trains
            .get(car.train)
            .and_then(|train| train.cars().get(car.car));
        match placement {
            Some(placement) if placement.visible => {
                *transform = car_transform(placement);
                *visibility = Visibility::Inherited;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_car_faces_point_outward() {
        for face in CarFace::ALL {
            let data = car_face_mesh(face);
            assert_eq!(data.vertex_count(), 4);
        }
        // The front face sits ahead of the body, along local +Z.
        let front = car_face_mesh(CarFace::Front).into_mesh();
        let positions = front
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|a| a.as_float3())
            .expect("positions");
        assert!(positions.iter().all(|p| (p[2] - TRAIN_WIDTH * 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_car_transform_faces_travel() {
        let placement = CarPlacement {
            position: Vec3::new(1.0, 7.0, 2.0),
            forward: Vec3::X,
            visible: true,
        };
        let transform = car_transform(&placement);
        assert!(transform.back().distance(Vec3::X) < 1e-5);
        assert!((transform.translation.y - (7.0 + CAR_RIDE_HEIGHT)).abs() < 1e-6);
        // The `Right` face (local +X) ends up on the left of travel.
        let right_face = transform.rotation * Vec3::X;
        assert!(right_face.distance(Vec3::NEG_Z) < 1e-5, "{right_face}");
    }

    #[test]
    fn test_texture_failures_recorded_once() {
        let mut failures = TextureFailures::default();
        assert!(failures.record("textures/tyuou_1.png", "missing".into()));
        assert!(!failures.record("textures/tyuou_1.png", "missing".into()));
        assert!(failures.record("textures/soubu.png", "bad png".into()));
        assert_eq!(failures.failures().len(), 2);
    }
}
