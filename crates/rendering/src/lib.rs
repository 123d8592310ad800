use bevy::prelude::*;

use simulation::simulation_sets::SimulationUpdateSet;

pub mod camera;
pub mod editor_view;
pub mod fixtures;
pub mod meshes;
pub mod scenery;
pub mod screenshot;
pub mod trains;

pub use screenshot::ScreenshotPresetPlugin;

use camera::FlyCamera;
use trains::{LiveryTextures, TextureFailures};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlyCamera>()
            .init_resource::<LiveryTextures>()
            .init_resource::<TextureFailures>()
            .add_systems(Startup, (camera::setup_camera, scenery::setup_lighting))
            .add_systems(
                Update,
                (
                    camera::fly_camera_keyboard,
                    camera::apply_fly_camera,
                    editor_view::pick_editor_point,
                )
                    .chain()
                    .in_set(SimulationUpdateSet::Input),
            )
            .add_systems(
                Update,
                (
                    (
                        scenery::spawn_scenery,
                        trains::spawn_train_cars,
                        fixtures::spawn_fixtures,
                    ),
                    trains::handle_texture_failures,
                    (
                        trains::sync_train_cars,
                        fixtures::sync_door_leaves,
                        fixtures::sync_elevators,
                        fixtures::sync_escalators,
                    ),
                )
                    .chain()
                    .in_set(SimulationUpdateSet::Visual),
            )
            .add_systems(
                Update,
                editor_view::draw_editor_preview.in_set(SimulationUpdateSet::Visual),
            );
    }
}
