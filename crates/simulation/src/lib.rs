use bevy::prelude::*;

pub mod config;
pub mod crossing;
pub mod curve;
pub mod editor;
pub mod elevator;
pub mod error;
pub mod escalator;
pub mod livery;
pub mod network;
pub mod network_config;
pub mod offset;
pub mod platform_doors;
pub mod sim_rng;
pub mod simulation_sets;
pub mod structures;
pub mod teardown;
pub mod train_motion;

#[cfg(test)]
pub mod test_harness;

use crossing::CrossingPlugin;
use editor::EditorPlugin;
use elevator::ElevatorPlugin;
use escalator::EscalatorPlugin;
use network_config::NetworkConfig;
use platform_doors::PlatformDoorsPlugin;
use simulation_sets::{SimulationSet, SimulationUpdateSet};
use teardown::TeardownPlugin;
use train_motion::TrainMotionPlugin;

// ---------------------------------------------------------------------------
// SimulationPlugin
// ---------------------------------------------------------------------------

/// Headless core of the diorama: builds the configured network at startup
/// and animates it on a 60 Hz fixed clock.
///
/// Insert a [`NetworkConfig`] before adding the plugin to replace the
/// built-in layout.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(config::FIXED_HZ))
            .init_resource::<NetworkConfig>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Crossing,
                    SimulationSet::Trains,
                    SimulationSet::Doors,
                    SimulationSet::Elevators,
                    SimulationSet::Escalators,
                )
                    .chain(),
            )
            .configure_sets(
                Update,
                (SimulationUpdateSet::Input, SimulationUpdateSet::Visual).chain(),
            )
            .add_systems(Startup, network::spawn_network);

        app.add_plugins((
            CrossingPlugin,
            TrainMotionPlugin,
            PlatformDoorsPlugin,
            ElevatorPlugin,
            EscalatorPlugin,
            EditorPlugin,
            TeardownPlugin,
        ));
    }
}
