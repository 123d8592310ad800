//! # TestNetwork: headless harness for the rail diorama
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` so integration tests can run
//! the fixed-step animation without a window or renderer.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::config::FIXED_HZ;
use crate::crossing::CrossingBarrier;
use crate::elevator::Elevators;
use crate::escalator::Escalators;
use crate::network::NetworkLayout;
use crate::network_config::NetworkConfig;
use crate::platform_doors::PlatformDoors;
use crate::train_motion::{Train, TrainFleet};
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin`.
///
/// Every `update` advances the clock by exactly one fixed step, so one
/// call to `tick(1)` is one kinematic tick.
pub struct TestNetwork {
    app: App,
}

impl TestNetwork {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// The built-in four-line layout with ambient layovers switched off, so
    /// every train starts cruising from the start of its route.
    pub fn new() -> Self {
        Self::with_config(NetworkConfig {
            ambient: false,
            ..NetworkConfig::default()
        })
    }

    /// Build from an explicit config.
    pub fn with_config(config: NetworkConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / FIXED_HZ,
        )));
        // Inserted before the plugin so its default is skipped.
        app.insert_resource(config);
        app.add_plugins(SimulationPlugin);

        // Run one update so the network is built.
        app.update();

        Self { app }
    }

    // -----------------------------------------------------------------------
    // Simulation control
    // -----------------------------------------------------------------------

    /// Run `n` fixed ticks.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Tick until `done` holds, returning how many ticks it took, or `None`
    /// after `max` ticks.
    pub fn tick_until(&mut self, max: u32, mut done: impl FnMut(&World) -> bool) -> Option<u32> {
        for n in 1..=max {
            self.app.update();
            if done(self.app.world()) {
                return Some(n);
            }
        }
        None
    }

    pub fn send_event<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn resource_mut<T: Resource>(&mut self) -> Mut<'_, T> {
        self.app.world_mut().resource_mut::<T>()
    }

    pub fn fleet(&self) -> &TrainFleet {
        self.resource::<TrainFleet>()
    }

    pub fn train(&self, index: usize) -> &Train {
        &self.fleet().trains[index]
    }

    pub fn doors(&self) -> &PlatformDoors {
        self.resource::<PlatformDoors>()
    }

    pub fn barrier(&self) -> &CrossingBarrier {
        self.resource::<CrossingBarrier>()
    }

    pub fn elevators(&self) -> &Elevators {
        self.resource::<Elevators>()
    }

    pub fn escalators(&self) -> &Escalators {
        self.resource::<Escalators>()
    }

    pub fn layout(&self) -> &NetworkLayout {
        self.resource::<NetworkLayout>()
    }

    /// Arm the crossing for every train in the fleet, as the UI button does.
    pub fn arm_crossing(&mut self) -> bool {
        let trains = self.fleet().trains.len() as u32;
        self.resource_mut::<CrossingBarrier>().arm(trains)
    }
}

impl Default for TestNetwork {
    fn default() -> Self {
        Self::new()
    }
}
