use bevy::prelude::*;

use crate::crossing::CrossingBarrier;
use crate::platform_doors::PlatformDoors;
use crate::sim_rng::SimRng;
use crate::simulation_sets::SimulationSet;

use super::state::{TickContext, TrainFleet};
use super::types::TrainEvent;

/// One kinematic tick for every train.
pub fn advance_trains(
    time: Res<Time>,
    mut fleet: ResMut<TrainFleet>,
    mut doors: ResMut<PlatformDoors>,
    mut barrier: ResMut<CrossingBarrier>,
    mut rng: ResMut<SimRng>,
) {
    let fleet = &mut *fleet;
    let mut ctx = TickContext {
        doors: &mut doors,
        barrier: &mut barrier,
        rng: &mut rng.0,
        ambient: fleet.ambient,
        dt: time.delta_secs(),
    };

    for train in &mut fleet.trains {
        let Some(route) = fleet.routes.get(train.route) else {
            continue;
        };
        match train.tick(route, &mut ctx) {
            Some(TrainEvent::Stopped) => {
                debug!("{} stopped at {:.4} on {}", train.label, train.t(), route.label)
            }
            Some(TrainEvent::Parked) => info!("{} parked for crossing", train.label),
            Some(event) => debug!("{}: {:?}", train.label, event),
            None => {}
        }
    }
}

pub struct TrainMotionPlugin;

impl Plugin for TrainMotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrainFleet>()
            .init_resource::<SimRng>()
            .add_systems(FixedUpdate, advance_trains.in_set(SimulationSet::Trains));
    }
}
