use bevy::prelude::*;

use crate::simulation_sets::SimulationSet;

use super::state::Elevators;
use super::types::ElevatorEvent;

pub fn advance_elevators(time: Res<Time>, mut elevators: ResMut<Elevators>) {
    let dt = time.delta_secs();
    for shaft in &mut elevators.shafts {
        match shaft.advance(dt) {
            Some(ElevatorEvent::Arrived(floor)) => {
                debug!("Elevator {} arrived at {:?}", shaft.label(), floor)
            }
            Some(ElevatorEvent::DoorsOpen(floor)) => {
                debug!("Elevator {} doors open at {:?}", shaft.label(), floor)
            }
            Some(ElevatorEvent::DoorsClosed(floor)) => {
                debug!("Elevator {} doors closed at {:?}", shaft.label(), floor)
            }
            None => {}
        }
    }
}

pub struct ElevatorPlugin;

impl Plugin for ElevatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Elevators>().add_systems(
            FixedUpdate,
            advance_elevators.in_set(SimulationSet::Elevators),
        );
    }
}
