//! Fixed-step door animation.

use bevy::prelude::*;

use crate::simulation_sets::SimulationSet;

use super::state::PlatformDoors;
use super::types::DoorEvent;

/// Advance every in-flight door transition by one fixed step.
pub fn advance_door_groups(time: Res<Time>, mut doors: ResMut<PlatformDoors>) {
    let dt = time.delta_secs();
    for (id, group) in doors.groups.iter_mut().enumerate() {
        match group.advance(dt) {
            Some(DoorEvent::FullyOpened) => debug!("Door group {} fully open", id),
            Some(DoorEvent::FullyClosed) => debug!("Door group {} fully closed", id),
            None => {}
        }
    }
}

pub struct PlatformDoorsPlugin;

impl Plugin for PlatformDoorsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlatformDoors>().add_systems(
            FixedUpdate,
            advance_door_groups.in_set(SimulationSet::Doors),
        );
    }
}
