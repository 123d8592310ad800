//! Stop every animator when the app shuts down.

use bevy::prelude::*;

use crate::elevator::Elevators;
use crate::platform_doors::PlatformDoors;

/// Cancel all door groups and elevator sequencers once an `AppExit` is
/// seen. Cancelled animators ignore further ticks.
pub fn cancel_animators_on_exit(
    mut exits: EventReader<AppExit>,
    mut doors: ResMut<PlatformDoors>,
    mut elevators: ResMut<Elevators>,
) {
    if exits.read().next().is_none() {
        return;
    }
    doors.cancel_all();
    elevators.cancel_all();
    info!(
        "Cancelled {} door groups and {} elevators",
        doors.groups.len(),
        elevators.shafts.len()
    );
}

pub struct TeardownPlugin;

impl Plugin for TeardownPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Last, cancel_animators_on_exit);
    }
}
