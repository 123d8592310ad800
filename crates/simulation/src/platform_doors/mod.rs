//! Platform screen doors and the door groups they are animated as.
//!
//! A `DoorGroup` is the set of sliding leaves along one platform edge (or
//! one elevator landing). It moves through `Closed -> Opening -> Open ->
//! Closing -> Closed` and only the holder of its `DoorToken` may start a
//! transition, so two animators can never drive the same leaves at once.
//! Progress is time-based; `advance(dt)` reports the moment a group comes
//! to rest so callers can sequence dwell timers on it.

mod state;
mod systems;
mod types;

#[cfg(test)]
mod tests;

pub use state::{DoorGroup, PlatformDoors};
pub use systems::{advance_door_groups, PlatformDoorsPlugin};
pub use types::*;
