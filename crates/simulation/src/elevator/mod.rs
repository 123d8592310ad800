//! Two-floor glass elevators.
//!
//! Each shaft runs a fixed script forever: serve the floor it is on (outer
//! landing doors open, car doors follow a little later, hold, close),
//! wait, travel to the other floor with a slow-in / constant / slow-out
//! step profile, wait, and repeat from the other side. The landing and car
//! doors are ordinary [`crate::platform_doors::DoorGroup`]s claimed by the
//! shaft for its whole lifetime.

mod assembly;
mod state;
mod systems;
mod types;

#[cfg(test)]
mod tests;

pub use assembly::{build_elevator, ElevatorAssembly};
pub use state::{step_duration_ms, ElevatorShaft, Elevators};
pub use systems::{advance_elevators, ElevatorPlugin};
pub use types::*;
