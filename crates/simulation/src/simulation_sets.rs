//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! Every system in `FixedUpdate` belongs to one of these sets. The sets
//! run as a chain so that within a single fixed tick:
//!
//! ```text
//! Crossing  →  Trains  →  Doors  →  Elevators  →  Escalators
//! ```
//!
//! * **Crossing** – The quadruple-crossing barrier decides whether trains
//!   are released this tick.
//! * **Trains** – Kinematics, car placement and door requests. Door open
//!   and close requests issued here are picked up by `Doors` in the same
//!   tick.
//! * **Doors** – Platform door groups advance and report completion.
//! * **Elevators** – The elevator sequencers, which own their own door
//!   groups and never touch platform doors.
//! * **Escalators** – Step belts.
//!
//! Visual sync in `Update` reads the state after all of these have run.

use bevy::prelude::*;

// ---------------------------------------------------------------------------
// FixedUpdate phases
// ---------------------------------------------------------------------------

/// Ordered phases for systems running in the `FixedUpdate` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Crossing,
    Trains,
    Doors,
    Elevators,
    Escalators,
}

// ---------------------------------------------------------------------------
// Update phases
// ---------------------------------------------------------------------------

/// Ordered phases for systems running in the `Update` schedule.
///
/// Configured as a chain: `Input` → `Visual`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationUpdateSet {
    /// Camera, editor clicks and UI actions.
    Input,
    /// Transform sync from simulation state.
    Visual,
}
