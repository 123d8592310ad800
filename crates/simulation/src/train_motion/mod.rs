//! Train kinematics and the station dwell.
//!
//! Each train owns one normalized position `t` along its route and a speed
//! in route fractions per fixed tick. It cruises at the maximum speed,
//! starts shedding speed once it passes the route's brake point, stops,
//! runs the dwell timeline against the route's platform doors, then
//! accelerates away from a standstill. When the last car has left the
//! route the train wraps back to `t = 0`, optionally after a random
//! layover, or parks if a crossing is being drained.

mod route;
mod state;
mod systems;
mod types;


pub use route::{brake_distance, TrainRoute};
pub use state::{TickContext, Train, TrainFleet};
pub use systems::{advance_trains, TrainMotionPlugin};
pub use types::*;
