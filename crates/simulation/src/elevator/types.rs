use serde::{Deserialize, Serialize};

/// The two landings a shaft serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Floor {
    Lower,
    Upper,
}

impl Floor {
    pub fn other(self) -> Self {
        match self {
            Floor::Lower => Floor::Upper,
            Floor::Upper => Floor::Lower,
        }
    }
}

/// One entry of the shaft's repeating script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorStage {
    /// Open the landing and car doors, hold, close them again.
    Serve(Floor),
    Wait,
    Travel { to: Floor },
}

/// The script every shaft loops through.
pub const ELEVATOR_SCRIPT: [ElevatorStage; 8] = [
    ElevatorStage::Serve(Floor::Lower),
    ElevatorStage::Wait,
    ElevatorStage::Travel { to: Floor::Upper },
    ElevatorStage::Wait,
    ElevatorStage::Serve(Floor::Upper),
    ElevatorStage::Wait,
    ElevatorStage::Travel { to: Floor::Lower },
    ElevatorStage::Wait,
];

/// Sub-phase of a `Serve` stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoorCycle {
    Opening,
    Holding { remaining: f32 },
    Closing,
}

/// Where a shaft is in its script right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElevatorPhase {
    Doors {
        floor: Floor,
        cycle: DoorCycle,
        /// Seconds until the car doors follow the landing doors.
        inner_delay: f32,
        inner_started: bool,
    },
    Waiting {
        remaining: f32,
    },
    Travelling {
        to: Floor,
        step: u32,
        /// Time spent in the current step, in milliseconds.
        elapsed_ms: f32,
    },
}

/// Reported by `ElevatorShaft::advance` when a stage finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorEvent {
    DoorsOpen(Floor),
    DoorsClosed(Floor),
    Arrived(Floor),
}

/// Layout of one shaft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaftParams {
    /// Shift along X from the reference shaft position.
    pub x_shift: f32,
    /// Start parked on the upper floor.
    pub starts_upper: bool,
}

impl Default for ShaftParams {
    fn default() -> Self {
        Self {
            x_shift: 0.0,
            starts_upper: false,
        }
    }
}

/// The elevator block: where the lower landing is and which shafts exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorParams {
    /// Centre height of the lower landing doors.
    pub floor_y: f32,
    /// Z of the shaft's front glass wall.
    pub z: f32,
    pub shafts: Vec<ShaftParams>,
}

impl Default for ElevatorParams {
    fn default() -> Self {
        Self {
            floor_y: 7.1,
            z: 36.0,
            shafts: vec![
                ShaftParams::default(),
                ShaftParams {
                    x_shift: -6.0,
                    starts_upper: true,
                },
            ],
        }
    }
}
