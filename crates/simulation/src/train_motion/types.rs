use bevy::math::Vec3;

pub type TrainId = u32;

/// Where a train is in its lap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainPhase {
    /// Waiting at the start of the route before the next lap.
    Layover { ticks: u32 },
    Cruising,
    Braking,
    Stopped { step: DwellStep },
    Accelerating,
    /// Held at the lap boundary until a crossing releases it.
    Parked,
}

impl TrainPhase {
    pub fn is_moving(&self) -> bool {
        matches!(
            self,
            TrainPhase::Cruising | TrainPhase::Braking | TrainPhase::Accelerating
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrainPhase::Layover { .. } => "layover",
            TrainPhase::Cruising => "cruising",
            TrainPhase::Braking => "braking",
            TrainPhase::Stopped { step } => step.label(),
            TrainPhase::Accelerating => "accelerating",
            TrainPhase::Parked => "parked",
        }
    }
}

/// The station dwell, in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DwellStep {
    BeforeOpen { remaining: f32 },
    /// Waiting for the platform doors to report fully open.
    Opening,
    Open { remaining: f32 },
    /// Waiting for the platform doors to report fully closed.
    Closing,
    AfterClose { remaining: f32 },
}

impl DwellStep {
    pub fn label(&self) -> &'static str {
        match self {
            DwellStep::BeforeOpen { .. } => "arrived",
            DwellStep::Opening => "doors opening",
            DwellStep::Open { .. } => "doors open",
            DwellStep::Closing => "doors closing",
            DwellStep::AfterClose { .. } => "ready to depart",
        }
    }
}

/// World placement of one car.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarPlacement {
    pub position: Vec3,
    /// Unit direction of travel.
    pub forward: Vec3,
    /// False while the car is off either end of the route.
    pub visible: bool,
}

impl Default for CarPlacement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
            visible: false,
        }
    }
}

/// Things worth logging that happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainEvent {
    Stopped,
    DoorsRequested,
    DoorsReleased,
    Departed,
    LapCompleted,
    Parked,
}
