//! Per-shaft sequencer and the `Elevators` resource.

use bevy::prelude::*;

use crate::config::{
    ELEVATOR_DOOR_SECS, ELEVATOR_EASE_FAST_MS, ELEVATOR_EASE_SLOW_MS, ELEVATOR_EASE_STAGES,
    ELEVATOR_FLOOR_HEIGHT, ELEVATOR_HOLD_SECS, ELEVATOR_INNER_LAG, ELEVATOR_TRAVEL_STEPS,
    ELEVATOR_WAIT_SECS,
};
use crate::error::DoorError;
use crate::platform_doors::{DoorState, DoorToken};

use super::assembly::ElevatorAssembly;
use super::types::*;

/// Duration of travel step `i` out of `range`, in milliseconds.
///
/// The first and last 15% of the steps ramp between the slow and fast
/// durations in `stages` discrete levels; everything between runs at the
/// fast duration.
pub fn step_duration_ms(i: u32, range: u32, stages: u32) -> f32 {
    let slow_range = range as f32 * 0.15;
    let stage_size = slow_range / stages as f32;
    let per_stage = (ELEVATOR_EASE_SLOW_MS - ELEVATOR_EASE_FAST_MS) / (stages.max(2) - 1) as f32;
    let i = i as f32;

    if i < slow_range {
        let stage = (i / stage_size).floor();
        ELEVATOR_EASE_SLOW_MS - per_stage * stage
    } else if i >= range as f32 - slow_range {
        let stage = ((i - (range as f32 - slow_range)) / stage_size).floor();
        ELEVATOR_EASE_FAST_MS + per_stage * stage
    } else {
        ELEVATOR_EASE_FAST_MS
    }
}

/// Tokens for the three door groups a shaft owns.
#[derive(Debug)]
struct ShaftTokens {
    lower: DoorToken,
    upper: DoorToken,
    car: DoorToken,
}

/// One shaft running its script.
#[derive(Debug)]
pub struct ElevatorShaft {
    label: String,
    assembly: ElevatorAssembly,
    tokens: ShaftTokens,
    stage: usize,
    phase: ElevatorPhase,
    car_y: f32,
    cancelled: bool,
}

impl ElevatorShaft {
    /// Claim the shaft's door groups under `owner` and park the car.
    pub fn new(
        label: impl Into<String>,
        mut assembly: ElevatorAssembly,
        owner: u32,
        starts_upper: bool,
    ) -> Result<Self, DoorError> {
        let tokens = ShaftTokens {
            lower: assembly.lower.claim(owner)?,
            upper: assembly.upper.claim(owner)?,
            car: assembly.car.claim(owner)?,
        };
        let stage = if starts_upper { 4 } else { 0 };
        let mut shaft = Self {
            label: label.into(),
            assembly,
            tokens,
            stage,
            phase: ElevatorPhase::Waiting { remaining: 0.0 },
            car_y: if starts_upper { ELEVATOR_FLOOR_HEIGHT } else { 0.0 },
            cancelled: false,
        };
        shaft.enter_stage();
        Ok(shaft)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn assembly(&self) -> &ElevatorAssembly {
        &self.assembly
    }

    pub fn phase(&self) -> ElevatorPhase {
        self.phase
    }

    pub fn stage(&self) -> ElevatorStage {
        ELEVATOR_SCRIPT[self.stage]
    }

    /// Height of the car above the lower landing.
    pub fn car_offset(&self) -> f32 {
        self.car_y
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Which landing the car is at, if it is not between floors.
    pub fn floor(&self) -> Option<Floor> {
        if self.car_y <= 0.0 {
            Some(Floor::Lower)
        } else if self.car_y >= ELEVATOR_FLOOR_HEIGHT {
            Some(Floor::Upper)
        } else {
            None
        }
    }

    /// Offsets for every door leaf, to be added to the assembly frame:
    /// lower landing, upper landing, then the car doors riding with the car.
    pub fn leaf_offsets(&self) -> Vec<Vec3> {
        let lift = Vec3::Y * self.car_y;
        self.assembly
            .lower
            .leaf_positions()
            .into_iter()
            .chain(self.assembly.upper.leaf_positions())
            .chain(self.assembly.car.leaf_positions().into_iter().map(|p| p + lift))
            .collect()
    }

    /// Stop the script. Doors freeze where they are.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.assembly.lower.cancel();
        self.assembly.upper.cancel();
        self.assembly.car.cancel();
    }

    /// Run the script forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> Option<ElevatorEvent> {
        if self.cancelled {
            return None;
        }
        match self.phase {
            ElevatorPhase::Waiting { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.next_stage();
                } else {
                    self.phase = ElevatorPhase::Waiting { remaining };
                }
                None
            }
            ElevatorPhase::Travelling {
                to,
                mut step,
                mut elapsed_ms,
            } => {
                let step_height = ELEVATOR_FLOOR_HEIGHT / ELEVATOR_TRAVEL_STEPS as f32;
                let direction = if to == Floor::Upper { 1.0 } else { -1.0 };
                elapsed_ms += dt * 1000.0;
                while step < ELEVATOR_TRAVEL_STEPS {
                    let needed =
                        step_duration_ms(step, ELEVATOR_TRAVEL_STEPS, ELEVATOR_EASE_STAGES);
                    if elapsed_ms < needed {
                        break;
                    }
                    elapsed_ms -= needed;
                    step += 1;
                    self.car_y += direction * step_height;
                }
                if step >= ELEVATOR_TRAVEL_STEPS {
                    // Snap out accumulated rounding.
                    self.car_y = match to {
                        Floor::Lower => 0.0,
                        Floor::Upper => ELEVATOR_FLOOR_HEIGHT,
                    };
                    self.next_stage();
                    Some(ElevatorEvent::Arrived(to))
                } else {
                    self.phase = ElevatorPhase::Travelling {
                        to,
                        step,
                        elapsed_ms,
                    };
                    None
                }
            }
            ElevatorPhase::Doors {
                floor,
                cycle,
                inner_delay,
                inner_started,
            } => self.advance_doors(dt, floor, cycle, inner_delay, inner_started),
        }
    }

    fn advance_doors(
        &mut self,
        dt: f32,
        floor: Floor,
        cycle: DoorCycle,
        inner_delay: f32,
        mut inner_started: bool,
    ) -> Option<ElevatorEvent> {
        if let DoorCycle::Holding { remaining } = cycle {
            let remaining = remaining - dt;
            if remaining > 0.0 {
                self.phase = ElevatorPhase::Doors {
                    floor,
                    cycle: DoorCycle::Holding { remaining },
                    inner_delay,
                    inner_started,
                };
                return None;
            }
            let result = match floor {
                Floor::Lower => self.assembly.lower.close(&self.tokens.lower),
                Floor::Upper => self.assembly.upper.close(&self.tokens.upper),
            };
            self.report(result);
            self.phase = ElevatorPhase::Doors {
                floor,
                cycle: DoorCycle::Closing,
                inner_delay: ELEVATOR_DOOR_SECS * ELEVATOR_INNER_LAG,
                inner_started: false,
            };
            return None;
        }

        let inner_delay = inner_delay - dt;
        if !inner_started && inner_delay <= 0.0 {
            let result = match cycle {
                DoorCycle::Opening => self.assembly.car.open(&self.tokens.car),
                _ => self.assembly.car.close(&self.tokens.car),
            };
            self.report(result);
            inner_started = true;
        }

        let outer = match floor {
            Floor::Lower => &mut self.assembly.lower,
            Floor::Upper => &mut self.assembly.upper,
        };
        outer.advance(dt);
        let outer_state = outer.state();
        self.assembly.car.advance(dt);
        let car_state = self.assembly.car.state();

        let target = match cycle {
            DoorCycle::Opening => DoorState::Open,
            _ => DoorState::Closed,
        };
        if inner_started && outer_state == target && car_state == target {
            return match cycle {
                DoorCycle::Opening => {
                    self.phase = ElevatorPhase::Doors {
                        floor,
                        cycle: DoorCycle::Holding {
                            remaining: ELEVATOR_HOLD_SECS,
                        },
                        inner_delay: 0.0,
                        inner_started: true,
                    };
                    Some(ElevatorEvent::DoorsOpen(floor))
                }
                _ => {
                    self.next_stage();
                    Some(ElevatorEvent::DoorsClosed(floor))
                }
            };
        }

        self.phase = ElevatorPhase::Doors {
            floor,
            cycle,
            inner_delay,
            inner_started,
        };
        None
    }

    fn next_stage(&mut self) {
        self.stage = (self.stage + 1) % ELEVATOR_SCRIPT.len();
        self.enter_stage();
    }

    fn enter_stage(&mut self) {
        self.phase = match ELEVATOR_SCRIPT[self.stage] {
            ElevatorStage::Serve(floor) => {
                let result = match floor {
                    Floor::Lower => self.assembly.lower.open(&self.tokens.lower),
                    Floor::Upper => self.assembly.upper.open(&self.tokens.upper),
                };
                self.report(result);
                ElevatorPhase::Doors {
                    floor,
                    cycle: DoorCycle::Opening,
                    inner_delay: ELEVATOR_DOOR_SECS * ELEVATOR_INNER_LAG,
                    inner_started: false,
                }
            }
            ElevatorStage::Wait => ElevatorPhase::Waiting {
                remaining: ELEVATOR_WAIT_SECS,
            },
            ElevatorStage::Travel { to } => ElevatorPhase::Travelling {
                to,
                step: 0,
                elapsed_ms: 0.0,
            },
        };
    }

    fn report(&self, result: Result<(), DoorError>) {
        if let Err(e) = result {
            warn!("Elevator {}: {}", self.label, e);
        }
    }
}

/// Every elevator shaft in the network.
#[derive(Resource, Debug, Default)]
pub struct Elevators {
    pub shafts: Vec<ElevatorShaft>,
}

impl Elevators {
    pub fn cancel_all(&mut self) {
        for shaft in &mut self.shafts {
            shaft.cancel();
        }
    }
}

