//! Per-train state and the `TrainFleet` resource.

use bevy::prelude::*;
use rand::Rng;

use crate::config::{
    ADD_SPEED, DWELL_AFTER_CLOSE_SECS, DWELL_BEFORE_OPEN_SECS, DWELL_OPEN_SECS,
    LAYOVER_TICKS_MAX, LAYOVER_TICKS_MIN, MAX_SPEED,
};
use crate::crossing::CrossingBarrier;
use crate::platform_doors::{DoorState, DoorToken, PlatformDoors};

use super::route::TrainRoute;
use super::types::*;

/// Shared state a train touches during one tick.
pub struct TickContext<'a, R: Rng> {
    pub doors: &'a mut PlatformDoors,
    pub barrier: &'a mut CrossingBarrier,
    pub rng: &'a mut R,
    /// Wait a random layover at every lap boundary.
    pub ambient: bool,
    /// Seconds per tick, for the dwell timers.
    pub dt: f32,
}

/// One consist.
#[derive(Debug)]
pub struct Train {
    pub id: TrainId,
    pub label: String,
    /// Index into [`TrainFleet::routes`].
    pub route: usize,
    cars: Vec<CarPlacement>,
    t: f64,
    speed: f64,
    phase: TrainPhase,
    /// Set once the train has stopped this lap, so it does not brake again
    /// after leaving the platform.
    has_stopped: bool,
    door_token: Option<DoorToken>,
}

impl Train {
    pub fn new(id: TrainId, label: impl Into<String>, route: usize, cars: usize) -> Self {
        Self {
            id,
            label: label.into(),
            route,
            cars: vec![CarPlacement::default(); cars],
            t: 0.0,
            speed: MAX_SPEED,
            phase: TrainPhase::Cruising,
            has_stopped: false,
            door_token: None,
        }
    }

    /// Start the first lap after a random layover instead of immediately.
    pub fn with_layover(mut self, rng: &mut impl Rng) -> Self {
        self.hold_for_layover(rng);
        self
    }

    /// Hold the train at the start of its route for a random layover.
    pub fn hold_for_layover(&mut self, rng: &mut impl Rng) {
        self.t = 0.0;
        self.speed = MAX_SPEED;
        self.phase = random_layover(rng);
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn phase(&self) -> TrainPhase {
        self.phase
    }

    pub fn cars(&self) -> &[CarPlacement] {
        &self.cars
    }

    pub fn car_count(&self) -> usize {
        self.cars.len()
    }

    pub fn has_stopped(&self) -> bool {
        self.has_stopped
    }

    pub fn holds_doors(&self) -> bool {
        self.door_token.is_some()
    }

    /// Put a parked train on `route` and start it from the beginning.
    pub fn release_onto(&mut self, route: usize, table: &TrainRoute) {
        self.route = route;
        self.t = 0.0;
        self.speed = MAX_SPEED;
        self.has_stopped = false;
        self.phase = TrainPhase::Cruising;
        self.place_cars(table);
    }

    /// Advance one fixed tick.
    pub fn tick<R: Rng>(
        &mut self,
        route: &TrainRoute,
        ctx: &mut TickContext<'_, R>,
    ) -> Option<TrainEvent> {
        let event = if self.t >= route.lap_end(self.cars.len()) {
            Some(self.finish_lap(ctx))
        } else {
            match self.phase {
                TrainPhase::Parked => None,
                TrainPhase::Layover { ticks } => {
                    if ctx.barrier.is_draining() {
                        ctx.barrier.arrive();
                        self.phase = TrainPhase::Parked;
                        Some(TrainEvent::Parked)
                    } else if ticks == 0 {
                        self.phase = TrainPhase::Cruising;
                        Some(TrainEvent::Departed)
                    } else {
                        self.phase = TrainPhase::Layover { ticks: ticks - 1 };
                        None
                    }
                }
                TrainPhase::Stopped { step } => self.dwell(step, route, ctx),
                TrainPhase::Cruising | TrainPhase::Braking | TrainPhase::Accelerating => {
                    self.run(route)
                }
            }
        };
        self.place_cars(route);
        event
    }

    fn finish_lap<R: Rng>(&mut self, ctx: &mut TickContext<'_, R>) -> TrainEvent {
        self.t = 0.0;
        self.speed = MAX_SPEED;
        self.has_stopped = false;
        if ctx.barrier.is_draining() {
            ctx.barrier.arrive();
            self.phase = TrainPhase::Parked;
            TrainEvent::Parked
        } else {
            self.phase = if ctx.ambient {
                random_layover(&mut *ctx.rng)
            } else {
                TrainPhase::Cruising
            };
            TrainEvent::LapCompleted
        }
    }

    fn run(&mut self, route: &TrainRoute) -> Option<TrainEvent> {
        let braking = !self.has_stopped && self.t > route.brake_point;
        if braking {
            self.speed -= ADD_SPEED;
        } else {
            self.speed = (self.speed + ADD_SPEED).min(MAX_SPEED);
        }

        if self.speed < 0.0 {
            self.speed = 0.0;
            self.has_stopped = true;
            self.phase = TrainPhase::Stopped {
                step: DwellStep::BeforeOpen {
                    remaining: DWELL_BEFORE_OPEN_SECS,
                },
            };
            return Some(TrainEvent::Stopped);
        }

        self.t += self.speed;
        self.phase = if braking {
            TrainPhase::Braking
        } else if self.speed < MAX_SPEED {
            TrainPhase::Accelerating
        } else {
            TrainPhase::Cruising
        };
        None
    }

    fn dwell<R: Rng>(
        &mut self,
        step: DwellStep,
        route: &TrainRoute,
        ctx: &mut TickContext<'_, R>,
    ) -> Option<TrainEvent> {
        let dt = ctx.dt;
        let group = route.door_group.and_then(|id| ctx.doors.get_mut(id));

        let (next, event) = match step {
            DwellStep::BeforeOpen { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    (DwellStep::BeforeOpen { remaining }, None)
                } else if let Some(group) = group {
                    match group.claim(self.id) {
                        Ok(token) => match group.open(&token) {
                            Ok(()) => {
                                self.door_token = Some(token);
                                (DwellStep::Opening, Some(TrainEvent::DoorsRequested))
                            }
                            Err(e) => {
                                warn!("{}: platform doors refused to open: {}", self.label, e);
                                if let Err(e) = group.release(token) {
                                    warn!("{}: {}", self.label, e);
                                }
                                (open_step(), None)
                            }
                        },
                        // Another train is still in the platform; try again next tick.
                        Err(_) => (DwellStep::BeforeOpen { remaining: 0.0 }, None),
                    }
                } else {
                    (open_step(), None)
                }
            }
            DwellStep::Opening => match group {
                Some(group) if group.state() != DoorState::Open => (DwellStep::Opening, None),
                _ => (open_step(), None),
            },
            DwellStep::Open { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    (DwellStep::Open { remaining }, None)
                } else {
                    match (group, self.door_token.as_ref()) {
                        (Some(group), Some(token)) => {
                            if let Err(e) = group.close(token) {
                                warn!("{}: platform doors refused to close: {}", self.label, e);
                            }
                            (DwellStep::Closing, None)
                        }
                        _ => (after_close_step(), None),
                    }
                }
            }
            DwellStep::Closing => match group {
                Some(group) if group.state() != DoorState::Closed => (DwellStep::Closing, None),
                Some(group) => {
                    if let Some(token) = self.door_token.take() {
                        if let Err(e) = group.release(token) {
                            warn!("{}: {}", self.label, e);
                        }
                    }
                    (after_close_step(), Some(TrainEvent::DoorsReleased))
                }
                None => (after_close_step(), None),
            },
            DwellStep::AfterClose { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    (DwellStep::AfterClose { remaining }, None)
                } else {
                    self.phase = TrainPhase::Accelerating;
                    return Some(TrainEvent::Departed);
                }
            }
        };

        self.phase = TrainPhase::Stopped { step: next };
        event
    }

    /// Place every car at `t` minus its offset behind the head car. Cars off
    /// either end of the route keep their last position and are hidden.
    fn place_cars(&mut self, route: &TrainRoute) {
        for (i, car) in self.cars.iter_mut().enumerate() {
            let offset = self.t - route.car_spacing * i as f64;
            let on_route = (0.0..=1.0).contains(&offset);
            match route.table.tangent_at_ratio(offset as f32) {
                Some((position, forward)) if on_route => {
                    *car = CarPlacement {
                        position,
                        forward,
                        visible: true,
                    };
                }
                _ => car.visible = false,
            }
        }
    }
}

fn random_layover(rng: &mut impl Rng) -> TrainPhase {
    TrainPhase::Layover {
        ticks: rng.gen_range(LAYOVER_TICKS_MIN..=LAYOVER_TICKS_MAX),
    }
}

fn open_step() -> DwellStep {
    DwellStep::Open {
        remaining: DWELL_OPEN_SECS,
    }
}

fn after_close_step() -> DwellStep {
    DwellStep::AfterClose {
        remaining: DWELL_AFTER_CLOSE_SECS,
    }
}

/// Every route and every train.
#[derive(Resource, Debug)]
pub struct TrainFleet {
    pub routes: Vec<TrainRoute>,
    pub trains: Vec<Train>,
    pub ambient: bool,
}

impl Default for TrainFleet {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            trains: Vec::new(),
            ambient: true,
        }
    }
}

impl TrainFleet {
    /// Trains not parked at a crossing.
    pub fn running_count(&self) -> usize {
        self.trains
            .iter()
            .filter(|t| t.phase() != TrainPhase::Parked)
            .count()
    }

    /// Route built from configured line `line`, if it survived the build.
    pub fn route_on_line(&self, line: usize) -> Option<usize> {
        self.routes.iter().position(|r| r.line == line)
    }

    /// Start every parked train together. A train on line `l` moves to the
    /// route of line `permutation[l]`; a target line with no route passes
    /// on to its own target, so the surviving lines still swap one to one.
    /// A train whose line is outside the permutation keeps its route.
    pub fn release_parked(&mut self, permutation: &[usize]) {
        let targets: Vec<Option<usize>> = self
            .trains
            .iter()
            .map(|train| {
                let line = self.routes.get(train.route)?.line;
                let mut target = *permutation.get(line)?;
                for _ in 0..permutation.len() {
                    if let Some(route) = self.route_on_line(target) {
                        return Some(route);
                    }
                    target = *permutation.get(target)?;
                }
                None
            })
            .collect();

        let routes = &self.routes;
        for (train, target) in self.trains.iter_mut().zip(targets) {
            if train.phase() != TrainPhase::Parked {
                continue;
            }
            let target = target.unwrap_or(train.route);
            if let Some(route) = routes.get(target) {
                train.release_onto(target, route);
            }
        }
    }
}
