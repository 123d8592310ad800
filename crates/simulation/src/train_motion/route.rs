use crate::config::{ADD_SPEED, DOOR_INTERVAL, MAX_SPEED, TRAIN_SAMPLE_INTERVAL};
use crate::curve::{ControlPath, SampleTable};
use crate::error::BuildError;
use crate::platform_doors::DoorGroupId;

/// Distance covered while shedding `max_speed` in `add_speed` steps, one
/// step per tick, until the speed goes negative.
pub fn brake_distance(max_speed: f64, add_speed: f64) -> f64 {
    if add_speed <= 0.0 || max_speed <= 0.0 {
        return 0.0;
    }
    let mut speed = max_speed;
    let mut distance = 0.0;
    while speed >= 0.0 {
        speed -= add_speed;
        distance += speed;
    }
    distance
}

/// A path a train can run on, with its stop and brake points.
#[derive(Debug, Clone)]
pub struct TrainRoute {
    pub label: String,
    pub table: SampleTable,
    /// Arc length of the path.
    pub length: f32,
    /// Where the head car stops, as a fraction of the path.
    pub stop_point: f64,
    pub brake_point: f64,
    /// One car length (plus gap) as a fraction of the path.
    pub car_spacing: f64,
    /// Platform doors served at the stop, if any.
    pub door_group: Option<DoorGroupId>,
    /// Index of the configured line this route was built from. Crossing
    /// permutations are written in these indices.
    pub line: usize,
}

impl TrainRoute {
    pub fn new(
        label: impl Into<String>,
        path: &ControlPath,
        stop_point: f64,
        door_group: Option<DoorGroupId>,
    ) -> Result<Self, BuildError> {
        if !(0.0..1.0).contains(&stop_point) {
            return Err(BuildError::InvalidParameter {
                name: "stop point",
                value: stop_point as f32,
            });
        }
        let table = SampleTable::sample(path, TRAIN_SAMPLE_INTERVAL)?;
        let length = path.length();
        Ok(Self {
            label: label.into(),
            table,
            length,
            stop_point,
            brake_point: stop_point - brake_distance(MAX_SPEED, ADD_SPEED),
            car_spacing: (DOOR_INTERVAL / length) as f64,
            door_group,
            line: 0,
        })
    }

    pub fn on_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// `t` at which a consist of `cars` has fully left the route.
    pub fn lap_end(&self, cars: usize) -> f64 {
        1.0 + self.car_spacing * (cars + 1) as f64
    }
}
