//! Runtime layout of the rail network.
//!
//! `NetworkConfig::default()` is the built-in layout: four lines through an
//! elevated station with two island platforms, an elevator block, three
//! escalators, the concourse roof deck and an arch bridge. A JSON file can
//! replace any part of it; missing fields keep their defaults.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PLATFORM_MARGIN;
use crate::crossing::DEFAULT_CROSSING_PERMUTATION;
use crate::elevator::ElevatorParams;
use crate::error::ConfigError;
use crate::escalator::{default_escalators, EscalatorParams};
use crate::livery::Livery;
use crate::sim_rng::LAYOUT_SEED;
use crate::structures::{
    ArchBridgeParams, CatenaryParams, ConcourseParams, GirderBridgeParams, PlatformSide,
};

/// Height of the station tracks.
const STATION_Y: f32 = 7.0;

/// A `(start, end)` pair of path fractions.
pub type SliceRange = [f32; 2];

/// One line: its control points, the station track cut from it and the
/// train that runs on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub label: String,
    pub control_points: Vec<[f32; 3]>,
    /// Linear RGB of the track line.
    pub color: [f32; 3],
    /// Part of the line alongside the platform.
    pub station_slice: SliceRange,
    /// Part of the line under the platform roof.
    pub roof_slice: SliceRange,
    /// Side of the track the screen doors stand on. `None` leaves the
    /// station track without doors.
    pub door_side: Option<PlatformSide>,
    /// Trains run the line end to start.
    pub reversed: bool,
    /// Where the head car stops, as a fraction of the route.
    pub stop_point: f64,
    pub cars: usize,
    pub livery: Livery,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            label: "line".to_string(),
            control_points: Vec::new(),
            color: [0.2, 0.2, 0.2],
            station_slice: [0.4, 0.8],
            roof_slice: [0.4, 0.675],
            door_side: Some(PlatformSide::Left),
            reversed: false,
            stop_point: 0.5,
            cars: 10,
            livery: Livery::default(),
        }
    }
}

/// An island platform between two lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub label: String,
    /// Line whose platform edge is on the right of travel.
    pub near: usize,
    /// Line whose platform edge is on the left of travel.
    pub far: usize,
    pub rail_y: f32,
    pub margin: f32,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            label: "station".to_string(),
            near: 0,
            far: 1,
            rail_y: STATION_Y,
            margin: PLATFORM_MARGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatenaryConfig {
    pub line: usize,
    #[serde(default)]
    pub params: CatenaryParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    pub line: usize,
    pub margin: f32,
    pub height: f32,
    pub thickness: f32,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub lines: Vec<LineConfig>,
    pub stations: Vec<StationConfig>,
    pub escalators: Vec<EscalatorParams>,
    pub elevator: Option<ElevatorParams>,
    pub arch_bridge: Option<ArchBridgeParams>,
    pub girder_bridge: Option<GirderBridgeParams>,
    pub concourse: Option<ConcourseParams>,
    pub catenary: Vec<CatenaryConfig>,
    pub tunnel_walls: Vec<WallConfig>,
    /// Route each train moves to when a crossing releases, indexed by its
    /// current route.
    pub crossing_permutation: Vec<usize>,
    /// Random layovers at lap boundaries.
    pub ambient: bool,
    pub seed: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        let y = STATION_Y;
        let rgb = |hex: u32| {
            [
                ((hex >> 16) & 0xff) as f32 / 255.0,
                ((hex >> 8) & 0xff) as f32 / 255.0,
                (hex & 0xff) as f32 / 255.0,
            ]
        };
        let chuo = Livery::from_prefix("tyuou", 1, 3, 2);
        let sobu = Livery::from_prefix("soubu", 1, 4, 3);

        let lines = vec![
            LineConfig {
                label: "Chuo rapid outbound".to_string(),
                control_points: vec![
                    [30.0, y + 1.0, -135.0],
                    [20.0, y + 0.5, -100.0],
                    [6.0, y, -50.0],
                    [4.8, y, -30.0],
                    [4.8, y, 50.0],
                    [3.0, y, 90.0],
                ],
                color: rgb(0xff0000),
                door_side: Some(PlatformSide::Right),
                stop_point: 0.7745,
                cars: 12,
                livery: chuo.clone(),
                ..LineConfig::default()
            },
            LineConfig {
                label: "Sobu local outbound".to_string(),
                control_points: vec![
                    [15.0, y + 4.0, -140.0],
                    [18.0, y + 3.0, -110.0],
                    [3.0, y, -50.0],
                    [0.8, y, -30.0],
                    [0.8, y, 50.0],
                    [-2.0, y, 90.0],
                ],
                color: rgb(0x772200),
                door_side: Some(PlatformSide::Left),
                stop_point: 0.7775,
                cars: 10,
                livery: sobu.clone(),
                ..LineConfig::default()
            },
            LineConfig {
                label: "Sobu local inbound".to_string(),
                control_points: vec![
                    [13.0, y + 4.0, -140.0],
                    [16.0, y + 3.0, -110.0],
                    [1.0, y, -50.0],
                    [-0.8, y, -30.0],
                    [-0.8, y, 50.0],
                    [-4.0, y, 90.0],
                ],
                color: rgb(0x002277),
                door_side: Some(PlatformSide::Right),
                reversed: true,
                stop_point: 0.4985,
                cars: 10,
                livery: sobu,
                ..LineConfig::default()
            },
            LineConfig {
                label: "Chuo rapid inbound".to_string(),
                control_points: vec![
                    [28.0, y + 1.0, -135.0],
                    [14.0, y - 0.5, -105.0],
                    [-2.0, y, -50.0],
                    [-4.8, y, -30.0],
                    [-4.8, y, 40.0],
                    [-9.0, y, 90.0],
                ],
                color: rgb(0x0000ff),
                station_slice: [0.4, 0.84],
                roof_slice: [0.4, 0.6846],
                door_side: Some(PlatformSide::Left),
                reversed: true,
                stop_point: 0.5625,
                cars: 12,
                livery: chuo,
            },
        ];

        Self {
            lines,
            stations: vec![
                StationConfig {
                    label: "platform 1-2".to_string(),
                    near: 0,
                    far: 1,
                    ..StationConfig::default()
                },
                StationConfig {
                    label: "platform 3-4".to_string(),
                    near: 2,
                    far: 3,
                    ..StationConfig::default()
                },
            ],
            escalators: default_escalators(),
            elevator: Some(ElevatorParams::default()),
            arch_bridge: Some(ArchBridgeParams::default()),
            girder_bridge: None,
            concourse: Some(ConcourseParams::default()),
            catenary: vec![
                CatenaryConfig {
                    line: 0,
                    params: CatenaryParams::default(),
                },
                CatenaryConfig {
                    line: 3,
                    params: CatenaryParams::default(),
                },
            ],
            tunnel_walls: Vec::new(),
            crossing_permutation: DEFAULT_CROSSING_PERMUTATION.to_vec(),
            ambient: true,
            seed: LAYOUT_SEED,
        }
    }
}

impl NetworkConfig {
    /// Parse a layout and check it for dangling references.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if self.lines.is_empty() {
            return invalid("no lines".to_string());
        }
        for line in &self.lines {
            if line.control_points.len() < 2 {
                return invalid(format!(
                    "line '{}' needs at least 2 control points",
                    line.label
                ));
            }
            if !(0.0..1.0).contains(&line.stop_point) {
                return invalid(format!(
                    "line '{}' stop point {} outside [0, 1)",
                    line.label, line.stop_point
                ));
            }
            if line.cars == 0 {
                return invalid(format!("line '{}' has no cars", line.label));
            }
            for (name, [start, end]) in [("station", line.station_slice), ("roof", line.roof_slice)]
            {
                if !(0.0 <= start && start < end && end <= 1.0) {
                    return invalid(format!(
                        "line '{}' {name} slice {start}..{end} is not a sub-range of 0..1",
                        line.label
                    ));
                }
            }
        }

        let line_count = self.lines.len();
        for station in &self.stations {
            if station.near >= line_count || station.far >= line_count {
                return invalid(format!(
                    "station '{}' refers to a missing line",
                    station.label
                ));
            }
            if station.near == station.far {
                return invalid(format!(
                    "station '{}' uses line {} on both sides",
                    station.label, station.near
                ));
            }
        }
        if let Some(bad) = self
            .catenary
            .iter()
            .map(|c| c.line)
            .chain(self.tunnel_walls.iter().map(|w| w.line))
            .find(|&line| line >= line_count)
        {
            return invalid(format!("structure refers to missing line {bad}"));
        }

        let mut seen = vec![false; line_count];
        if self.crossing_permutation.len() != line_count {
            return invalid(format!(
                "crossing permutation has {} entries for {} lines",
                self.crossing_permutation.len(),
                line_count
            ));
        }
        for &target in &self.crossing_permutation {
            match seen.get_mut(target) {
                Some(slot) if !*slot => *slot = true,
                _ => {
                    return invalid(format!(
                        "crossing permutation {:?} is not a permutation",
                        self.crossing_permutation
                    ))
                }
            }
        }
        Ok(())
    }
}
