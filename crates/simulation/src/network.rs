//! Turns a [`NetworkConfig`] into routes, trains, door groups, animated
//! fixtures and static structure descriptors.
//!
//! Routes are load-bearing: a line whose route cannot be built loses its
//! train. Everything else is decorative and built independently; a failure
//! is recorded against the structure's label and the rest of the network
//! still comes up.

use bevy::prelude::*;

use crate::config::{
    DOORS_PER_UNIT, DOOR_INTERVAL, DOOR_SETBACK, GUIDEWAY_SAMPLE_INTERVAL, PIER_EVERY,
    PLATFORM_DELICACY, RAIL_GAUGE, REVERSE_RESOLUTION, ROOF_ABOVE_RAIL, ROOF_BAYS,
    SLICE_RESOLUTION,
};
use crate::crossing::CrossingBarrier;
use crate::curve::{ControlPath, SampleTable};
use crate::elevator::{build_elevator, ElevatorParams, ElevatorShaft, Elevators};
use crate::error::BuildError;
use crate::escalator::{EscalatorBelt, Escalators};
use crate::livery::Livery;
use crate::network_config::{LineConfig, NetworkConfig, StationConfig};
use crate::platform_doors::PlatformDoors;
use crate::sim_rng::SimRng;
use crate::structures::{
    build_arch_bridge, build_catenary, build_concourse, build_girder_bridge, build_guideway,
    build_platform, build_rails, build_roof, build_screen_doors, build_tunnel_walls,
    StructureDescriptor,
};
use crate::train_motion::{Train, TrainFleet, TrainRoute};

/// A structure that failed to build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFailure {
    pub label: String,
    pub error: BuildError,
}

/// Sampled centerline of one configured line.
#[derive(Debug, Clone)]
pub struct LineGeometry {
    pub label: String,
    pub color: [f32; 3],
    pub table: SampleTable,
}

/// Everything static the renderer needs.
#[derive(Resource, Debug, Clone, Default)]
pub struct NetworkLayout {
    pub lines: Vec<LineGeometry>,
    pub structures: Vec<StructureDescriptor>,
    pub failures: Vec<BuildFailure>,
    /// One per train, in fleet order.
    pub liveries: Vec<Livery>,
}

/// Station tracks cut from one line.
#[derive(Default)]
struct StationTracks {
    platform: Option<ControlPath>,
    roof: Option<ControlPath>,
}

#[derive(Debug)]
pub struct RailNetwork {
    pub layout: NetworkLayout,
    pub routes: Vec<TrainRoute>,
    pub trains: Vec<Train>,
    pub doors: PlatformDoors,
    pub elevators: Elevators,
    pub escalators: Escalators,
}

impl RailNetwork {
    pub fn build(config: &NetworkConfig) -> Self {
        let mut network = Self {
            layout: NetworkLayout::default(),
            routes: Vec::new(),
            trains: Vec::new(),
            doors: PlatformDoors::default(),
            elevators: Elevators::default(),
            escalators: Escalators::default(),
        };

        let tracks: Vec<StationTracks> = config
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| network.build_line(index, line))
            .collect();

        for station in &config.stations {
            network.build_station(station, &tracks);
        }
        network.build_trackside(config);
        if let Some(params) = &config.elevator {
            network.build_elevators(params);
        }
        for params in &config.escalators {
            let belt = ControlPath::new(params.control_points())
                .map_err(BuildError::from)
                .and_then(|path| EscalatorBelt::new(params.label.clone(), &path));
            if let Some(belt) = network.keep(&params.label, belt) {
                network.layout.structures.push(belt.landing_structure());
                network.escalators.belts.push(belt);
            }
        }
        if let Some(params) = &config.arch_bridge {
            network.structure("arch bridge", build_arch_bridge("arch bridge", params));
        }
        if let Some(params) = &config.girder_bridge {
            network.structure("girder bridge", build_girder_bridge("girder bridge", params));
        }
        if let Some(params) = &config.concourse {
            network.structure("concourse", build_concourse("concourse", params));
        }
        network
    }

    /// One-line description for the startup log.
    pub fn summary(&self) -> String {
        format!(
            "{} routes, {} trains, {} door groups, {} elevators, {} escalators, {} structures, {} failures",
            self.routes.len(),
            self.trains.len(),
            self.doors.groups.len(),
            self.elevators.shafts.len(),
            self.escalators.belts.len(),
            self.layout.structures.len(),
            self.layout.failures.len(),
        )
    }

    /// Hand every part over to the world as resources.
    pub fn install(self, commands: &mut Commands, config: &NetworkConfig, rng: &mut SimRng) {
        let Self {
            layout,
            routes,
            mut trains,
            doors,
            elevators,
            escalators,
        } = self;
        if config.ambient {
            for train in &mut trains {
                train.hold_for_layover(&mut rng.0);
            }
        }
        commands.insert_resource(TrainFleet {
            routes,
            trains,
            ambient: config.ambient,
        });
        commands.insert_resource(CrossingBarrier::new(config.crossing_permutation.clone()));
        commands.insert_resource(doors);
        commands.insert_resource(elevators);
        commands.insert_resource(escalators);
        commands.insert_resource(layout);
    }

    /// Track, guideway, screen doors and the route of one line.
    fn build_line(&mut self, index: usize, line: &LineConfig) -> StationTracks {
        let points = line
            .control_points
            .iter()
            .map(|&p| Vec3::from_array(p))
            .collect();
        let Some(path) = self.keep(&line.label, ControlPath::new(points).map_err(BuildError::from))
        else {
            warn!("Line {} dropped along with its train", line.label);
            return StationTracks::default();
        };

        let table = SampleTable::sample(&path, GUIDEWAY_SAMPLE_INTERVAL).map_err(BuildError::from);
        if let Some(table) = self.keep(&line.label, table) {
            let label = format!("{} rails", line.label);
            self.structure(&label, build_rails(&label, &table, RAIL_GAUGE));
            let label = format!("{} guideway", line.label);
            self.structure(&label, build_guideway(&label, &table, PIER_EVERY));
            self.layout.lines.push(LineGeometry {
                label: line.label.clone(),
                color: line.color,
                table,
            });
        }

        let [start, end] = line.station_slice;
        let platform = self.keep(
            &line.label,
            path.slice(start, end, SLICE_RESOLUTION)
                .map_err(BuildError::from),
        );
        let [start, end] = line.roof_slice;
        let roof = self.keep(
            &line.label,
            path.slice(start, end, SLICE_RESOLUTION)
                .map_err(BuildError::from),
        );

        let door_group = match (&platform, line.door_side) {
            (Some(track), Some(side)) => {
                let label = format!("{} screen doors", line.label);
                let set = SampleTable::sample(track, DOOR_INTERVAL)
                    .map_err(BuildError::from)
                    .and_then(|table| {
                        build_screen_doors(&label, &table, DOOR_SETBACK, side, DOORS_PER_UNIT)
                    });
                self.keep(&label, set).map(|set| {
                    self.layout.structures.push(set.fence);
                    self.doors.groups.push(set.doors);
                    self.doors.groups.len() - 1
                })
            }
            _ => None,
        };

        let route_path = if line.reversed {
            path.reversed(REVERSE_RESOLUTION).map_err(BuildError::from)
        } else {
            Ok(path)
        };
        let route = route_path.and_then(|route_path| {
            TrainRoute::new(line.label.clone(), &route_path, line.stop_point, door_group)
                .map(|route| route.on_line(index))
        });
        match self.keep(&format!("{} route", line.label), route) {
            Some(route) => {
                self.routes.push(route);
                self.trains.push(Train::new(
                    self.trains.len() as u32,
                    line.label.clone(),
                    self.routes.len() - 1,
                    line.cars,
                ));
                self.layout.liveries.push(line.livery.clone());
            }
            None => warn!("Train on {} dropped: no route", line.label),
        }

        StationTracks { platform, roof }
    }

    fn build_station(&mut self, station: &StationConfig, tracks: &[StationTracks]) {
        let pair = |pick: fn(&StationTracks) -> Option<&ControlPath>| {
            match (
                tracks.get(station.near).and_then(pick),
                tracks.get(station.far).and_then(pick),
            ) {
                (Some(near), Some(far)) => Ok((near, far)),
                _ => Err(BuildError::EmptyInput("station track")),
            }
        };

        let platform = pair(|t| t.platform.as_ref()).and_then(|(near, far)| {
            build_platform(
                &station.label,
                &SampleTable::by_count(near, PLATFORM_DELICACY),
                &SampleTable::by_count(far, PLATFORM_DELICACY),
                station.rail_y,
                station.margin,
            )
        });
        self.structure(&station.label, platform);

        let label = format!("{} roof", station.label);
        let roof = pair(|t| t.roof.as_ref()).and_then(|(near, far)| {
            build_roof(
                &label,
                &SampleTable::by_count(near, ROOF_BAYS),
                &SampleTable::by_count(far, ROOF_BAYS),
                station.rail_y + ROOF_ABOVE_RAIL,
                station.margin,
            )
        });
        self.structure(&label, roof);
    }

    /// Catenary portals and tunnel walls, which follow whole lines.
    fn build_trackside(&mut self, config: &NetworkConfig) {
        let table_of = |line: usize| {
            config
                .lines
                .get(line)
                .and_then(|l| self.layout.lines.iter().find(|g| g.label == l.label))
                .map(|g| g.table.clone())
                .ok_or(BuildError::EmptyInput("line"))
        };

        let mut built = Vec::new();
        for (i, catenary) in config.catenary.iter().enumerate() {
            let label = format!("catenary {}", i + 1);
            let result = table_of(catenary.line)
                .and_then(|table| build_catenary(&label, &table, &catenary.params));
            built.push((label, result));
        }
        for (i, wall) in config.tunnel_walls.iter().enumerate() {
            let label = format!("tunnel wall {}", i + 1);
            let result = table_of(wall.line).and_then(|table| {
                build_tunnel_walls(&label, &table, wall.margin, wall.height, wall.thickness)
            });
            built.push((label, result));
        }
        for (label, result) in built {
            self.structure(&label, result);
        }
    }

    fn build_elevators(&mut self, params: &ElevatorParams) {
        for (i, shaft) in params.shafts.iter().enumerate() {
            let label = format!("elevator {}", i + 1);
            let built = build_elevator(&label, params.floor_y, params.z, shaft.x_shift)
                .and_then(|assembly| {
                    let shell = assembly.shell.clone();
                    ElevatorShaft::new(label.clone(), assembly, i as u32, shaft.starts_upper)
                        .map(|shaft| (shell, shaft))
                        .map_err(BuildError::from)
                });
            if let Some((shell, shaft)) = self.keep(&label, built) {
                self.layout.structures.push(shell);
                self.elevators.shafts.push(shaft);
            }
        }
    }

    fn keep<T>(&mut self, label: &str, result: Result<T, BuildError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.layout.failures.push(BuildFailure {
                    label: label.to_string(),
                    error,
                });
                None
            }
        }
    }

    fn structure(&mut self, label: &str, result: Result<StructureDescriptor, BuildError>) {
        if let Some(descriptor) = self.keep(label, result) {
            self.layout.structures.push(descriptor);
        }
    }
}

/// Build the configured network and insert its resources.
pub fn spawn_network(mut commands: Commands, config: Res<NetworkConfig>) {
    let network = RailNetwork::build(&config);
    info!("Rail network built: {}", network.summary());
    for failure in &network.layout.failures {
        warn!("Failed to build {}: {}", failure.label, failure.error);
    }
    let mut rng = SimRng::seeded(config.seed);
    network.install(&mut commands, &config, &mut rng);
    commands.insert_resource(rng);
}
