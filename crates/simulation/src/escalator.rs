//! Escalator step belts.
//!
//! The belt is a fine sample table along the escalator path. Steps are
//! spaced one step depth apart as a fraction of the path and all share one
//! phase that creeps forward every tick and wraps once it has covered one
//! full step cycle, so the belt looks continuous with a fixed step count.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    ESCALATOR_PLATE_LIFT, ESCALATOR_SAMPLE_INTERVAL, ESCALATOR_SPEED, ESCALATOR_STEP_DEPTH,
};
use crate::curve::{ControlPath, SampleTable};
use crate::error::BuildError;
use crate::simulation_sets::SimulationSet;
use crate::structures::{BoxPiece, StructureDescriptor, StructureKind};

/// Side profile of one step (run, rise), extruded across the belt.
pub const STEP_PROFILE: [[f32; 2]; 4] = [[0.3, 0.15], [0.0, 0.15], [0.015, 0.075], [0.06, -0.015]];
/// Extrusion depth of a step, i.e. the belt width.
pub const STEP_WIDTH: f32 = 0.8;
const PLATE_SIZE: Vec3 = Vec3::new(0.6, 0.01, 1.0);

/// Control points of the standard escalator, relative to its foot.
const PROFILE: [[f32; 2]; 6] = [
    [0.0, -3.42],
    [0.0, -3.0],
    [0.1, -2.0],
    [3.28, 3.7],
    [3.38, 4.7],
    [3.38, 5.2],
];

/// Where an escalator stands. The rise and run are fixed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalatorParams {
    pub label: String,
    pub origin: [f32; 3],
}

impl EscalatorParams {
    pub fn control_points(&self) -> Vec<Vec3> {
        let [x, y, z] = self.origin;
        PROFILE
            .iter()
            .map(|[dy, dz]| Vec3::new(x, y + dy, z + dz))
            .collect()
    }
}

/// The three escalators of the default station.
pub fn default_escalators() -> Vec<EscalatorParams> {
    [("escalator east", 2.8), ("escalator west", -2.8), ("escalator annex", 15.0)]
        .into_iter()
        .map(|(label, x)| EscalatorParams {
            label: label.to_string(),
            origin: [x, 6.536, 20.2],
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct EscalatorBelt {
    label: String,
    table: SampleTable,
    step_count: usize,
    /// One step depth as a fraction of the path length.
    depth_ratio: f32,
    /// Fraction of the path covered by the whole belt of steps.
    cycle: f32,
    phase: f32,
}

impl EscalatorBelt {
    pub fn new(label: impl Into<String>, path: &ControlPath) -> Result<Self, BuildError> {
        let length = path.length();
        let step_count = (length / ESCALATOR_STEP_DEPTH).floor() as usize;
        if step_count == 0 {
            return Err(BuildError::InvalidParameter {
                name: "escalator length",
                value: length,
            });
        }
        let table = SampleTable::sample(path, ESCALATOR_SAMPLE_INTERVAL)?;
        let depth_ratio = ESCALATOR_STEP_DEPTH / length;
        Ok(Self {
            label: label.into(),
            table,
            step_count,
            depth_ratio,
            cycle: depth_ratio * step_count as f32,
            phase: 0.0,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn depth_ratio(&self) -> f32 {
        self.depth_ratio
    }

    pub fn cycle(&self) -> f32 {
        self.cycle
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// One tick of belt motion.
    pub fn advance(&mut self) {
        if self.phase >= self.cycle {
            self.phase = 0.0;
        } else {
            self.phase += ESCALATOR_SPEED;
        }
    }

    /// Position of every step this tick.
    pub fn step_positions(&self) -> Vec<Vec3> {
        (0..self.step_count)
            .map(|i| {
                let ratio = (self.phase + i as f32 * self.depth_ratio).rem_euclid(self.cycle);
                self.sample_at(ratio)
            })
            .collect()
    }

    /// Bottom and top landing plates.
    pub fn landing_positions(&self) -> [Vec3; 2] {
        let lift = Vec3::Y * ESCALATOR_PLATE_LIFT;
        [self.sample_at(0.0) + lift, self.sample_at(self.cycle) + lift]
    }

    /// Static plates for the renderer.
    pub fn landing_structure(&self) -> StructureDescriptor {
        let mut out = StructureDescriptor::new(self.label.clone(), StructureKind::Escalator);
        for centre in self.landing_positions() {
            out.boxes.push(BoxPiece::axis_aligned(centre, PLATE_SIZE));
        }
        out
    }

    /// Sample `floor(last * ratio)`, where `last` is the final index.
    fn sample_at(&self, ratio: f32) -> Vec3 {
        let last = self.table.len().saturating_sub(1);
        let index = ((last as f32 * ratio).floor().max(0.0) as usize).min(last);
        self.table.position(index).unwrap_or(Vec3::ZERO)
    }
}

/// Every escalator in the network.
#[derive(Resource, Debug, Default)]
pub struct Escalators {
    pub belts: Vec<EscalatorBelt>,
}

pub fn advance_escalators(mut escalators: ResMut<Escalators>) {
    for belt in &mut escalators.belts {
        belt.advance();
    }
}

pub struct EscalatorPlugin;

impl Plugin for EscalatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Escalators>().add_systems(
            FixedUpdate,
            advance_escalators.in_set(SimulationSet::Escalators),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn belt() -> EscalatorBelt {
        let params = &default_escalators()[0];
        let path = ControlPath::new(params.control_points()).unwrap();
        EscalatorBelt::new(&params.label, &path).unwrap()
    }

    #[test]
    fn test_default_escalators() {
        let all = default_escalators();
        assert_eq!(all.len(), 3);
        let points = all[1].control_points();
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], Vec3::new(-2.8, 6.536, 20.2 - 3.42));
    }

    #[test]
    fn test_step_count_from_length() {
        let b = belt();
        let path = ControlPath::new(default_escalators()[0].control_points()).unwrap();
        let length = path.length();
        assert_eq!(b.step_count(), (length / 0.3).floor() as usize);
        assert!((b.depth_ratio() - 0.3 / length).abs() < 1e-6);
        assert!(b.cycle() <= 1.0);
    }

    #[test]
    fn test_steps_start_evenly_spaced() {
        let b = belt();
        let steps = b.step_positions();
        assert_eq!(steps.len(), b.step_count());
        for pair in steps.windows(2) {
            let d = pair[0].distance(pair[1]);
            assert!((d - 0.3).abs() < 0.02, "gap {d}");
        }
    }

    #[test]
    fn test_phase_wraps_after_cycle() {
        let mut b = belt();
        let ticks = (b.cycle() / ESCALATOR_SPEED).ceil() as usize + 2;
        let mut wrapped = false;
        for _ in 0..ticks {
            b.advance();
            if b.phase() == 0.0 {
                wrapped = true;
            }
            assert!(b.phase() <= b.cycle() + ESCALATOR_SPEED);
        }
        assert!(wrapped);
    }

    #[test]
    fn test_steps_move_along_path() {
        let mut b = belt();
        let before = b.step_positions()[0];
        for _ in 0..20 {
            b.advance();
        }
        let after = b.step_positions()[0];
        assert!(after.z > before.z);
    }

    #[test]
    fn test_landings_are_lifted() {
        let b = belt();
        let [bottom, top] = b.landing_positions();
        assert!((bottom.y - (6.536 + ESCALATOR_PLATE_LIFT)).abs() < 1e-4);
        assert!(top.y > bottom.y);
        assert_eq!(b.landing_structure().boxes.len(), 2);
    }

    #[test]
    fn test_too_short_escalator_rejected() {
        let path = ControlPath::new(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 0.2)]).unwrap();
        assert!(matches!(
            EscalatorBelt::new("stub", &path),
            Err(BuildError::InvalidParameter { .. })
        ));
    }
}
