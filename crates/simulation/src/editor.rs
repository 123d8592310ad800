//! Track editor model.
//!
//! Clicked points collect in [`EditorState`]. Whenever they change and at
//! least two exist, the track is rebuilt through the same sampling and
//! structure pipeline as the configured lines. A failed rebuild keeps the
//! last error for the UI and leaves the editor usable.

use bevy::prelude::*;

use crate::config::{GUIDEWAY_SAMPLE_INTERVAL, PIER_EVERY, RAIL_GAUGE};
use crate::curve::{ControlPath, SampleTable};
use crate::error::BuildError;
use crate::simulation_sets::SimulationUpdateSet;
use crate::structures::{build_guideway, build_rails, StructureDescriptor};

const DEFAULT_PLACEMENT_HEIGHT: f32 = 7.0;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EditorState {
    pub enabled: bool,
    /// Height of the plane clicks are projected onto.
    pub height: f32,
    points: Vec<Vec3>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            enabled: false,
            height: DEFAULT_PLACEMENT_HEIGHT,
            points: Vec::new(),
        }
    }
}

impl EditorState {
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Append a control point, snapped to the placement height.
    pub fn add_point(&mut self, point: Vec3) {
        self.points.push(Vec3::new(point.x, self.height, point.z));
    }

    pub fn undo(&mut self) -> Option<Vec3> {
        self.points.pop()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// The track rebuilt from the editor's points.
#[derive(Resource, Debug, Clone, Default)]
pub struct EditedTrack {
    pub table: Option<SampleTable>,
    pub rails: Option<StructureDescriptor>,
    pub guideway: Option<StructureDescriptor>,
    pub error: Option<BuildError>,
    /// Bumped on every rebuild.
    pub revision: u32,
    built_from: Vec<Vec3>,
}

impl EditedTrack {
    /// True if the track was last rebuilt from exactly `points`.
    pub fn is_current(&self, points: &[Vec3]) -> bool {
        self.built_from == points
    }

    pub fn rebuild(&mut self, points: &[Vec3]) {
        self.revision = self.revision.wrapping_add(1);
        self.built_from = points.to_vec();
        self.table = None;
        self.rails = None;
        self.guideway = None;
        self.error = None;
        if points.len() < 2 {
            return;
        }
        match build_track(points) {
            Ok((table, rails, guideway)) => {
                self.table = Some(table);
                self.rails = Some(rails);
                self.guideway = Some(guideway);
            }
            Err(e) => self.error = Some(e),
        }
    }
}

fn build_track(
    points: &[Vec3],
) -> Result<(SampleTable, StructureDescriptor, StructureDescriptor), BuildError> {
    let path = ControlPath::new(points.to_vec())?;
    let table = SampleTable::sample(&path, GUIDEWAY_SAMPLE_INTERVAL)?;
    let rails = build_rails("edited rails", &table, RAIL_GAUGE)?;
    let guideway = build_guideway("edited guideway", &table, PIER_EVERY)?;
    Ok((table, rails, guideway))
}

/// Rebuild when the points differ from the last build. Toggling the editor
/// or moving the placement height alone does not count.
pub fn rebuild_edited_track(editor: Res<EditorState>, mut track: ResMut<EditedTrack>) {
    if !editor.is_changed() || track.is_current(editor.points()) {
        return;
    }
    track.rebuild(editor.points());
    if let Some(e) = &track.error {
        warn!("Edited track rebuild failed: {}", e);
    }
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorState>()
            .init_resource::<EditedTrack>()
            .add_systems(
                Update,
                rebuild_edited_track
                    .after(SimulationUpdateSet::Input)
                    .before(SimulationUpdateSet::Visual),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_snap_to_placement_height() {
        let mut editor = EditorState {
            height: 3.0,
            ..EditorState::default()
        };
        editor.add_point(Vec3::new(1.0, 99.0, 2.0));
        assert_eq!(editor.points(), &[Vec3::new(1.0, 3.0, 2.0)]);
    }

    #[test]
    fn test_undo_and_clear() {
        let mut editor = EditorState::default();
        editor.add_point(Vec3::ZERO);
        editor.add_point(Vec3::X);
        assert_eq!(editor.undo(), Some(Vec3::new(1.0, DEFAULT_PLACEMENT_HEIGHT, 0.0)));
        assert_eq!(editor.points().len(), 1);
        editor.clear();
        assert!(editor.points().is_empty());
        assert_eq!(editor.undo(), None);
    }

    #[test]
    fn test_rebuild_needs_two_points() {
        let mut track = EditedTrack::default();
        track.rebuild(&[Vec3::ZERO]);
        assert!(track.table.is_none());
        assert!(track.error.is_none());
        assert_eq!(track.revision, 1);
    }

    #[test]
    fn test_rebuild_produces_rails_and_guideway() {
        let mut track = EditedTrack::default();
        track.rebuild(&[
            Vec3::new(0.0, 7.0, 0.0),
            Vec3::new(5.0, 7.0, 20.0),
            Vec3::new(0.0, 7.0, 40.5),
        ]);
        assert!(track.error.is_none(), "{:?}", track.error);
        assert_eq!(track.rails.as_ref().map(|r| r.lines.len()), Some(3));
        assert!(track.guideway.as_ref().is_some_and(|g| !g.boxes.is_empty()));
    }

    #[test]
    fn test_rebuild_failure_is_recorded() {
        let mut track = EditedTrack::default();
        track.rebuild(&[Vec3::ONE, Vec3::ONE]);
        assert!(matches!(
            track.error,
            Some(BuildError::Curve(crate::error::CurveError::ZeroLength))
        ));
        assert!(track.rails.is_none());
        // A later good rebuild clears the error.
        track.rebuild(&[Vec3::ZERO, Vec3::new(0.0, 0.0, 10.5)]);
        assert!(track.error.is_none());
        assert_eq!(track.revision, 2);
    }

    #[test]
    fn test_track_remembers_its_points() {
        let points = [Vec3::ZERO, Vec3::new(0.0, 0.0, 10.5)];
        let mut track = EditedTrack::default();
        assert!(track.is_current(&[]));
        assert!(!track.is_current(&points));
        track.rebuild(&points);
        assert!(track.is_current(&points));
        assert!(!track.is_current(&points[..1]));
    }
}
