//! Editor picking and preview.
//!
//! A left click casts the cursor ray onto the horizontal plane at the
//! editor's placement height and appends the hit as a control point.
//! Gizmos draw the control points, the rebuilt rails and any guideway
//! piers every frame.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::editor::{EditedTrack, EditorState};

const POINT_RADIUS: f32 = 0.3;

/// A click on the control panel must not also place a point behind it.
fn pointer_over_panel(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.is_pointer_over_area() || ctx.wants_pointer_input()
}

/// Where a ray meets the plane `y = height`, if it does so in front of the
/// origin.
pub fn ray_plane_hit(origin: Vec3, direction: Vec3, height: f32) -> Option<Vec3> {
    if direction.y.abs() <= 1e-3 {
        return None;
    }
    let t = (height - origin.y) / direction.y;
    (t > 0.0).then(|| origin + direction * t)
}

pub fn pick_editor_point(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut contexts: EguiContexts,
    mut editor: ResMut<EditorState>,
) {
    if !editor.enabled || !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    if pointer_over_panel(&mut contexts) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, transform)) = camera_q.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(transform, cursor) else {
        return;
    };
    if let Some(hit) = ray_plane_hit(ray.origin, *ray.direction, editor.height) {
        editor.add_point(hit);
        debug!("Editor point {} at {}", editor.points().len(), hit);
    }
}

pub fn draw_editor_preview(
    editor: Res<EditorState>,
    track: Res<EditedTrack>,
    mut gizmos: Gizmos,
) {
    if !editor.enabled && editor.points().is_empty() {
        return;
    }
    let point_color = Color::srgb(1.0, 0.8, 0.1);
    for point in editor.points() {
        gizmos.sphere(Isometry3d::from_translation(*point), POINT_RADIUS, point_color);
    }
    gizmos.linestrip(editor.points().iter().copied(), Color::srgba(1.0, 0.8, 0.1, 0.4));

    let Some(rails) = &track.rails else {
        return;
    };
    for line in &rails.lines {
        gizmos.linestrip(line.points.iter().copied(), Color::srgb(0.9, 0.9, 0.95));
    }
    if let Some(guideway) = &track.guideway {
        for piece in &guideway.boxes {
            gizmos.cuboid(
                Transform::from_translation(piece.center)
                    .with_rotation(piece.rotation)
                    .with_scale(piece.size),
                Color::srgb(0.5, 0.5, 0.5),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_plane_below() {
        let hit = ray_plane_hit(Vec3::new(0.0, 14.0, 0.0), Vec3::new(0.0, -1.0, 1.0), 7.0)
            .expect("hit");
        assert!(hit.distance(Vec3::new(0.0, 7.0, 7.0)) < 1e-5);
    }

    #[test]
    fn test_ray_misses_behind_or_parallel() {
        assert!(ray_plane_hit(Vec3::new(0.0, 14.0, 0.0), Vec3::Y, 7.0).is_none());
        assert!(ray_plane_hit(Vec3::new(0.0, 14.0, 0.0), Vec3::Z, 7.0).is_none());
    }
}
