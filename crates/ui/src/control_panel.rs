//! The control panel: crossing trigger, editor, camera speed, train
//! status and everything that failed to build or load.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::camera::FlyCamera;
use rendering::trains::TextureFailures;
use simulation::crossing::CrossingBarrier;
use simulation::editor::{EditedTrack, EditorState};
use simulation::network::NetworkLayout;
use simulation::train_motion::TrainFleet;

const WARNING: egui::Color32 = egui::Color32::from_rgb(230, 170, 60);
const FAILURE: egui::Color32 = egui::Color32::from_rgb(230, 90, 80);

/// Arm the crossing for the whole fleet. Returns false while a crossing
/// is already draining.
pub fn request_crossing(barrier: &mut CrossingBarrier, fleet: &TrainFleet) -> bool {
    let armed = barrier.arm(fleet.trains.len() as u32);
    if armed {
        info!("Quadruple crossing armed for {} trains", fleet.trains.len());
    }
    armed
}

/// One status row per train.
pub fn train_status_lines(fleet: &TrainFleet) -> Vec<String> {
    fleet
        .trains
        .iter()
        .map(|train| {
            let route = fleet
                .routes
                .get(train.route)
                .map(|r| r.label.as_str())
                .unwrap_or("-");
            format!(
                "{} on {}: {} (t = {:.3})",
                train.label,
                route,
                train.phase().label(),
                train.t()
            )
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub fn control_panel_ui(
    mut contexts: EguiContexts,
    mut barrier: ResMut<CrossingBarrier>,
    fleet: Res<TrainFleet>,
    mut editor: ResMut<EditorState>,
    track: Res<EditedTrack>,
    mut fly: ResMut<FlyCamera>,
    layout: Res<NetworkLayout>,
    textures: Res<TextureFailures>,
) {
    egui::Window::new("Rail Diorama")
        .default_width(320.0)
        .default_pos([12.0, 12.0])
        .show(contexts.ctx_mut(), |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            // --- Crossing ---
            ui.horizontal(|ui| {
                let button = ui.add_enabled(
                    !barrier.is_draining(),
                    egui::Button::new("Quadruple crossing"),
                );
                if button.clicked() {
                    request_crossing(&mut barrier, &fleet);
                }
                if barrier.is_draining() {
                    ui.label(format!("waiting for {}", barrier.pending()));
                } else if barrier.releases() > 0 {
                    ui.label(format!("released {}x", barrier.releases()));
                }
            });

            ui.separator();

            // --- Editor ---
            let mut enabled = editor.enabled;
            ui.checkbox(&mut enabled, "Edit track (click to add points)");
            if enabled != editor.enabled {
                editor.enabled = enabled;
            }
            ui.horizontal(|ui| {
                ui.label(format!("{} points", editor.points().len()));
                if ui
                    .add_enabled(!editor.points().is_empty(), egui::Button::new("Undo"))
                    .clicked()
                {
                    editor.undo();
                }
                if ui
                    .add_enabled(!editor.points().is_empty(), egui::Button::new("Clear"))
                    .clicked()
                {
                    editor.clear();
                }
            });
            if let Some(e) = &track.error {
                ui.colored_label(WARNING, format!("Track not built: {e}"));
            }

            ui.separator();

            // --- Camera ---
            let speed = if fly.fast { "fast" } else { "normal" };
            if ui
                .selectable_label(fly.fast, format!("Camera speed: {speed}"))
                .clicked()
            {
                fly.fast = !fly.fast;
            }

            ui.separator();

            // --- Trains ---
            egui::CollapsingHeader::new("Trains")
                .default_open(true)
                .show(ui, |ui| {
                    for line in train_status_lines(&fleet) {
                        ui.label(line);
                    }
                });

            // --- Failures ---
            if !layout.failures.is_empty() || !textures.failures().is_empty() {
                ui.separator();
                ui.colored_label(FAILURE, "Problems");
                for failure in &layout.failures {
                    ui.label(format!("{}: {}", failure.label, failure.error));
                }
                for failure in textures.failures() {
                    ui.label(format!("{}: {}", failure.path, failure.error));
                }
            }
        });
}
