use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use simulation::simulation_sets::SimulationUpdateSet;

pub mod control_panel;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_panel_theme)
            .add_systems(
                Update,
                control_panel::control_panel_ui.in_set(SimulationUpdateSet::Input),
            );
    }
}
