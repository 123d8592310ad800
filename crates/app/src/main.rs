use bevy::prelude::*;
use bevy::window::PresentMode;

use simulation::network_config::NetworkConfig;

/// Path of a JSON network layout to load instead of the built-in one.
const NETWORK_ENV: &str = "RAIL_DIORAMA_NETWORK";
/// When set, walk the screenshot presets and exit.
const SCREENSHOTS_ENV: &str = "RAIL_DIORAMA_SCREENSHOTS";

/// The layout to run, plus the reason the built-in one is used instead of
/// the requested file, if it had to be.
fn load_network_config() -> (NetworkConfig, Option<String>) {
    let Ok(path) = std::env::var(NETWORK_ENV) else {
        return (NetworkConfig::default(), None);
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| NetworkConfig::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (
            NetworkConfig::default(),
            Some(format!("{path}: {e}; using the built-in layout")),
        ),
    }
}

fn main() {
    let (config, load_error) = load_network_config();
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Rail Diorama".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(config)
    .add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    // Logging only exists once the plugins are built.
    if let Some(message) = load_error {
        app.add_systems(Startup, move || warn!("Network config {}", message));
    }

    if std::env::var(SCREENSHOTS_ENV).is_ok() {
        app.add_plugins(rendering::ScreenshotPresetPlugin);
    }

    app.run();
}
