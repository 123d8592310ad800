//! Screenshot preset mode: aim the camera at each preset in turn, let the
//! scene settle, save a PNG, and exit after the last one.

use std::path::PathBuf;

use bevy::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use bevy::render::view::screenshot::{save_to_disk, Screenshot};

use crate::camera::FlyCamera;

/// Frames to wait after aiming before capturing, and after the last
/// capture before exiting.
const SETTLE_FRAMES: u32 = 45;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenshotPreset {
    pub name: &'static str,
    pub position: Vec3,
    pub target: Vec3,
}

pub const PRESETS: [ScreenshotPreset; 4] = [
    ScreenshotPreset {
        name: "overview",
        position: Vec3::new(-30.0, 40.0, -70.0),
        target: Vec3::new(0.0, 7.0, -20.0),
    },
    ScreenshotPreset {
        name: "platform",
        position: Vec3::new(-0.1, 14.0, -35.0),
        target: Vec3::new(3.0, 7.0, -35.0),
    },
    ScreenshotPreset {
        name: "elevators",
        position: Vec3::new(10.0, 9.0, -28.0),
        target: Vec3::new(2.7, 8.0, -20.0),
    },
    ScreenshotPreset {
        name: "bridge",
        position: Vec3::new(25.0, 12.0, 30.0),
        target: Vec3::new(0.0, 5.0, 50.0),
    },
];

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenshotAction {
    Wait,
    Aim(ScreenshotPreset),
    Capture(PathBuf),
    Exit,
}

#[derive(Resource, Debug, Clone)]
pub struct ScreenshotRun {
    presets: Vec<ScreenshotPreset>,
    dir: PathBuf,
    index: usize,
    frame: u32,
}

impl ScreenshotRun {
    pub fn new(presets: Vec<ScreenshotPreset>, dir: impl Into<PathBuf>) -> Self {
        Self {
            presets,
            dir: dir.into(),
            index: 0,
            frame: 0,
        }
    }

    pub fn path_for(&self, preset: &ScreenshotPreset) -> PathBuf {
        self.dir.join(format!("rail_diorama_{}.png", preset.name))
    }

    /// What to do this frame.
    pub fn next_action(&mut self) -> ScreenshotAction {
        let Some(preset) = self.presets.get(self.index).copied() else {
            if self.frame >= SETTLE_FRAMES {
                return ScreenshotAction::Exit;
            }
            self.frame += 1;
            return ScreenshotAction::Wait;
        };
        if self.frame == 0 {
            self.frame = 1;
            return ScreenshotAction::Aim(preset);
        }
        if self.frame < SETTLE_FRAMES {
            self.frame += 1;
            return ScreenshotAction::Wait;
        }
        self.index += 1;
        self.frame = 0;
        ScreenshotAction::Capture(self.path_for(&preset))
    }
}

impl Default for ScreenshotRun {
    fn default() -> Self {
        Self::new(PRESETS.to_vec(), std::env::temp_dir())
    }
}

pub fn run_screenshot_presets(
    mut commands: Commands,
    mut run: ResMut<ScreenshotRun>,
    mut fly: ResMut<FlyCamera>,
    mut exit: EventWriter<AppExit>,
) {
    match run.next_action() {
        ScreenshotAction::Wait => {}
        ScreenshotAction::Aim(preset) => {
            *fly = FlyCamera::looking_at(preset.position, preset.target);
        }
        ScreenshotAction::Capture(path) => capture(&mut commands, path),
        ScreenshotAction::Exit => {
            info!("Screenshot presets done");
            exit.send(AppExit::Success);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn capture(commands: &mut Commands, path: PathBuf) {
    info!("Saving screenshot {}", path.display());
    commands
        .spawn(Screenshot::primary_window())
        .observe(save_to_disk(path));
}

#[cfg(target_arch = "wasm32")]
fn capture(_commands: &mut Commands, path: PathBuf) {
    warn!("Screenshots not supported in browser: {}", path.display());
}

/// Walks [`PRESETS`] and exits. Only added when preset mode is requested.
pub struct ScreenshotPresetPlugin;

impl Plugin for ScreenshotPresetPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenshotRun>()
            .add_systems(Update, run_screenshot_presets);
    }
}
