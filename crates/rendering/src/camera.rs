use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

/// Movement per 1/60 s frame at normal and fast speed.
pub const BASE_SPEED: f32 = 0.1;
pub const FAST_SPEED: f32 = 0.3;
/// Yaw/pitch change per 1/60 s frame while an arrow key is held.
const TURN_RATE: f32 = 0.03;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.1;
const FRAME_SECS: f32 = 1.0 / 60.0;

const START_POSITION: Vec3 = Vec3::new(-0.1, 14.0, -35.0);
const START_TARGET: Vec3 = Vec3::new(3.0, 7.0, -35.0);

/// Free-fly camera model. Yaw is measured from +Z toward +X, pitch upward
/// from the horizon.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fast: bool,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::looking_at(START_POSITION, START_TARGET)
    }
}

impl FlyCamera {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let dir = (target - position).normalize_or_zero();
        let horizontal = Vec2::new(dir.x, dir.z).length();
        Self {
            position,
            yaw: dir.x.atan2(dir.z),
            pitch: dir.y.atan2(horizontal).clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fast: false,
        }
    }

    pub fn speed(&self) -> f32 {
        if self.fast {
            FAST_SPEED
        } else {
            BASE_SPEED
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Forward and right directions flattened onto the ground plane.
    fn ground_axes(&self) -> (Vec3, Vec3) {
        let forward = Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos());
        let right = Vec3::new(-forward.z, 0.0, forward.x);
        (forward, right)
    }

    /// Move by `input` (x strafe right, y up, z forward) for `frames`
    /// 1/60 s frames.
    pub fn translate(&mut self, input: Vec3, frames: f32) {
        let (forward, right) = self.ground_axes();
        let step = self.speed() * frames;
        self.position += (right * input.x + Vec3::Y * input.y + forward * input.z) * step;
    }

    pub fn turn(&mut self, yaw: f32, pitch: f32, frames: f32) {
        self.yaw += yaw * TURN_RATE * frames;
        self.pitch = (self.pitch + pitch * TURN_RATE * frames).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position)
            .looking_to(self.forward(), Vec3::Y)
    }
}

pub fn setup_camera(mut commands: Commands, fly: Res<FlyCamera>) {
    commands.spawn((Camera3d::default(), fly.transform()));
}

fn axis(keys: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f32 {
    let mut value = 0.0;
    if keys.pressed(positive) {
        value += 1.0;
    }
    if keys.pressed(negative) {
        value -= 1.0;
    }
    value
}

/// WASD strafe and walk, Q/E descend and climb, arrows turn, Shift toggles
/// the fast speed.
pub fn fly_camera_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut fly: ResMut<FlyCamera>,
) {
    let frames = time.delta_secs() / FRAME_SECS;
    if keys.just_pressed(KeyCode::ShiftLeft) {
        fly.fast = !fly.fast;
    }

    let input = Vec3::new(
        axis(&keys, KeyCode::KeyD, KeyCode::KeyA),
        axis(&keys, KeyCode::KeyE, KeyCode::KeyQ),
        axis(&keys, KeyCode::KeyW, KeyCode::KeyS),
    );
    if input != Vec3::ZERO {
        fly.translate(input, frames);
    }

    let yaw = axis(&keys, KeyCode::ArrowLeft, KeyCode::ArrowRight);
    let pitch = axis(&keys, KeyCode::ArrowUp, KeyCode::ArrowDown);
    if yaw != 0.0 || pitch != 0.0 {
        fly.turn(yaw, pitch, frames);
    }
}

/// Apply the `FlyCamera` model to the camera transform.
pub fn apply_fly_camera(fly: Res<FlyCamera>, mut query: Query<&mut Transform, With<Camera3d>>) {
    if !fly.is_changed() {
        return;
    }
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = fly.transform();
}
