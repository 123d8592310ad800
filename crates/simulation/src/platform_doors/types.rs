//! Door leaves, states and ownership tokens.

use bevy::math::Vec3;

/// Index of a group inside [`super::PlatformDoors`].
pub type DoorGroupId = usize;

/// One sliding leaf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoorLeaf {
    /// Closed position.
    pub rest: Vec3,
    /// Bearing of the leaf's sliding axis, `atan2(dx, dz)`.
    pub heading: f32,
    /// Box extents (thickness, height, width).
    pub size: Vec3,
}

impl DoorLeaf {
    /// Unit vector the leaf slides along.
    pub fn lateral(&self) -> Vec3 {
        Vec3::new(self.heading.sin(), 0.0, self.heading.cos())
    }
}

/// Where a group is in its open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoorState {
    Closed,
    Opening { progress: f32 },
    Open,
    Closing { progress: f32 },
}

impl DoorState {
    /// 0.0 fully closed, 1.0 fully open.
    pub fn openness(&self) -> f32 {
        match *self {
            DoorState::Closed => 0.0,
            DoorState::Opening { progress } => progress,
            DoorState::Open => 1.0,
            DoorState::Closing { progress } => 1.0 - progress,
        }
    }

    pub fn is_at_rest(&self) -> bool {
        matches!(self, DoorState::Closed | DoorState::Open)
    }
}

/// Emitted by `DoorGroup::advance` when a transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    FullyOpened,
    FullyClosed,
}

/// Proof of exclusive control over one door group.
///
/// Not `Clone`: the holder is the only party that can open or close the
/// group until it hands the token back with `DoorGroup::release`.
#[derive(Debug, PartialEq, Eq)]
pub struct DoorToken {
    pub(crate) owner: u32,
}

impl DoorToken {
    pub fn owner(&self) -> u32 {
        self.owner
    }
}
