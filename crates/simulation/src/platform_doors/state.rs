//! `DoorGroup` state machine and the `PlatformDoors` resource.

use bevy::prelude::*;

use crate::error::DoorError;

use super::types::*;

/// A set of leaves that open and close together.
///
/// Leaf `i` slides along its own lateral axis by `travel`; even leaves move
/// one way and odd leaves the other, so each adjacent pair parts in the
/// middle. Positions are always derived from the rest positions, which is
/// what makes an open/close round trip exact.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorGroup {
    leaves: Vec<DoorLeaf>,
    state: DoorState,
    travel: f32,
    duration: f32,
    owner: Option<u32>,
    cancelled: bool,
}

impl DoorGroup {
    pub fn new(leaves: Vec<DoorLeaf>, travel: f32, duration: f32) -> Self {
        Self {
            leaves,
            state: DoorState::Closed,
            travel,
            duration: duration.max(f32::EPSILON),
            owner: None,
            cancelled: false,
        }
    }

    pub fn leaves(&self) -> &[DoorLeaf] {
        &self.leaves
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn owner(&self) -> Option<u32> {
        self.owner
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Take exclusive control of the group.
    pub fn claim(&mut self, owner: u32) -> Result<DoorToken, DoorError> {
        if self.owner.is_some() {
            return Err(DoorError::AlreadyClaimed);
        }
        self.owner = Some(owner);
        Ok(DoorToken { owner })
    }

    /// Hand control back. Only allowed once the doors are closed.
    pub fn release(&mut self, token: DoorToken) -> Result<(), DoorError> {
        self.check_owner(&token)?;
        if self.state != DoorState::Closed {
            return Err(DoorError::Busy { state: self.state });
        }
        self.owner = None;
        Ok(())
    }

    pub fn open(&mut self, token: &DoorToken) -> Result<(), DoorError> {
        self.check_owner(token)?;
        match self.state {
            DoorState::Closed if !self.cancelled => {
                self.state = DoorState::Opening { progress: 0.0 };
                Ok(())
            }
            state => Err(DoorError::Busy { state }),
        }
    }

    pub fn close(&mut self, token: &DoorToken) -> Result<(), DoorError> {
        self.check_owner(token)?;
        match self.state {
            DoorState::Open if !self.cancelled => {
                self.state = DoorState::Closing { progress: 0.0 };
                Ok(())
            }
            state => Err(DoorError::Busy { state }),
        }
    }

    /// Move an in-flight transition forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> Option<DoorEvent> {
        if self.cancelled {
            return None;
        }
        let step = dt / self.duration;
        match self.state {
            DoorState::Opening { progress } => {
                let progress = progress + step;
                if progress >= 1.0 {
                    self.state = DoorState::Open;
                    Some(DoorEvent::FullyOpened)
                } else {
                    self.state = DoorState::Opening { progress };
                    None
                }
            }
            DoorState::Closing { progress } => {
                let progress = progress + step;
                if progress >= 1.0 {
                    self.state = DoorState::Closed;
                    Some(DoorEvent::FullyClosed)
                } else {
                    self.state = DoorState::Closing { progress };
                    None
                }
            }
            DoorState::Closed | DoorState::Open => None,
        }
    }

    /// Freeze the group where it is. Further transitions are refused.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Current world position of leaf `index`.
    pub fn leaf_position(&self, index: usize) -> Option<Vec3> {
        let leaf = self.leaves.get(index)?;
        let sign = if index % 2 == 0 { 1.0 } else { -1.0 };
        Some(leaf.rest + leaf.lateral() * self.travel * sign * self.state.openness())
    }

    pub fn leaf_positions(&self) -> Vec<Vec3> {
        (0..self.leaves.len())
            .filter_map(|i| self.leaf_position(i))
            .collect()
    }

    fn check_owner(&self, token: &DoorToken) -> Result<(), DoorError> {
        if self.owner == Some(token.owner) {
            Ok(())
        } else {
            Err(DoorError::NotOwner)
        }
    }
}

/// Every platform door group in the network, indexed by [`DoorGroupId`].
#[derive(Resource, Debug, Default, Clone)]
pub struct PlatformDoors {
    pub groups: Vec<DoorGroup>,
}

impl PlatformDoors {
    pub fn get(&self, id: DoorGroupId) -> Option<&DoorGroup> {
        self.groups.get(id)
    }

    pub fn get_mut(&mut self, id: DoorGroupId) -> Option<&mut DoorGroup> {
        self.groups.get_mut(id)
    }

    pub fn cancel_all(&mut self) {
        for group in &mut self.groups {
            group.cancel();
        }
    }
}
