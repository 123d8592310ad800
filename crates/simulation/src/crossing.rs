//! The quadruple crossing: drain every train to a stop at its lap
//! boundary, then release them all at once onto swapped routes.
//!
//! Arming sets how many arrivals the barrier waits for. Each train that
//! reaches its lap boundary while the barrier is draining parks and
//! counts down once. The release fires on the first tick where the count
//! is zero and no train is still running, and only once per arming.

use bevy::prelude::*;

use crate::simulation_sets::SimulationSet;
use crate::train_motion::TrainFleet;

/// Route each train moves to on release, indexed by its current route.
pub const DEFAULT_CROSSING_PERMUTATION: [usize; 4] = [3, 2, 1, 0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierState {
    Idle,
    Draining { pending: u32 },
}

#[derive(Resource, Debug, Clone)]
pub struct CrossingBarrier {
    state: BarrierState,
    permutation: Vec<usize>,
    releases: u32,
}

impl Default for CrossingBarrier {
    fn default() -> Self {
        Self::new(DEFAULT_CROSSING_PERMUTATION.to_vec())
    }
}

impl CrossingBarrier {
    pub fn new(permutation: Vec<usize>) -> Self {
        Self {
            state: BarrierState::Idle,
            permutation,
            releases: 0,
        }
    }

    pub fn state(&self) -> BarrierState {
        self.state
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// How many times the barrier has released.
    pub fn releases(&self) -> u32 {
        self.releases
    }

    pub fn is_draining(&self) -> bool {
        matches!(self.state, BarrierState::Draining { .. })
    }

    /// Arrivals still expected.
    pub fn pending(&self) -> u32 {
        match self.state {
            BarrierState::Idle => 0,
            BarrierState::Draining { pending } => pending,
        }
    }

    /// Start draining `trains` trains. Ignored while already draining.
    pub fn arm(&mut self, trains: u32) -> bool {
        if self.is_draining() || trains == 0 {
            return false;
        }
        self.state = BarrierState::Draining { pending: trains };
        true
    }

    /// One train has parked.
    pub fn arrive(&mut self) {
        if let BarrierState::Draining { pending } = &mut self.state {
            *pending = pending.saturating_sub(1);
        }
    }

    /// Release if every expected train has arrived and none is running.
    pub fn try_release(&mut self, running: usize) -> bool {
        match self.state {
            BarrierState::Draining { pending: 0 } if running == 0 => {
                self.state = BarrierState::Idle;
                self.releases += 1;
                true
            }
            _ => false,
        }
    }
}

/// Release parked trains once the barrier opens.
pub fn release_crossing(mut barrier: ResMut<CrossingBarrier>, mut fleet: ResMut<TrainFleet>) {
    if !barrier.is_draining() {
        return;
    }
    if barrier.try_release(fleet.running_count()) {
        fleet.release_parked(barrier.permutation());
        info!(
            "Crossing released {} trains (release #{})",
            fleet.trains.len(),
            barrier.releases()
        );
    }
}

pub struct CrossingPlugin;

impl Plugin for CrossingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CrossingBarrier>().add_systems(
            FixedUpdate,
            release_crossing.in_set(SimulationSet::Crossing),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barrier_releases_exactly_once() {
        let mut barrier = CrossingBarrier::default();
        assert!(barrier.arm(4));
        for arrived in 1..=4u32 {
            assert!(!barrier.try_release(0), "released early");
            barrier.arrive();
            assert_eq!(barrier.pending(), 4 - arrived);
        }
        assert!(barrier.try_release(0));
        assert!(!barrier.try_release(0));
        assert_eq!(barrier.releases(), 1);
        assert_eq!(barrier.pending(), 0);
        assert_eq!(barrier.state(), BarrierState::Idle);
    }

    #[test]
    fn test_barrier_waits_for_running_trains() {
        let mut barrier = CrossingBarrier::default();
        barrier.arm(2);
        barrier.arrive();
        barrier.arrive();
        assert!(!barrier.try_release(1));
        assert!(barrier.try_release(0));
    }

    #[test]
    fn test_arm_ignored_while_draining() {
        let mut barrier = CrossingBarrier::default();
        assert!(barrier.arm(4));
        barrier.arrive();
        assert!(!barrier.arm(4));
        assert_eq!(barrier.pending(), 3);
    }

    #[test]
    fn test_arrive_when_idle_is_noop() {
        let mut barrier = CrossingBarrier::default();
        barrier.arrive();
        assert_eq!(barrier.state(), BarrierState::Idle);
        assert!(!barrier.try_release(0));
    }

    #[test]
    fn test_default_permutation_swaps_pairs() {
        assert_eq!(CrossingBarrier::default().permutation(), &[3, 2, 1, 0]);
    }
}
