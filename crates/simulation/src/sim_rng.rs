//! Seeded randomness for ambient layovers.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed of the built-in layout.
pub const LAYOUT_SEED: u64 = 42;

/// The only source of randomness in the simulation. Two runs with the same
/// seed see the same layovers.
#[derive(Resource, Debug, Clone)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::seeded(LAYOUT_SEED)
    }
}

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train_motion::{Train, TrainPhase};

    fn layovers(rng: &mut SimRng, trains: usize) -> Vec<TrainPhase> {
        (0..trains)
            .map(|i| Train::new(i as u32, "t", 0, 1).with_layover(&mut rng.0).phase())
            .collect()
    }

    #[test]
    fn test_same_seed_same_layovers() {
        let a = layovers(&mut SimRng::seeded(9), 4);
        let b = layovers(&mut SimRng::seeded(9), 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_layovers() {
        let a = layovers(&mut SimRng::seeded(1), 8);
        let b = layovers(&mut SimRng::default(), 8);
        assert_ne!(a, b);
    }
}
