//! Pair selection for the next comparison

use crate::error::{ArenaError, Result};
use crate::types::College;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Mutex;

/// Trait for choosing which two colleges are shown next
pub trait PairingSelector: Send + Sync {
    /// Pick two distinct colleges, or fail with `NotEnoughColleges`
    fn select_pair(&self, colleges: &[College]) -> Result<(College, College)>;
}

/// Uniform random pairing without replacement
#[derive(Debug)]
pub struct RandomPairingSelector {
    rng: Mutex<StdRng>,
}

impl RandomPairingSelector {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic selector for tests and reproducible simulations
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomPairingSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl PairingSelector for RandomPairingSelector {
    fn select_pair(&self, colleges: &[College]) -> Result<(College, College)> {
        if colleges.len() < 2 {
            return Err(ArenaError::NotEnoughColleges {
                available: colleges.len(),
            }
            .into());
        }

        let mut rng = self.rng.lock().map_err(|_| ArenaError::InternalError {
            message: "Failed to acquire pairing rng lock".to_string(),
        })?;

        let picked: Vec<&College> = colleges.choose_multiple(&mut *rng, 2).collect();
        match picked.as_slice() {
            [first, second] => Ok(((*first).clone(), (*second).clone())),
            _ => Err(ArenaError::InternalError {
                message: "Random pairing returned fewer than two colleges".to_string(),
            }
            .into()),
        }
    }
}
