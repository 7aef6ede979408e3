use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::models::{RollOutcome, RollRequest};

use super::dice_service::ValidatedRoll;

/// Source of uniformly distributed integers.
///
/// The roller draws every die through this trait so tests can substitute a
/// deterministic sequence.
pub trait RandomSource: Send + Sync {
    /// Draw an integer in `low..=high`.
    fn gen_inclusive(&self, low: u32, high: u32) -> u32;
}

/// Thread-local `rand` generator. Not cryptographically meaningful, which is
/// fine for dice.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn gen_inclusive(&self, low: u32, high: u32) -> u32 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Reproducible generator seeded once at construction.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn gen_inclusive(&self, low: u32, high: u32) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(low..=high)
    }
}

/// Replays a fixed list of values, cycling when exhausted. Values are
/// clamped into the requested range.
#[derive(Debug)]
pub struct ScriptedRandom {
    values: Mutex<VecDeque<u32>>,
}

impl ScriptedRandom {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn gen_inclusive(&self, low: u32, high: u32) -> u32 {
        let mut values = self
            .values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match values.pop_front() {
            Some(value) => {
                values.push_back(value);
                value.clamp(low, high)
            }
            None => low,
        }
    }
}

/// Rolls validated requests.
#[derive(Clone)]
pub struct Roller {
    random: Arc<dyn RandomSource>,
}

impl Roller {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn roll(&self, roll: &ValidatedRoll) -> RollOutcome {
        let request: &RollRequest = roll.request();
        let rolls = (0..request.count)
            .map(|_| self.random.gen_inclusive(1, request.sides))
            .collect();
        RollOutcome::from_rolls(rolls, request.modifier)
    }
}

impl std::fmt::Debug for Roller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roller").finish_non_exhaustive()
    }
}
