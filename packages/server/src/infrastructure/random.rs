//! RandomSource implementations backed by `rand`.

use std::sync::Mutex;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::domain::RandomSource;

/// Thread-local RNG, used by the server binary
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn roll_die(&self, sides: u8) -> u8 {
        rand::rng().random_range(1..=sides.max(1))
    }

    fn pick_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len.max(1))
    }
}

/// Deterministic RNG for tests and replays
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
    fn roll_die(&self, sides: u8) -> u8 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(1..=sides.max(1))
    }

    fn pick_index(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.random_range(0..len.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolls_stay_within_die_faces() {
        // テスト項目: 出目は常に 1..=面数 に収まる
        // given (前提条件):
        let random = ThreadRandom;

        // when (操作):
        let rolls: Vec<u8> = (0..200).map(|_| random.roll_die(6)).collect();

        // then (期待する結果):
        assert!(rolls.iter().all(|roll| (1..=6).contains(roll)));
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        // テスト項目: 同じシードからは同じ乱数列が得られる
        // given (前提条件):
        let first = SeededRandom::new(42);
        let second = SeededRandom::new(42);

        // when (操作):
        let a: Vec<usize> = (0..20).map(|_| first.pick_index(10)).collect();
        let b: Vec<usize> = (0..20).map(|_| second.pick_index(10)).collect();

        // then (期待する結果):
        assert_eq!(a, b);
        assert!(a.iter().all(|index| *index < 10));
    }
}
