//! Deterministic RNG for turn resolution
//!
//! Every probabilistic outcome (hit rolls, crit rolls, spawn placement)
//! flows through the [`GameRng`] trait so tests can seed or script it.
//! The browser engine seeds from JavaScript; tests use fixed seeds.

use serde::{Deserialize, Serialize};

/// Trait for random number generation during turn resolution
pub trait GameRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Roll an event with the given success rate.
    ///
    /// Rates at or beyond the [0, 1] bounds are certain, so a card with
    /// `hit_rate = 1.0` can never miss.
    fn chance(&mut self, rate: f32) -> bool {
        if rate >= 1.0 {
            return true;
        }
        if rate <= 0.0 {
            return false;
        }
        (self.next_u32() as f64) < f64::from(rate) * (f64::from(u32::MAX) + 1.0)
    }
}

/// XorShift32 RNG - simple, fast, deterministic
///
/// Suitable for game logic where cryptographic security is not needed.
/// The same seed will always produce the same sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Create a new RNG from a u64 seed
    ///
    /// The seed is combined into a u32, ensuring state is never 0.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }

    /// Create a new RNG from a u32 seed
    pub fn seed_from_u32(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }
}

impl GameRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xorshift_deterministic() {
        let mut rng1 = XorShiftRng::seed_from_u64(12345);
        let mut rng2 = XorShiftRng::seed_from_u64(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_xorshift_different_seeds() {
        let mut rng1 = XorShiftRng::seed_from_u64(12345);
        let mut rng2 = XorShiftRng::seed_from_u64(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_gen_range() {
        let mut rng = XorShiftRng::seed_from_u64(42);

        for _ in 0..100 {
            let val = rng.gen_range(10);
            assert!(val < 10);
        }
    }

    #[test]
    fn test_chance_is_certain_at_bounds() {
        let mut rng = XorShiftRng::seed_from_u64(42);

        for _ in 0..100 {
            assert!(rng.chance(1.0));
            assert!(!rng.chance(0.0));
        }
    }

    #[test]
    fn test_chance_tracks_rate() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let hits = (0..10_000).filter(|_| rng.chance(0.8)).count();

        // 0.8 +/- a generous tolerance over 10k rolls
        assert!(hits > 7_500 && hits < 8_500, "got {hits} hits");
    }
}
