//! Injectable jitter for simulated "actual" readings.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::round1;

/// Source of bounded uniform jitter.
pub trait NoiseSource {
    /// A draw from `U(-scale, scale)`
    fn jitter(&mut self, scale: f64) -> f64;

    /// `value` plus jitter, rounded to one decimal
    fn add_noise(&mut self, value: f64, scale: f64) -> f64 {
        round1(value + self.jitter(scale))
    }
}

/// Production noise backed by a [`StdRng`]
pub struct UniformNoise {
    rng: StdRng,
}

impl UniformNoise {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Default for UniformNoise {
    fn default() -> Self {
        Self::new(None)
    }
}

impl NoiseSource for UniformNoise {
    fn jitter(&mut self, scale: f64) -> f64 {
        if scale <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-scale..=scale)
    }
}

/// Always draws zero; makes every forecast fully deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl NoiseSource for Silent {
    fn jitter(&mut self, _scale: f64) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_bounded() {
        let mut noise = UniformNoise::new(Some(7));
        for _ in 0..1000 {
            let j = noise.jitter(0.8);
            assert!((-0.8..=0.8).contains(&j));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = UniformNoise::new(Some(42));
        let mut b = UniformNoise::new(Some(42));
        for _ in 0..10 {
            assert_eq!(a.add_noise(130.0, 3.0), b.add_noise(130.0, 3.0));
        }
    }

    #[test]
    fn test_silent_only_rounds() {
        assert_eq!(Silent.add_noise(142.04, 8.0), 142.0);
        assert_eq!(UniformNoise::default().jitter(0.0), 0.0);
    }
}
