//! Uniform random source used by every stochastic roll in the simulation.
//!
//! Any `rand::RngCore` is a [`RandomSource`], so sessions plug in a seeded
//! `ChaCha8Rng`; tests can pin individual rolls with [`FixedSource`] or
//! [`ScriptedSource`].

use rand::{Rng, RngCore};
use std::collections::VecDeque;

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Always yields the same value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedSource(pub f64);

impl RandomSource for FixedSource {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// Yields a scripted sequence, then repeats the fallback forever.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedSource {
    values: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback,
        }
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(self.fallback)
    }
}

/// Uniform index into a non-empty slice of length `len`.
pub fn pick_index(rng: &mut dyn RandomSource, len: usize) -> usize {
    let i = (rng.next_f64() * len as f64).floor() as usize;
    i.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..16 {
            let x = a.next_f64();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x, b.next_f64());
        }
    }

    #[test]
    fn works_through_trait_object() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let src: &mut dyn RandomSource = &mut rng;
        assert!(src.next_f64() < 1.0);
    }

    #[test]
    fn scripted_source_falls_back() {
        let mut s = ScriptedSource::new([0.1, 0.2], 0.9);
        assert_eq!(s.next_f64(), 0.1);
        assert_eq!(s.next_f64(), 0.2);
        assert_eq!(s.next_f64(), 0.9);
    }

    #[test]
    fn pick_index_stays_in_bounds() {
        assert_eq!(pick_index(&mut FixedSource(0.0), 6), 0);
        assert_eq!(pick_index(&mut FixedSource(0.999_999), 6), 5);
        assert_eq!(pick_index(&mut FixedSource(0.5), 1), 0);
    }
}
