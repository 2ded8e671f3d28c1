//! Shuffle index selection
//!
//! Shuffle mode never reorders the catalog; each advance draws a fresh random
//! index that differs from the current one. The randomness source is pluggable
//! so tests can be deterministic.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniformly distributed indices
pub trait IndexSource {
    /// Uniform index in `0..upper` (`upper` is always at least 1)
    fn pick(&mut self, upper: usize) -> usize;
}

impl<F> IndexSource for F
where
    F: FnMut(usize) -> usize,
{
    fn pick(&mut self, upper: usize) -> usize {
        self(upper)
    }
}

/// Thread-local RNG (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl IndexSource for ThreadRngSource {
    fn pick(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Reproducible RNG for tests and replays
#[derive(Debug, Clone)]
pub struct SeededSource(StdRng);

impl SeededSource {
    /// Create from a seed
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl IndexSource for SeededSource {
    fn pick(&mut self, upper: usize) -> usize {
        self.0.gen_range(0..upper)
    }
}

/// Pick a random index in `0..len` other than `current`
///
/// Draws once from the `len - 1` other slots, so every other index is equally
/// likely. With fewer than two tracks there is nothing else to pick and
/// `current` comes back unchanged.
pub fn pick_other_index(source: &mut dyn IndexSource, len: usize, current: usize) -> usize {
    if len <= 1 {
        return current;
    }

    // Out-of-range draws from a misbehaving source are folded back in.
    let offset = source.pick(len - 1) % (len - 1);
    if offset >= current {
        offset + 1
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn never_returns_current() {
        let mut source = SeededSource::new(7);

        for len in 2..12 {
            for current in 0..len {
                for _ in 0..50 {
                    let picked = pick_other_index(&mut source, len, current);
                    assert_ne!(picked, current);
                    assert!(picked < len);
                }
            }
        }
    }

    #[test]
    fn covers_every_other_index() {
        let mut source = SeededSource::new(42);
        let mut seen = HashSet::new();

        for _ in 0..500 {
            seen.insert(pick_other_index(&mut source, 5, 2));
        }

        assert_eq!(seen, HashSet::from([0, 1, 3, 4]));
    }

    #[test]
    fn single_track_stays_put() {
        let mut source = ThreadRngSource;
        assert_eq!(pick_other_index(&mut source, 1, 0), 0);
    }

    #[test]
    fn scripted_source_maps_around_current() {
        // Draws are offsets into the "other" slots: 0 and 1 with current = 1
        // must land on indices 0 and 2.
        let mut draws = vec![1, 0].into_iter();
        let mut source = move |_upper: usize| draws.next().unwrap_or(0);

        assert_eq!(pick_other_index(&mut source, 3, 1), 2);
        assert_eq!(pick_other_index(&mut source, 3, 1), 0);
    }

    #[test]
    fn out_of_range_draws_are_folded() {
        let mut source = |_upper: usize| 1000;
        let picked = pick_other_index(&mut source, 4, 0);
        assert!(picked > 0 && picked < 4);
    }
}
