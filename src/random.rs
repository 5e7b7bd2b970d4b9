//! Injectable random source.
//!
//! Every randomized decision in the engine (shuffle order, mutate-vs-crossover,
//! crossover partner, default individual generation) is drawn through
//! [`RandomSource::uniform`]. Fixing the source therefore fixes the run.
//!
//! Any [`rand::RngCore`] is a `RandomSource`; a plain closure can be used via
//! [`FnSource`].

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A uniform generator over `[0, 1)`.
pub trait RandomSource {
    /// Returns the next sample in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Returns an index in `0..n`.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    fn random_index(&mut self, n: usize) -> usize {
        assert!(n > 0, "cannot pick an index from an empty range");
        // A sloppy source may return exactly 1.0.
        ((self.uniform() * n as f64) as usize).min(n - 1)
    }

    /// Returns `true` with the given probability.
    fn random_boolean(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }

    /// Returns a value on the grid `min, min + step, ..., max` (both bounds inclusive).
    fn random_number(&mut self, min: f64, max: f64, step: f64) -> f64 {
        let range = ((max - min) / step + 1.0).floor();
        (self.uniform() * range).floor() * step + min
    }
}

impl<T: RngCore> RandomSource for T {
    fn uniform(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Adapts a closure returning samples in `[0, 1)` into a [`RandomSource`].
///
/// ```
/// use ga_island::random::{FnSource, RandomSource};
///
/// let mut src = FnSource(|| 0.75);
/// assert_eq!(src.random_index(4), 3);
/// ```
pub struct FnSource<F>(pub F);

impl<F: FnMut() -> f64> RandomSource for FnSource<F> {
    fn uniform(&mut self) -> f64 {
        (self.0)()
    }
}

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Unbiased in-place Fisher–Yates shuffle.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_index(i + 1);
        items.swap(i, j);
    }
}

/// Picks a uniformly random element, or `None` when `items` is empty.
pub fn random_element<'a, T, R: RandomSource + ?Sized>(
    items: &'a [T],
    rng: &mut R,
) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.random_index(items.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_uniform_range() {
        let mut rng = create_rng(7);
        for _ in 0..1000 {
            let x = rng.uniform();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_seed_reproducible() {
        let mut a = create_rng(42);
        let mut b = create_rng(42);
        let xs: Vec<f64> = (0..16).map(|_| a.uniform()).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.uniform()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_random_index_clamps_one() {
        let mut src = FnSource(|| 1.0);
        assert_eq!(src.random_index(5), 4);
        let mut src = FnSource(|| 0.0);
        assert_eq!(src.random_index(5), 0);
    }

    #[test]
    fn test_random_number_grid() {
        let mut rng = create_rng(3);
        for _ in 0..500 {
            let x = rng.random_number(0.0, 15.0, 1.0);
            assert!((0.0..=15.0).contains(&x));
            assert_eq!(x.fract(), 0.0);
        }
        let mut top = FnSource(|| 0.999_999);
        assert_eq!(top.random_number(2.0, 10.0, 2.0), 10.0);
    }

    #[test]
    fn test_random_bool_extremes() {
        let mut rng = create_rng(1);
        assert!((0..100).all(|_| !rng.random_boolean(0.0)));
        assert!((0..100).all(|_| rng.random_boolean(1.0)));
    }

    #[test]
    fn test_random_element_empty() {
        let mut rng = create_rng(1);
        let empty: [u8; 0] = [];
        assert!(random_element(&empty, &mut rng).is_none());
        assert_eq!(random_element(&[9], &mut rng), Some(&9));
    }

    #[test]
    fn test_shuffle_uses_source() {
        // Always picking j = 0 rotates the slice deterministically.
        let mut src = FnSource(|| 0.0);
        let mut xs = [0, 1, 2, 3];
        shuffle(&mut xs, &mut src);
        assert_eq!(xs, [1, 2, 3, 0]);
    }

    #[test]
    fn test_shuffle_covers_all_orders() {
        let mut rng = create_rng(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            let mut xs = [0u8, 1, 2];
            shuffle(&mut xs, &mut rng);
            seen.insert(xs);
        }
        assert_eq!(seen.len(), 6);
    }

    proptest! {
        #[test]
        fn prop_shuffle_is_permutation(mut xs in prop::collection::vec(any::<u32>(), 0..64), seed in any::<u64>()) {
            let mut sorted = xs.clone();
            sorted.sort_unstable();
            shuffle(&mut xs, &mut create_rng(seed));
            xs.sort_unstable();
            prop_assert_eq!(xs, sorted);
        }
    }
}
