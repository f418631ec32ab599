//! Random sources for feature subsets and bootstrap samples.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The random source the trees and the forest draw from.
pub trait Sampler {
    /// Choose `k` distinct items of `items` uniformly, in the order they were drawn. Returns all
    /// items (shuffled) when `k >= items.len()`.
    fn sample_names(&mut self, items: &[String], k: usize) -> Vec<String>;

    /// Draw `n` row indices from `0..len` uniformly with replacement.
    fn bootstrap(&mut self, len: usize, n: usize) -> Vec<usize>;

    /// A fresh seed for a child sampler, e.g. one per forest tree.
    fn next_seed(&mut self) -> u64;
}

/// Number of features visible at a node in random-subset mode: `floor(log2(n + 1))`.
///
/// # Example
/// ```
/// use dtree::sampling::feature_subset_size;
/// assert_eq!(feature_subset_size(1), 1);
/// assert_eq!(feature_subset_size(3), 2);
/// assert_eq!(feature_subset_size(10), 3);
/// ```
pub fn feature_subset_size(n: usize) -> usize {
    // floor(log2(n + 1)) is the index of the highest set bit of n + 1
    let m = n + 1;
    (usize::BITS - 1 - m.leading_zeros()) as usize
}

/// [`Sampler`] backed by a [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
}

impl RandomSampler {
    pub fn seeded(seed: u64) -> Self {
        RandomSampler {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        RandomSampler {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when `seed` is given, from entropy otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Sampler for RandomSampler {
    fn sample_names(&mut self, items: &[String], k: usize) -> Vec<String> {
        let k = k.min(items.len());
        items
            .choose_multiple(&mut self.rng, k)
            .cloned()
            .collect()
    }

    fn bootstrap(&mut self, len: usize, n: usize) -> Vec<usize> {
        if len == 0 {
            return Vec::new();
        }
        (0..n).map(|_| self.rng.gen_range(0..len)).collect()
    }

    fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }
}
