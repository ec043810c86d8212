//! Selection operators
//!
//! Fitness values minimize, so roulette selection first converts them to
//! strictly positive weights with [`transform_to_max`], then draws from a
//! cumulative prefix-sum index. The index also supports in-place removal
//! so steady-state replacement can draw without replacement.

use rand::Rng;

use crate::operators::traits::SelectionOperator;

/// Additive floor keeping transformed weights strictly positive
pub const WEIGHT_FLOOR: f64 = 1e-6;

/// Convert minimizing fitness values into positive selection weights
///
/// Each weight is `max - fitness + WEIGHT_FLOOR`, so the best (lowest)
/// fitness receives the largest weight and even the worst individual
/// keeps a non-zero chance of selection.
pub fn transform_to_max(fitnesses: &[f64]) -> Vec<f64> {
    assert!(!fitnesses.is_empty(), "fitness slice cannot be empty");

    let max = fitnesses
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    fitnesses.iter().map(|f| max - f + WEIGHT_FLOOR).collect()
}

/// Cumulative prefix-sum index over positive selection weights
///
/// Entry `i` stores the sum of all weights up to and including weight
/// `i`, so a uniform draw in `[0, total)` maps to an index by binary
/// search. Weights must be strictly positive or the search degenerates.
#[derive(Clone, Debug)]
pub struct CumulativeFitness {
    cumulative: Vec<f64>,
}

impl CumulativeFitness {
    /// Build the index from a slice of positive weights
    pub fn from_weights(weights: &[f64]) -> Self {
        let mut cumulative = Vec::with_capacity(weights.len());
        let mut total = 0.0;
        for w in weights {
            total += w;
            cumulative.push(total);
        }
        Self { cumulative }
    }

    /// Append more weights, continuing from the current total
    pub fn extend(&mut self, weights: &[f64]) {
        let mut total = self.total();
        self.cumulative.reserve(weights.len());
        for w in weights {
            total += w;
            self.cumulative.push(total);
        }
    }

    /// Number of entries in the index
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Sum of all weights in the index
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// The cumulative values, for inspection
    pub fn values(&self) -> &[f64] {
        &self.cumulative
    }

    /// Draw an index with probability proportional to its weight
    ///
    /// Draws uniformly in `[0, total)` and returns the leftmost entry
    /// whose cumulative value exceeds the draw.
    pub fn toss<R: Rng>(&self, rng: &mut R) -> usize {
        assert!(!self.is_empty(), "cannot toss on an empty index");

        let u = rng.gen_range(0.0..self.total());
        self.cumulative.partition_point(|&c| c <= u)
    }

    /// Remove the entry at `index`, whose weight is `weight`
    ///
    /// All subsequent cumulative values shrink by the removed weight, so
    /// the index stays equivalent to one rebuilt from the remaining
    /// weights.
    pub fn remove(&mut self, index: usize, weight: f64) {
        assert!(index < self.cumulative.len(), "index out of bounds");

        self.cumulative.remove(index);
        for c in &mut self.cumulative[index..] {
            *c -= weight;
        }
    }
}

/// Roulette wheel selection (fitness proportionate)
///
/// Selection probability is proportional to the transformed weight, so
/// lower fitness means higher selection pressure.
#[derive(Clone, Debug, Default)]
pub struct RouletteSelection;

impl RouletteSelection {
    /// Create a new roulette selection
    pub fn new() -> Self {
        Self
    }
}

impl SelectionOperator for RouletteSelection {
    fn select<R: Rng>(&self, fitnesses: &[f64], rng: &mut R) -> usize {
        let weights = transform_to_max(fitnesses);
        CumulativeFitness::from_weights(&weights).toss(rng)
    }
}
