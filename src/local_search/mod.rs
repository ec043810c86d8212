//! 2-opt local search for permutation genomes
//!
//! First-improvement 2-opt over a fixed neighborhood enumeration: each
//! candidate move reverses a segment in place, keeps it on strict
//! improvement and undoes it otherwise. [`TwoOptRefinement`] packages
//! the search as a fitness function so the evolutionary loop can run as
//! a memetic algorithm without knowing local search is happening.

use crate::fitness::traits::Fitness;
use crate::genome::permutation::Permutation;

/// All segment endpoint pairs `(i, j)` with `1 <= i < j < sequence_len`
///
/// The enumeration order is fixed (i ascending, then j ascending), so
/// search over the neighborhood is deterministic for a given start.
pub fn segment_pairs(sequence_len: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 1..sequence_len {
        for j in (i + 1)..sequence_len {
            pairs.push((i, j));
        }
    }
    pairs
}

/// Refine a tour in place with first-improvement 2-opt
///
/// Runs `passes` sweeps over the whole neighborhood. Each candidate
/// segment is reversed, re-scored, and reversed back unless strictly
/// better. The tour always holds the best solution found and the best
/// score is returned. Position 0 never moves; a closed tour loses
/// nothing by pinning its starting point.
pub fn two_opt<F>(tour: &mut Permutation, mut objective: F, passes: usize) -> f64
where
    F: FnMut(&mut Permutation) -> f64,
{
    let mut best = objective(tour);
    let pairs = segment_pairs(tour.len());

    for _ in 0..passes {
        for &(i, j) in &pairs {
            tour.reverse_segment(i, j);
            let neighbor = objective(tour);

            if neighbor < best {
                best = neighbor;
            } else {
                tour.reverse_segment(i, j);
            }
        }
    }

    best
}

/// A fitness function that refines each genome with 2-opt before scoring
///
/// Wraps an inner objective; evaluating an individual first improves its
/// genome in place, then reports the improved score. To the driver this
/// is just a more expensive fitness function, which is all a memetic
/// hybridization needs.
#[derive(Clone, Debug)]
pub struct TwoOptRefinement<F> {
    inner: F,
    passes: usize,
}

impl<F> TwoOptRefinement<F>
where
    F: Fitness<Genome = Permutation>,
{
    /// Wrap an objective, refining with the given number of 2-opt passes
    pub fn new(inner: F, passes: usize) -> Self {
        Self { inner, passes }
    }

    /// The wrapped objective
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F> Fitness for TwoOptRefinement<F>
where
    F: Fitness<Genome = Permutation>,
{
    type Genome = Permutation;

    fn evaluate(&self, genome: &mut Permutation) -> f64 {
        two_opt(genome, |tour| self.inner.evaluate(tour), self.passes)
    }
}
