//! Fitness traits
//!
//! This module defines the fitness evaluation trait. Fitness values are
//! plain `f64` and lower is always better; operators that need positive
//! weights (roulette selection) convert internally.

use crate::genome::traits::EvolutionaryGenome;

/// Fitness evaluation trait
///
/// Defines how to evaluate the fitness of a genome. The genome is passed
/// mutably so wrappers like [`TwoOptRefinement`] can improve it in place
/// before scoring; plain objectives just read it.
///
/// [`TwoOptRefinement`]: crate::local_search::TwoOptRefinement
pub trait Fitness: Send + Sync {
    /// The genome type being evaluated
    type Genome: EvolutionaryGenome;

    /// Evaluate fitness (lower = better)
    fn evaluate(&self, genome: &mut Self::Genome) -> f64;
}

/// A simple function wrapper for fitness evaluation
///
/// Adapts a plain objective closure taking `&G` to the [`Fitness`] trait.
pub struct FnFitness<G, F>
where
    F: Fn(&G) -> f64,
{
    f: F,
    _marker: std::marker::PhantomData<G>,
}

impl<G, F> FnFitness<G, F>
where
    F: Fn(&G) -> f64,
{
    /// Create a new function-based fitness evaluator
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<G, F> Fitness for FnFitness<G, F>
where
    G: EvolutionaryGenome,
    F: Fn(&G) -> f64 + Send + Sync,
{
    type Genome = G;

    fn evaluate(&self, genome: &mut Self::Genome) -> f64 {
        (self.f)(genome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::bit_string::BitString;
    use crate::genome::traits::BinaryGenome;

    #[test]
    fn test_fn_fitness() {
        let fitness = FnFitness::new(|g: &BitString| g.count_zeros() as f64);

        let mut genome = BitString::from_u64(0b0101, 4);
        let value = fitness.evaluate(&mut genome);
        assert_eq!(value, 2.0);
    }

    #[test]
    fn test_fn_fitness_lower_is_better() {
        let fitness = FnFitness::new(|g: &BitString| g.count_zeros() as f64);

        let mut all_ones = BitString::ones(8);
        let mut all_zeros = BitString::zeros(8);

        assert!(fitness.evaluate(&mut all_ones) < fitness.evaluate(&mut all_zeros));
    }
}
