//! Operator traits
//!
//! This module defines the core operator traits for the evolutionary
//! engine. Selection works on the fitness column alone; crossover and
//! mutation work on genomes; replacement works on whole populations.

use rand::Rng;

use crate::error::{EvoResult, EvolutionError};
use crate::genome::traits::EvolutionaryGenome;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Retry budget when drawing a second parent distinct from the first
pub const MAX_DISTINCT_ATTEMPTS: usize = 64;

/// Selection operator trait
///
/// Selects individuals for reproduction. Only fitness values are
/// consulted, so the trait is not generic over the genome; the returned
/// index refers back into the population the fitness slice came from.
pub trait SelectionOperator: Send + Sync {
    /// Select a single individual, returning its index
    fn select<R: Rng>(&self, fitnesses: &[f64], rng: &mut R) -> usize;

    /// Select two distinct parents
    ///
    /// Redraws the second parent until it differs from the first. When a
    /// near-converged population keeps yielding the same index, gives up
    /// after [`MAX_DISTINCT_ATTEMPTS`] draws instead of spinning forever.
    fn select_distinct_pair<R: Rng>(
        &self,
        fitnesses: &[f64],
        rng: &mut R,
    ) -> EvoResult<(usize, usize)> {
        let first = self.select(fitnesses, rng);
        for _ in 0..MAX_DISTINCT_ATTEMPTS {
            let second = self.select(fitnesses, rng);
            if second != first {
                return Ok((first, second));
            }
        }
        Err(EvolutionError::DegenerateSelection {
            attempts: MAX_DISTINCT_ATTEMPTS,
        })
    }

    /// Select multiple individuals, with replacement
    fn select_many<R: Rng>(&self, fitnesses: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
        (0..count).map(|_| self.select(fitnesses, rng)).collect()
    }
}

/// Crossover operator trait
///
/// Combines genetic material from two parents to create two offspring.
/// Shape mismatches between parents are programming errors and panic at
/// the operator level.
pub trait CrossoverOperator<G: EvolutionaryGenome>: Send + Sync {
    /// Apply crossover to two parents and produce two offspring
    fn crossover<R: Rng>(&self, parent1: &G, parent2: &G, rng: &mut R) -> (G, G);
}

/// Mutation operator trait
///
/// Applies a random change to a genome in place.
pub trait MutationOperator<G: EvolutionaryGenome>: Send + Sync {
    /// Apply mutation to a genome in place
    fn mutate<R: Rng>(&self, genome: &mut G, rng: &mut R);
}

/// Replacement strategy trait
///
/// Forms the next generation from the parent and offspring populations.
/// Both populations are consumed so strategies can move individuals
/// instead of cloning them. `best_so_far` is the best individual seen
/// over the whole run, for strategies that re-inject it.
pub trait ReplacementStrategy<G: EvolutionaryGenome>: Send + Sync {
    /// Build the next generation of `next_size` individuals
    fn replace<R: Rng>(
        &self,
        parents: Population<G>,
        offspring: Population<G>,
        next_size: usize,
        best_so_far: Option<&Individual<G>>,
        rng: &mut R,
    ) -> Population<G>;
}
