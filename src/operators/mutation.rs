//! Mutation operators
//!
//! Swap mutation perturbs permutations, bit-flip mutation perturbs bit
//! strings; [`mutate_population`] applies either across a population as
//! independent Bernoulli trials.

use rand::Rng;

use crate::genome::bit_string::BitString;
use crate::genome::permutation::Permutation;
use crate::genome::traits::EvolutionaryGenome;
use crate::operators::traits::MutationOperator;
use crate::population::population::Population;

/// Swap mutation for permutation genotypes
///
/// Exchanges the values at two distinct random positions, which
/// trivially preserves the permutation invariant.
#[derive(Clone, Debug, Default)]
pub struct SwapMutation;

impl SwapMutation {
    /// Create a new swap mutation
    pub fn new() -> Self {
        Self
    }
}

impl MutationOperator<Permutation> for SwapMutation {
    fn mutate<R: Rng>(&self, genome: &mut Permutation, rng: &mut R) {
        let n = genome.len();
        assert!(n >= 2, "swap mutation needs at least 2 elements");

        let positions = rand::seq::index::sample(rng, n, 2);
        genome.swap(positions.index(0), positions.index(1));
    }
}

/// Bit-flip mutation for bit-string genotypes
///
/// Flips the bit at one random position.
#[derive(Clone, Debug, Default)]
pub struct BitFlipMutation;

impl BitFlipMutation {
    /// Create a new bit-flip mutation
    pub fn new() -> Self {
        Self
    }
}

impl MutationOperator<BitString> for BitFlipMutation {
    fn mutate<R: Rng>(&self, genome: &mut BitString, rng: &mut R) {
        assert!(!genome.is_empty(), "cannot flip a bit of an empty string");

        let position = rng.gen_range(0..genome.len());
        genome.flip(position);
    }
}

/// Mutate each individual of a population independently with probability
/// `mutation_proba`
///
/// Decisions are independent Bernoulli trials with no correlation or
/// adaptive rate. Mutated individuals lose any cached fitness so a later
/// evaluation pass re-scores them.
pub fn mutate_population<G, M, R>(
    population: &mut Population<G>,
    operator: &M,
    mutation_proba: f64,
    rng: &mut R,
) where
    G: EvolutionaryGenome,
    M: MutationOperator<G>,
    R: Rng,
{
    assert!(
        (0.0..=1.0).contains(&mutation_proba),
        "mutation probability must be in [0, 1]"
    );

    for individual in population.iter_mut() {
        if rng.gen::<f64>() < mutation_proba {
            operator.mutate(&mut individual.genome, rng);
            individual.fitness = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::traits::{BinaryGenome, PermutationGenome};
    use crate::population::individual::Individual;

    #[test]
    fn test_swap_mutation_stays_valid() {
        let mut rng = rand::thread_rng();
        let mutation = SwapMutation::new();

        for _ in 0..100 {
            let mut genome = Permutation::random(8, &mut rng);
            mutation.mutate(&mut genome, &mut rng);

            assert!(genome.is_valid_permutation());
            assert_eq!(genome.len(), 8);
        }
    }

    #[test]
    fn test_swap_mutation_changes_exactly_two_positions() {
        let mut rng = rand::thread_rng();
        let mutation = SwapMutation::new();

        for _ in 0..100 {
            let original = Permutation::identity(10);
            let mut genome = original.clone();
            mutation.mutate(&mut genome, &mut rng);

            let mismatches = (0..10).filter(|&i| genome[i] != original[i]).count();
            assert_eq!(mismatches, 2);
        }
    }

    #[test]
    #[should_panic(expected = "at least 2 elements")]
    fn test_swap_mutation_too_short() {
        let mut rng = rand::thread_rng();
        let mutation = SwapMutation::new();
        let mut genome = Permutation::identity(1);
        mutation.mutate(&mut genome, &mut rng);
    }

    #[test]
    fn test_bit_flip_mutation_flips_one_bit() {
        let mut rng = rand::thread_rng();
        let mutation = BitFlipMutation::new();

        for _ in 0..100 {
            let original = BitString::random(&mut rng, 16);
            let mut genome = original.clone();
            mutation.mutate(&mut genome, &mut rng);

            assert_eq!(genome.hamming_distance(&original), 1);
        }
    }

    #[test]
    #[should_panic(expected = "empty string")]
    fn test_bit_flip_mutation_empty() {
        let mut rng = rand::thread_rng();
        let mutation = BitFlipMutation::new();
        let mut genome = BitString::zeros(0);
        mutation.mutate(&mut genome, &mut rng);
    }

    #[test]
    fn test_mutate_population_bernoulli_rate() {
        let mut rng = rand::thread_rng();
        let mut population = Population::from_individuals(
            (0..2000)
                .map(|_| Individual::new(BitString::zeros(8)))
                .collect(),
        );

        mutate_population(&mut population, &BitFlipMutation::new(), 0.1, &mut rng);

        // Each mutated genome has exactly one set bit.
        let mutated = population
            .iter()
            .filter(|i| i.genome.count_ones() == 1)
            .count();
        assert!(
            (125..=275).contains(&mutated),
            "mutated {mutated} of 2000 at rate 0.1"
        );
    }

    #[test]
    fn test_mutate_population_zero_probability() {
        let mut rng = rand::thread_rng();
        let mut population = Population::from_individuals(
            (0..100)
                .map(|_| Individual::new(BitString::zeros(8)))
                .collect(),
        );

        mutate_population(&mut population, &BitFlipMutation::new(), 0.0, &mut rng);

        assert!(population.iter().all(|i| i.genome.count_ones() == 0));
    }

    #[test]
    fn test_mutate_population_full_probability() {
        let mut rng = rand::thread_rng();
        let mut population = Population::from_individuals(
            (0..100)
                .map(|_| Individual::new(BitString::zeros(8)))
                .collect(),
        );

        mutate_population(&mut population, &BitFlipMutation::new(), 1.0, &mut rng);

        assert!(population.iter().all(|i| i.genome.count_ones() == 1));
    }

    #[test]
    fn test_mutate_population_resets_fitness() {
        let mut rng = rand::thread_rng();
        let mut population = Population::from_individuals(
            (0..50)
                .map(|_| Individual::with_fitness(BitString::zeros(8), 8.0))
                .collect(),
        );

        mutate_population(&mut population, &BitFlipMutation::new(), 1.0, &mut rng);

        assert!(population.iter().all(|i| !i.is_evaluated()));
    }

    #[test]
    #[should_panic(expected = "must be in [0, 1]")]
    fn test_mutate_population_invalid_probability() {
        let mut rng = rand::thread_rng();
        let mut population: Population<BitString> =
            Population::from_individuals(vec![Individual::new(BitString::zeros(8))]);
        mutate_population(&mut population, &BitFlipMutation::new(), 1.5, &mut rng);
    }
}
