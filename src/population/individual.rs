//! Individual wrapper type
//!
//! This module provides the Individual type pairing a genome with its
//! fitness. Fitness is an `f64` and lower is better everywhere in the
//! crate; selection converts to positive weights where it needs them.

use serde::{Deserialize, Serialize};

use crate::genome::traits::EvolutionaryGenome;

/// An individual in the population
///
/// Wraps a genome with its computed fitness value. `fitness` is `None`
/// until the genome has been evaluated.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Individual<G>
where
    G: EvolutionaryGenome,
{
    /// The genome of this individual
    pub genome: G,
    /// The fitness value (None if not yet evaluated); lower is better
    pub fitness: Option<f64>,
}

impl<G> Individual<G>
where
    G: EvolutionaryGenome,
{
    /// Create a new individual with an unevaluated genome
    pub fn new(genome: G) -> Self {
        Self {
            genome,
            fitness: None,
        }
    }

    /// Create a new individual with a known fitness
    pub fn with_fitness(genome: G, fitness: f64) -> Self {
        Self {
            genome,
            fitness: Some(fitness),
        }
    }

    /// Check if this individual has been evaluated
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Get the fitness value, panicking if not evaluated
    pub fn fitness_value(&self) -> f64 {
        self.fitness.expect("Individual has not been evaluated")
    }

    /// Set the fitness value
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Take the genome out of this individual
    pub fn into_genome(self) -> G {
        self.genome
    }

    /// Get a reference to the genome
    pub fn genome(&self) -> &G {
        &self.genome
    }

    /// Get a mutable reference to the genome
    pub fn genome_mut(&mut self) -> &mut G {
        &mut self.genome
    }

    /// Check if this individual is better (lower fitness) than another
    ///
    /// An evaluated individual always beats an unevaluated one.
    pub fn is_better_than(&self, other: &Self) -> bool {
        match (self.fitness, other.fitness) {
            (Some(f1), Some(f2)) => f1 < f2,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => false,
        }
    }
}

impl<G> PartialEq for Individual<G>
where
    G: EvolutionaryGenome + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.genome == other.genome && self.fitness == other.fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::bit_string::BitString;

    #[test]
    fn test_individual_new() {
        let genome = BitString::zeros(4);
        let individual = Individual::new(genome);

        assert!(!individual.is_evaluated());
        assert_eq!(individual.fitness, None);
    }

    #[test]
    fn test_individual_with_fitness() {
        let genome = BitString::zeros(4);
        let individual = Individual::with_fitness(genome, 42.0);

        assert!(individual.is_evaluated());
        assert_eq!(individual.fitness_value(), 42.0);
    }

    #[test]
    fn test_individual_set_fitness() {
        let genome = BitString::zeros(4);
        let mut individual = Individual::new(genome);

        assert!(!individual.is_evaluated());
        individual.set_fitness(100.0);
        assert!(individual.is_evaluated());
        assert_eq!(individual.fitness_value(), 100.0);
    }

    #[test]
    #[should_panic(expected = "has not been evaluated")]
    fn test_individual_fitness_value_unevaluated() {
        let individual = Individual::new(BitString::zeros(4));
        individual.fitness_value();
    }

    #[test]
    fn test_individual_is_better_than_minimizes() {
        let ind1 = Individual::with_fitness(BitString::zeros(4), 50.0);
        let ind2 = Individual::with_fitness(BitString::ones(4), 100.0);

        assert!(ind1.is_better_than(&ind2));
        assert!(!ind2.is_better_than(&ind1));
    }

    #[test]
    fn test_individual_is_better_than_unevaluated() {
        let ind1 = Individual::with_fitness(BitString::zeros(4), 100.0);
        let ind2 = Individual::new(BitString::ones(4));

        assert!(ind1.is_better_than(&ind2));
        assert!(!ind2.is_better_than(&ind1));
    }

    #[test]
    fn test_individual_into_genome() {
        let genome = BitString::new(vec![true, false, true]);
        let individual = Individual::with_fitness(genome.clone(), 42.0);

        let recovered = individual.into_genome();
        assert_eq!(recovered, genome);
    }

    #[test]
    fn test_individual_genome_mut() {
        let genome = BitString::zeros(3);
        let mut individual = Individual::new(genome);

        individual.genome_mut().flip(0);
        assert!(individual.genome()[0]);
    }

    #[test]
    fn test_individual_serialization() {
        let individual = Individual::with_fitness(BitString::new(vec![true, false]), 7.5);
        let serialized = serde_json::to_string(&individual).unwrap();
        let deserialized: Individual<BitString> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(individual, deserialized);
    }
}
