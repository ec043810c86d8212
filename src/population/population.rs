//! Population type
//!
//! This module provides the Population container type.

use rand::Rng;

use crate::fitness::traits::Fitness;
use crate::genome::traits::EvolutionaryGenome;
use crate::population::individual::Individual;

/// A population of individuals
#[derive(Clone, Debug)]
pub struct Population<G>
where
    G: EvolutionaryGenome,
{
    /// The individuals in this population
    individuals: Vec<Individual<G>>,
    /// Current generation number
    generation: usize,
}

impl<G> Population<G>
where
    G: EvolutionaryGenome,
{
    /// Create an empty population
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
            generation: 0,
        }
    }

    /// Create a population with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
            generation: 0,
        }
    }

    /// Create a population from a vector of individuals
    pub fn from_individuals(individuals: Vec<Individual<G>>) -> Self {
        Self {
            individuals,
            generation: 0,
        }
    }

    /// Create a population by calling `init` once per individual
    ///
    /// The closure receives the RNG so genome constructors like
    /// `Permutation::random` or `BitString::random` can be plugged in
    /// directly.
    pub fn generate_with<R, Init>(size: usize, rng: &mut R, mut init: Init) -> Self
    where
        R: Rng,
        Init: FnMut(&mut R) -> G,
    {
        let individuals = (0..size).map(|_| Individual::new(init(rng))).collect();
        Self {
            individuals,
            generation: 0,
        }
    }

    /// Get the current generation
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Increment the generation counter
    pub fn increment_generation(&mut self) {
        self.generation += 1;
    }

    /// Set the generation number
    pub fn set_generation(&mut self, generation: usize) {
        self.generation = generation;
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get an individual by index
    pub fn get(&self, index: usize) -> Option<&Individual<G>> {
        self.individuals.get(index)
    }

    /// Get a mutable reference to an individual by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Individual<G>> {
        self.individuals.get_mut(index)
    }

    /// Add an individual to the population
    pub fn push(&mut self, individual: Individual<G>) {
        self.individuals.push(individual);
    }

    /// Get an iterator over the individuals
    pub fn iter(&self) -> impl Iterator<Item = &Individual<G>> {
        self.individuals.iter()
    }

    /// Get a mutable iterator over the individuals
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Individual<G>> {
        self.individuals.iter_mut()
    }

    /// Get the underlying slice of individuals
    pub fn individuals(&self) -> &[Individual<G>] {
        &self.individuals
    }

    /// Get mutable access to the underlying vector
    pub fn individuals_mut(&mut self) -> &mut Vec<Individual<G>> {
        &mut self.individuals
    }

    /// Take the individuals out of this population
    pub fn into_individuals(self) -> Vec<Individual<G>> {
        self.individuals
    }

    /// Get the best individual (lowest fitness)
    pub fn best(&self) -> Option<&Individual<G>> {
        self.individuals
            .iter()
            .filter(|i| i.is_evaluated())
            .min_by(|a, b| {
                let fa = a.fitness.unwrap_or(f64::INFINITY);
                let fb = b.fitness.unwrap_or(f64::INFINITY);
                fa.partial_cmp(&fb).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Get the worst individual (highest fitness)
    pub fn worst(&self) -> Option<&Individual<G>> {
        self.individuals
            .iter()
            .filter(|i| i.is_evaluated())
            .max_by(|a, b| {
                let fa = a.fitness.unwrap_or(f64::NEG_INFINITY);
                let fb = b.fitness.unwrap_or(f64::NEG_INFINITY);
                fa.partial_cmp(&fb).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Sort the population by fitness, best (lowest) first
    pub fn sort_by_fitness(&mut self) {
        self.individuals.sort_by(|a, b| {
            let fa = a.fitness.unwrap_or(f64::INFINITY);
            let fb = b.fitness.unwrap_or(f64::INFINITY);
            fa.partial_cmp(&fb).unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Check if all individuals have been evaluated
    pub fn all_evaluated(&self) -> bool {
        self.individuals.iter().all(|i| i.is_evaluated())
    }

    /// Count the number of evaluated individuals
    pub fn count_evaluated(&self) -> usize {
        self.individuals.iter().filter(|i| i.is_evaluated()).count()
    }

    /// Get the fitness values in population order
    ///
    /// Panics if any individual is unevaluated, so the result is always
    /// index-aligned with the population.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.individuals.iter().map(|i| i.fitness_value()).collect()
    }

    /// Get genome-fitness pairs as owned tuples
    pub fn as_fitness_pairs(&self) -> Vec<(G, f64)> {
        self.individuals
            .iter()
            .filter_map(|i| i.fitness.map(|f| (i.genome.clone(), f)))
            .collect()
    }

    /// Evaluate all unevaluated individuals with the given fitness function
    ///
    /// The genome is passed mutably so refining fitness wrappers can
    /// improve it in place before scoring. Returns the number of
    /// evaluations performed.
    pub fn evaluate<Fit>(&mut self, fitness: &Fit) -> usize
    where
        Fit: Fitness<Genome = G>,
    {
        let mut evaluations = 0;
        for individual in &mut self.individuals {
            if !individual.is_evaluated() {
                let f = fitness.evaluate(&mut individual.genome);
                individual.set_fitness(f);
                evaluations += 1;
            }
        }
        evaluations
    }

    /// Compute mean fitness over the evaluated individuals
    pub fn mean_fitness(&self) -> Option<f64> {
        let evaluated: Vec<f64> = self.individuals.iter().filter_map(|i| i.fitness).collect();

        if evaluated.is_empty() {
            None
        } else {
            Some(evaluated.iter().sum::<f64>() / evaluated.len() as f64)
        }
    }

    /// Compute fitness standard deviation (sample, n - 1)
    pub fn fitness_std(&self) -> Option<f64> {
        let mean = self.mean_fitness()?;
        let evaluated: Vec<f64> = self.individuals.iter().filter_map(|i| i.fitness).collect();

        if evaluated.len() < 2 {
            return None;
        }

        let variance = evaluated.iter().map(|f| (f - mean).powi(2)).sum::<f64>()
            / (evaluated.len() - 1) as f64;
        Some(variance.sqrt())
    }

    /// Compute population diversity (average pairwise genome distance)
    pub fn diversity(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }

        let mut total_distance = 0.0;
        let mut count = 0;

        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                total_distance += self.individuals[i]
                    .genome
                    .distance(&self.individuals[j].genome);
                count += 1;
            }
        }

        total_distance / count as f64
    }
}

impl<G> Default for Population<G>
where
    G: EvolutionaryGenome,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<G> std::ops::Index<usize> for Population<G>
where
    G: EvolutionaryGenome,
{
    type Output = Individual<G>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl<G> std::ops::IndexMut<usize> for Population<G>
where
    G: EvolutionaryGenome,
{
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.individuals[index]
    }
}

impl<G> IntoIterator for Population<G>
where
    G: EvolutionaryGenome,
{
    type Item = Individual<G>;
    type IntoIter = std::vec::IntoIter<Individual<G>>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

impl<G> FromIterator<Individual<G>> for Population<G>
where
    G: EvolutionaryGenome,
{
    fn from_iter<I: IntoIterator<Item = Individual<G>>>(iter: I) -> Self {
        Self::from_individuals(iter.into_iter().collect())
    }
}
