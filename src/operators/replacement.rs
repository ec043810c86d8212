//! Replacement strategies
//!
//! Replacement combines the parent population and its offspring into the
//! next generation. Both populations are consumed so surviving
//! individuals move into the new population instead of being cloned.
//! Every strategy stamps the result with the parents' generation plus
//! one. All individuals must already be evaluated except under full
//! generational replacement, which never inspects fitness.

use rand::Rng;

use crate::genome::traits::EvolutionaryGenome;
use crate::operators::selection::{transform_to_max, CumulativeFitness};
use crate::operators::traits::ReplacementStrategy;
use crate::population::individual::Individual;
use crate::population::population::Population;

/// Full generational replacement
///
/// The offspring replace the parents wholesale; no parent survives and
/// the requested size is ignored.
#[derive(Clone, Debug, Default)]
pub struct GenerationalReplacement;

impl GenerationalReplacement {
    /// Create a new full generational replacement
    pub fn new() -> Self {
        Self
    }
}

impl<G: EvolutionaryGenome> ReplacementStrategy<G> for GenerationalReplacement {
    fn replace<R: Rng>(
        &self,
        parents: Population<G>,
        mut offspring: Population<G>,
        _next_size: usize,
        _best_so_far: Option<&Individual<G>>,
        _rng: &mut R,
    ) -> Population<G> {
        offspring.set_generation(parents.generation() + 1);
        offspring
    }
}

/// Elitist generational replacement
///
/// Like [`GenerationalReplacement`], except that when the run-wide best
/// individual is strictly better than the best of the offspring it
/// overwrites the offspring's last slot. The best fitness found so far
/// can therefore never regress between generations.
#[derive(Clone, Debug, Default)]
pub struct ElitistReplacement;

impl ElitistReplacement {
    /// Create a new elitist replacement
    pub fn new() -> Self {
        Self
    }
}

impl<G: EvolutionaryGenome> ReplacementStrategy<G> for ElitistReplacement {
    fn replace<R: Rng>(
        &self,
        parents: Population<G>,
        mut offspring: Population<G>,
        _next_size: usize,
        best_so_far: Option<&Individual<G>>,
        _rng: &mut R,
    ) -> Population<G> {
        if let Some(best) = best_so_far {
            let lost = match offspring.best() {
                Some(gen_best) => best.is_better_than(gen_best),
                None => false,
            };
            if lost {
                let last = offspring.len() - 1;
                offspring[last] = best.clone();
            }
        }

        offspring.set_generation(parents.generation() + 1);
        offspring
    }
}

/// Truncation replacement (replacement of the worst)
///
/// Merges parents and offspring into one pool and keeps the `next_size`
/// individuals with the lowest fitness, using a partial selection rather
/// than a full sort.
#[derive(Clone, Debug, Default)]
pub struct TruncationReplacement;

impl TruncationReplacement {
    /// Create a new truncation replacement
    pub fn new() -> Self {
        Self
    }
}

impl<G: EvolutionaryGenome> ReplacementStrategy<G> for TruncationReplacement {
    fn replace<R: Rng>(
        &self,
        parents: Population<G>,
        offspring: Population<G>,
        next_size: usize,
        _best_so_far: Option<&Individual<G>>,
        _rng: &mut R,
    ) -> Population<G> {
        let next_generation = parents.generation() + 1;

        let mut pool: Vec<Individual<G>> = parents.into_individuals();
        pool.extend(offspring.into_individuals());
        assert!(
            next_size <= pool.len(),
            "next generation cannot exceed the merged pool"
        );

        if next_size < pool.len() {
            pool.select_nth_unstable_by(next_size, |a, b| {
                a.fitness_value()
                    .partial_cmp(&b.fitness_value())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            pool.truncate(next_size);
        }

        let mut population = Population::from_individuals(pool);
        population.set_generation(next_generation);
        population
    }
}

/// Steady-state roulette replacement
///
/// Merges parents and offspring, extends a cumulative selection index
/// over the merged pool, then repeatedly tosses the roulette wheel and
/// moves the drawn individual into the next generation, removing it from
/// the pool and the index. Sampling is without replacement, so the next
/// generation favors fitter individuals probabilistically rather than
/// deterministically.
#[derive(Clone, Debug, Default)]
pub struct SteadyStateRouletteReplacement;

impl SteadyStateRouletteReplacement {
    /// Create a new steady-state roulette replacement
    pub fn new() -> Self {
        Self
    }
}

impl<G: EvolutionaryGenome> ReplacementStrategy<G> for SteadyStateRouletteReplacement {
    fn replace<R: Rng>(
        &self,
        parents: Population<G>,
        offspring: Population<G>,
        next_size: usize,
        _best_so_far: Option<&Individual<G>>,
        rng: &mut R,
    ) -> Population<G> {
        let next_generation = parents.generation() + 1;
        let parent_count = parents.len();

        let mut pool: Vec<Individual<G>> = parents.into_individuals();
        pool.extend(offspring.into_individuals());
        assert!(
            next_size <= pool.len(),
            "next generation cannot exceed the merged pool"
        );

        let fitnesses: Vec<f64> = pool.iter().map(|i| i.fitness_value()).collect();
        let mut weights = transform_to_max(&fitnesses);

        let mut cumulative = CumulativeFitness::from_weights(&weights[..parent_count]);
        cumulative.extend(&weights[parent_count..]);

        let mut next: Vec<Individual<G>> = Vec::with_capacity(next_size);
        for _ in 0..next_size {
            let index = cumulative.toss(rng);
            next.push(pool.remove(index));
            let weight = weights.remove(index);
            cumulative.remove(index, weight);
        }

        let mut population = Population::from_individuals(next);
        population.set_generation(next_generation);
        population
    }
}
