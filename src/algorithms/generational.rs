//! Generational genetic algorithm
//!
//! The driver repeats one transition per generation: refresh the
//! selection bookkeeping, breed offspring by roulette-selected parent
//! pairs and crossover, mutate the offspring in place, evaluate them,
//! hand parents and offspring to the replacement strategy, then consult
//! the termination criterion. Fitness minimizes throughout; the
//! run-wide best individual is tracked across generations and exposed
//! to the replacement strategy so elitism can restore it.

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{EvolutionResult, EvolutionStats, GenerationStats, TimingStats};
use crate::error::EvolutionError;
use crate::fitness::traits::Fitness;
use crate::genome::traits::EvolutionaryGenome;
use crate::operators::mutation::mutate_population;
use crate::operators::traits::{
    CrossoverOperator, MutationOperator, ReplacementStrategy, SelectionOperator,
};
use crate::population::individual::Individual;
use crate::population::population::Population;
use crate::termination::{EvolutionState, MaxGenerations, TerminationCriterion};

/// Configuration for the generational driver
///
/// Offspring count and next-generation size default to the population
/// size, and the per-individual mutation probability defaults to
/// `1 / population_size`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of individuals in the initial population
    pub population_size: usize,
    /// Number of offspring bred per generation
    pub offspring_size: usize,
    /// Size of the population after replacement
    pub next_gen_size: usize,
    /// Probability of mutating each offspring
    pub mutation_probability: f64,
}

impl RunConfig {
    /// Default configuration for a population of the given size
    pub fn for_population(size: usize) -> Self {
        Self {
            population_size: size,
            offspring_size: size,
            next_gen_size: size,
            mutation_probability: if size > 0 { 1.0 / size as f64 } else { 0.0 },
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::for_population(100)
    }
}

/// Builder for [`GenerationalGa`]
///
/// Operators start as `()` placeholders; each setter moves the builder
/// to a type carrying the supplied operator, so `build` only exists
/// once every slot is filled.
pub struct GenerationalBuilder<G, S, C, M, Rep, Fit, Term>
where
    G: EvolutionaryGenome,
{
    population_size: usize,
    offspring_size: Option<usize>,
    next_gen_size: Option<usize>,
    mutation_probability: Option<f64>,
    selection: Option<S>,
    crossover: Option<C>,
    mutation: Option<M>,
    replacement: Option<Rep>,
    fitness: Option<Fit>,
    termination: Option<Term>,
    _phantom: std::marker::PhantomData<G>,
}

impl<G> GenerationalBuilder<G, (), (), (), (), (), ()>
where
    G: EvolutionaryGenome,
{
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            population_size: 100,
            offspring_size: None,
            next_gen_size: None,
            mutation_probability: None,
            selection: None,
            crossover: None,
            mutation: None,
            replacement: None,
            fitness: None,
            termination: None,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G> Default for GenerationalBuilder<G, (), (), (), (), (), ()>
where
    G: EvolutionaryGenome,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<G, S, C, M, Rep, Fit, Term> GenerationalBuilder<G, S, C, M, Rep, Fit, Term>
where
    G: EvolutionaryGenome,
{
    /// Set the population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the number of offspring bred per generation
    pub fn offspring_size(mut self, size: usize) -> Self {
        self.offspring_size = Some(size);
        self
    }

    /// Set the next-generation size handed to replacement
    pub fn next_gen_size(mut self, size: usize) -> Self {
        self.next_gen_size = Some(size);
        self
    }

    /// Set the per-individual mutation probability
    pub fn mutation_probability(mut self, probability: f64) -> Self {
        self.mutation_probability = Some(probability);
        self
    }

    /// Set the selection operator
    pub fn selection<NewS>(
        self,
        selection: NewS,
    ) -> GenerationalBuilder<G, NewS, C, M, Rep, Fit, Term>
    where
        NewS: SelectionOperator,
    {
        GenerationalBuilder {
            population_size: self.population_size,
            offspring_size: self.offspring_size,
            next_gen_size: self.next_gen_size,
            mutation_probability: self.mutation_probability,
            selection: Some(selection),
            crossover: self.crossover,
            mutation: self.mutation,
            replacement: self.replacement,
            fitness: self.fitness,
            termination: self.termination,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Set the crossover operator
    pub fn crossover<NewC>(
        self,
        crossover: NewC,
    ) -> GenerationalBuilder<G, S, NewC, M, Rep, Fit, Term>
    where
        NewC: CrossoverOperator<G>,
    {
        GenerationalBuilder {
            population_size: self.population_size,
            offspring_size: self.offspring_size,
            next_gen_size: self.next_gen_size,
            mutation_probability: self.mutation_probability,
            selection: self.selection,
            crossover: Some(crossover),
            mutation: self.mutation,
            replacement: self.replacement,
            fitness: self.fitness,
            termination: self.termination,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Set the mutation operator
    pub fn mutation<NewM>(
        self,
        mutation: NewM,
    ) -> GenerationalBuilder<G, S, C, NewM, Rep, Fit, Term>
    where
        NewM: MutationOperator<G>,
    {
        GenerationalBuilder {
            population_size: self.population_size,
            offspring_size: self.offspring_size,
            next_gen_size: self.next_gen_size,
            mutation_probability: self.mutation_probability,
            selection: self.selection,
            crossover: self.crossover,
            mutation: Some(mutation),
            replacement: self.replacement,
            fitness: self.fitness,
            termination: self.termination,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Set the replacement strategy
    pub fn replacement<NewRep>(
        self,
        replacement: NewRep,
    ) -> GenerationalBuilder<G, S, C, M, NewRep, Fit, Term>
    where
        NewRep: ReplacementStrategy<G>,
    {
        GenerationalBuilder {
            population_size: self.population_size,
            offspring_size: self.offspring_size,
            next_gen_size: self.next_gen_size,
            mutation_probability: self.mutation_probability,
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            replacement: Some(replacement),
            fitness: self.fitness,
            termination: self.termination,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Set the fitness function
    pub fn fitness<NewFit>(
        self,
        fitness: NewFit,
    ) -> GenerationalBuilder<G, S, C, M, Rep, NewFit, Term>
    where
        NewFit: Fitness<Genome = G>,
    {
        GenerationalBuilder {
            population_size: self.population_size,
            offspring_size: self.offspring_size,
            next_gen_size: self.next_gen_size,
            mutation_probability: self.mutation_probability,
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            replacement: self.replacement,
            fitness: Some(fitness),
            termination: self.termination,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Set the termination criterion
    pub fn termination<NewTerm>(
        self,
        termination: NewTerm,
    ) -> GenerationalBuilder<G, S, C, M, Rep, Fit, NewTerm>
    where
        NewTerm: TerminationCriterion<G>,
    {
        GenerationalBuilder {
            population_size: self.population_size,
            offspring_size: self.offspring_size,
            next_gen_size: self.next_gen_size,
            mutation_probability: self.mutation_probability,
            selection: self.selection,
            crossover: self.crossover,
            mutation: self.mutation,
            replacement: self.replacement,
            fitness: self.fitness,
            termination: Some(termination),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Set max generations (convenience method)
    pub fn max_generations(
        self,
        max: usize,
    ) -> GenerationalBuilder<G, S, C, M, Rep, Fit, MaxGenerations> {
        self.termination(MaxGenerations::new(max))
    }
}

impl<G, S, C, M, Rep, Fit, Term> GenerationalBuilder<G, S, C, M, Rep, Fit, Term>
where
    G: EvolutionaryGenome,
    S: SelectionOperator,
    C: CrossoverOperator<G>,
    M: MutationOperator<G>,
    Rep: ReplacementStrategy<G>,
    Fit: Fitness<Genome = G>,
    Term: TerminationCriterion<G>,
{
    /// Build the GA instance
    #[allow(clippy::type_complexity)]
    pub fn build(self) -> Result<GenerationalGa<G, S, C, M, Rep, Fit, Term>, EvolutionError> {
        if self.population_size < 2 {
            return Err(EvolutionError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }

        let mutation_probability = self
            .mutation_probability
            .unwrap_or(1.0 / self.population_size as f64);
        if !(0.0..=1.0).contains(&mutation_probability) {
            return Err(EvolutionError::Configuration(
                "Mutation probability must be in [0, 1]".to_string(),
            ));
        }

        let config = RunConfig {
            population_size: self.population_size,
            offspring_size: self.offspring_size.unwrap_or(self.population_size),
            next_gen_size: self.next_gen_size.unwrap_or(self.population_size),
            mutation_probability,
        };

        if config.offspring_size == 0 {
            return Err(EvolutionError::Configuration(
                "Offspring size must be positive".to_string(),
            ));
        }
        if config.next_gen_size == 0 {
            return Err(EvolutionError::Configuration(
                "Next-generation size must be positive".to_string(),
            ));
        }

        let selection = self.selection.ok_or_else(|| {
            EvolutionError::Configuration("Selection operator must be specified".to_string())
        })?;

        let crossover = self.crossover.ok_or_else(|| {
            EvolutionError::Configuration("Crossover operator must be specified".to_string())
        })?;

        let mutation = self.mutation.ok_or_else(|| {
            EvolutionError::Configuration("Mutation operator must be specified".to_string())
        })?;

        let replacement = self.replacement.ok_or_else(|| {
            EvolutionError::Configuration("Replacement strategy must be specified".to_string())
        })?;

        let fitness = self.fitness.ok_or_else(|| {
            EvolutionError::Configuration("Fitness function must be specified".to_string())
        })?;

        let termination = self.termination.ok_or_else(|| {
            EvolutionError::Configuration("Termination criterion must be specified".to_string())
        })?;

        Ok(GenerationalGa {
            config,
            selection,
            crossover,
            mutation,
            replacement,
            fitness,
            termination,
            _phantom: std::marker::PhantomData,
        })
    }
}

/// Generational genetic algorithm
///
/// A generational loop with pluggable selection, crossover, mutation,
/// replacement, fitness, and termination.
pub struct GenerationalGa<G, S, C, M, Rep, Fit, Term>
where
    G: EvolutionaryGenome,
{
    config: RunConfig,
    selection: S,
    crossover: C,
    mutation: M,
    replacement: Rep,
    fitness: Fit,
    termination: Term,
    _phantom: std::marker::PhantomData<G>,
}

impl<G, S, C, M, Rep, Fit, Term> GenerationalGa<G, S, C, M, Rep, Fit, Term>
where
    G: EvolutionaryGenome,
    S: SelectionOperator,
    C: CrossoverOperator<G>,
    M: MutationOperator<G>,
    Rep: ReplacementStrategy<G>,
    Fit: Fitness<Genome = G>,
    Term: TerminationCriterion<G>,
{
    /// Create a builder
    pub fn builder() -> GenerationalBuilder<G, (), (), (), (), (), ()> {
        GenerationalBuilder::new()
    }

    /// The resolved configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run the algorithm from a fresh random population
    ///
    /// `init` generates one genome per call; the initial population has
    /// the configured size.
    pub fn run<R, Init>(
        &self,
        init: Init,
        rng: &mut R,
    ) -> Result<EvolutionResult<G>, EvolutionError>
    where
        R: Rng,
        Init: FnMut(&mut R) -> G,
    {
        let population = Population::generate_with(self.config.population_size, rng, init);
        self.run_with(population, rng)
    }

    /// Run the algorithm from an externally supplied population
    ///
    /// Individuals the caller already evaluated keep their scores; the
    /// rest are evaluated before the first generation.
    pub fn run_with<R: Rng>(
        &self,
        mut population: Population<G>,
        rng: &mut R,
    ) -> Result<EvolutionResult<G>, EvolutionError> {
        let start_time = Instant::now();

        let mut stats = EvolutionStats::new();
        let mut fitness_history: Vec<f64> = Vec::new();

        // Evaluate whatever the caller left unevaluated
        let eval_start = Instant::now();
        let mut evaluations = population.evaluate(&self.fitness);
        let eval_time = eval_start.elapsed();

        let mut best_individual = population
            .best()
            .ok_or(EvolutionError::EmptyPopulation)?
            .clone();

        let gen_stats =
            GenerationStats::from_population(&population, population.generation(), evaluations)
                .with_timing(TimingStats::new().with_evaluation(eval_time));
        fitness_history.push(gen_stats.best_fitness);
        stats.record(gen_stats);

        loop {
            let state = EvolutionState {
                generation: population.generation(),
                evaluations,
                best_fitness: best_individual.fitness_value(),
                population: &population,
                fitness_history: &fitness_history,
            };

            if self.termination.should_terminate(&state) {
                stats.set_termination_reason(self.termination.reason());
                break;
            }

            let gen_start = Instant::now();

            // Begin-generation bookkeeping: the selection column stays
            // fixed for the whole breeding phase
            let fitnesses = population.fitness_values();

            let breed_start = Instant::now();
            let mut offspring: Population<G> =
                Population::with_capacity(self.config.offspring_size);
            while offspring.len() < self.config.offspring_size {
                let (first, second) = self.selection.select_distinct_pair(&fitnesses, rng)?;
                let (child1, child2) = self.crossover.crossover(
                    &population[first].genome,
                    &population[second].genome,
                    rng,
                );

                offspring.push(Individual::new(child1));
                if offspring.len() < self.config.offspring_size {
                    offspring.push(Individual::new(child2));
                }
            }
            let breed_time = breed_start.elapsed();

            let mutation_start = Instant::now();
            mutate_population(
                &mut offspring,
                &self.mutation,
                self.config.mutation_probability,
                rng,
            );
            let mutation_time = mutation_start.elapsed();

            let eval_start = Instant::now();
            evaluations += offspring.evaluate(&self.fitness);
            let eval_time = eval_start.elapsed();

            if let Some(best) = offspring.best() {
                if best.is_better_than(&best_individual) {
                    best_individual = best.clone();
                }
            }

            let replacement_start = Instant::now();
            population = self.replacement.replace(
                population,
                offspring,
                self.config.next_gen_size,
                Some(&best_individual),
                rng,
            );
            let replacement_time = replacement_start.elapsed();

            let timing = TimingStats::new()
                .with_breeding(breed_time)
                .with_mutation(mutation_time)
                .with_evaluation(eval_time)
                .with_replacement(replacement_time)
                .with_total(gen_start.elapsed());

            let gen_stats =
                GenerationStats::from_population(&population, population.generation(), evaluations)
                    .with_timing(timing);
            fitness_history.push(gen_stats.best_fitness);
            stats.record(gen_stats);
        }

        stats.set_runtime(start_time.elapsed());

        let best_fitness = best_individual.fitness_value();
        Ok(EvolutionResult::new(
            best_individual.genome,
            best_fitness,
            population.generation(),
            evaluations,
        )
        .with_stats(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::benchmarks::{OneMax, TourLength};
    use crate::genome::bit_string::BitString;
    use crate::genome::permutation::Permutation;
    use crate::genome::traits::BinaryGenome;
    use crate::local_search::TwoOptRefinement;
    use crate::operators::crossover::{NPointCrossover, OrderCrossover};
    use crate::operators::mutation::{BitFlipMutation, SwapMutation};
    use crate::operators::replacement::{
        ElitistReplacement, GenerationalReplacement, TruncationReplacement,
    };
    use crate::operators::selection::RouletteSelection;
    use crate::termination::TargetFitness;
    use approx::assert_relative_eq;

    #[test]
    fn test_builder_defaults() {
        let ga = GenerationalBuilder::<BitString, _, _, _, _, _, _>::new()
            .population_size(40)
            .selection(RouletteSelection::new())
            .crossover(NPointCrossover::new(2))
            .mutation(BitFlipMutation::new())
            .replacement(GenerationalReplacement::new())
            .fitness(OneMax::new(16))
            .max_generations(5)
            .build()
            .unwrap();

        let config = ga.config();
        assert_eq!(config.offspring_size, 40);
        assert_eq!(config.next_gen_size, 40);
        assert_relative_eq!(config.mutation_probability, 1.0 / 40.0);
    }

    #[test]
    fn test_builder_rejects_tiny_population() {
        let result = GenerationalBuilder::<BitString, _, _, _, _, _, _>::new()
            .population_size(1)
            .selection(RouletteSelection::new())
            .crossover(NPointCrossover::new(2))
            .mutation(BitFlipMutation::new())
            .replacement(GenerationalReplacement::new())
            .fitness(OneMax::new(16))
            .max_generations(5)
            .build();

        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Population size"));
        }
    }

    #[test]
    fn test_builder_rejects_bad_mutation_probability() {
        let result = GenerationalBuilder::<BitString, _, _, _, _, _, _>::new()
            .population_size(20)
            .mutation_probability(1.5)
            .selection(RouletteSelection::new())
            .crossover(NPointCrossover::new(2))
            .mutation(BitFlipMutation::new())
            .replacement(GenerationalReplacement::new())
            .fitness(OneMax::new(16))
            .max_generations(5)
            .build();

        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("Mutation probability"));
        }
    }

    #[test]
    fn test_onemax_improves_under_truncation() {
        let mut rng = rand::thread_rng();
        let ga = GenerationalBuilder::new()
            .population_size(40)
            .selection(RouletteSelection::new())
            .crossover(NPointCrossover::new(2))
            .mutation(BitFlipMutation::new())
            .replacement(TruncationReplacement::new())
            .fitness(OneMax::new(24))
            .max_generations(60)
            .build()
            .unwrap();

        let result = ga.run(|rng| BitString::random(rng, 24), &mut rng).unwrap();

        let history = result.stats.best_fitness_history();
        assert!(result.best_fitness < history[0]);
        assert!(
            result.best_fitness <= 8.0,
            "expected strong progress, got {}",
            result.best_fitness
        );
        assert_eq!(result.generations, 60);
        assert_eq!(result.stats.num_generations(), 61);
    }

    #[test]
    fn test_elitist_history_never_regresses() {
        let mut rng = rand::thread_rng();
        let ga = GenerationalBuilder::new()
            .population_size(20)
            .selection(RouletteSelection::new())
            .crossover(NPointCrossover::new(2))
            .mutation(BitFlipMutation::new())
            .replacement(ElitistReplacement::new())
            .fitness(OneMax::new(16))
            .max_generations(40)
            .build()
            .unwrap();

        let result = ga.run(|rng| BitString::random(rng, 16), &mut rng).unwrap();

        let history = result.stats.best_fitness_history();
        for window in history.windows(2) {
            assert!(window[1] <= window[0]);
        }
    }

    #[test]
    fn test_memetic_tour_reaches_optimum() {
        let mut rng = rand::thread_rng();
        let points = vec![(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (0.0, 1.0)];
        let refined = TwoOptRefinement::new(TourLength::from_points(points), 2);

        let ga = GenerationalBuilder::new()
            .population_size(8)
            .selection(RouletteSelection::new())
            .crossover(OrderCrossover::new())
            .mutation(SwapMutation::new())
            .replacement(ElitistReplacement::new())
            .fitness(refined)
            .max_generations(10)
            .build()
            .unwrap();

        let result = ga.run(|rng| Permutation::random(4, rng), &mut rng).unwrap();

        // Every evaluation refines to the uncrossed rectangle tour
        assert_relative_eq!(result.best_fitness, 6.0);
    }

    #[test]
    fn test_target_reached_before_first_generation() {
        let mut rng = rand::thread_rng();
        let ga = GenerationalBuilder::new()
            .population_size(4)
            .selection(RouletteSelection::new())
            .crossover(NPointCrossover::new(2))
            .mutation(BitFlipMutation::new())
            .replacement(GenerationalReplacement::new())
            .fitness(OneMax::new(12))
            .termination(TargetFitness::new(0.0))
            .build()
            .unwrap();

        let mut seeded = vec![Individual::new(BitString::ones(12))];
        seeded.extend((0..3).map(|_| Individual::new(BitString::zeros(12))));

        let result = ga
            .run_with(Population::from_individuals(seeded), &mut rng)
            .unwrap();

        assert_eq!(result.best_fitness, 0.0);
        assert_eq!(result.generations, 0);
        assert_eq!(result.stats.num_generations(), 1);
        assert_eq!(
            result.stats.termination_reason.as_deref(),
            Some("Target fitness reached")
        );
        assert!(result.best_genome.bits().iter().all(|&b| b));
    }

    #[test]
    fn test_evaluation_accounting() {
        let mut rng = rand::thread_rng();
        let ga = GenerationalBuilder::new()
            .population_size(10)
            .selection(RouletteSelection::new())
            .crossover(NPointCrossover::new(1))
            .mutation(BitFlipMutation::new())
            .replacement(GenerationalReplacement::new())
            .fitness(OneMax::new(8))
            .max_generations(3)
            .build()
            .unwrap();

        let result = ga.run(|rng| BitString::random(rng, 8), &mut rng).unwrap();

        // Initial population plus one full offspring batch per generation
        assert_eq!(result.evaluations, 10 + 3 * 10);
    }

    #[test]
    fn test_run_with_empty_population() {
        let mut rng = rand::thread_rng();
        let ga = GenerationalBuilder::new()
            .population_size(4)
            .selection(RouletteSelection::new())
            .crossover(NPointCrossover::new(1))
            .mutation(BitFlipMutation::new())
            .replacement(GenerationalReplacement::new())
            .fitness(OneMax::new(8))
            .max_generations(3)
            .build()
            .unwrap();

        let result = ga.run_with(Population::<BitString>::new(), &mut rng);
        assert!(matches!(result, Err(EvolutionError::EmptyPopulation)));
    }
}
