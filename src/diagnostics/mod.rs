//! Diagnostics and statistics
//!
//! This module provides statistics collection for evolutionary runs.
//! Fitness minimizes, so the best value of a generation is its smallest.
//! Diversity is not collected here; it is O(n²) and meant for periodic
//! sampling through the diversity module, not per-generation bookkeeping.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::genome::traits::EvolutionaryGenome;
use crate::population::population::Population;

/// Statistics for a single generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number
    pub generation: usize,
    /// Total fitness evaluations so far
    pub evaluations: usize,
    /// Best (lowest) fitness in this generation
    pub best_fitness: f64,
    /// Worst (highest) fitness in this generation
    pub worst_fitness: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Median fitness
    pub median_fitness: f64,
    /// Fitness standard deviation
    pub fitness_std: f64,
    /// Timing information
    pub timing: TimingStats,
}

/// Timing statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimingStats {
    /// Time spent on fitness evaluation (ms)
    pub evaluation_ms: f64,
    /// Time spent on selection and crossover (ms)
    pub breeding_ms: f64,
    /// Time spent on mutation (ms)
    pub mutation_ms: f64,
    /// Time spent on replacement (ms)
    pub replacement_ms: f64,
    /// Total generation time (ms)
    pub total_ms: f64,
}

impl TimingStats {
    /// Create new timing stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Set evaluation time
    pub fn with_evaluation(mut self, duration: Duration) -> Self {
        self.evaluation_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Set selection-and-crossover time
    pub fn with_breeding(mut self, duration: Duration) -> Self {
        self.breeding_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Set mutation time
    pub fn with_mutation(mut self, duration: Duration) -> Self {
        self.mutation_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Set replacement time
    pub fn with_replacement(mut self, duration: Duration) -> Self {
        self.replacement_ms = duration.as_secs_f64() * 1000.0;
        self
    }

    /// Set total time
    pub fn with_total(mut self, duration: Duration) -> Self {
        self.total_ms = duration.as_secs_f64() * 1000.0;
        self
    }
}

impl GenerationStats {
    /// Compute statistics from a population
    ///
    /// Unevaluated individuals are skipped.
    pub fn from_population<G>(
        population: &Population<G>,
        generation: usize,
        evaluations: usize,
    ) -> Self
    where
        G: EvolutionaryGenome,
    {
        let mut fitnesses: Vec<f64> = population.iter().filter_map(|i| i.fitness).collect();

        if fitnesses.is_empty() {
            return Self {
                generation,
                evaluations,
                best_fitness: f64::INFINITY,
                worst_fitness: f64::NEG_INFINITY,
                mean_fitness: 0.0,
                median_fitness: 0.0,
                fitness_std: 0.0,
                timing: TimingStats::default(),
            };
        }

        fitnesses.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let best = fitnesses[0];
        let worst = fitnesses[fitnesses.len() - 1];
        let mean = fitnesses.iter().sum::<f64>() / fitnesses.len() as f64;
        let median = if fitnesses.len() % 2 == 0 {
            (fitnesses[fitnesses.len() / 2 - 1] + fitnesses[fitnesses.len() / 2]) / 2.0
        } else {
            fitnesses[fitnesses.len() / 2]
        };

        let variance = if fitnesses.len() > 1 {
            fitnesses.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / (fitnesses.len() - 1) as f64
        } else {
            0.0
        };
        let std = variance.sqrt();

        Self {
            generation,
            evaluations,
            best_fitness: best,
            worst_fitness: worst,
            mean_fitness: mean,
            median_fitness: median,
            fitness_std: std,
            timing: TimingStats::default(),
        }
    }

    /// Set timing information
    pub fn with_timing(mut self, timing: TimingStats) -> Self {
        self.timing = timing;
        self
    }
}

/// Statistics collector for an entire evolution run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Statistics per generation
    pub generations: Vec<GenerationStats>,
    /// Total runtime in milliseconds
    pub total_runtime_ms: f64,
    /// Reason for termination
    pub termination_reason: Option<String>,
}

impl EvolutionStats {
    /// Create a new stats collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation's statistics
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Get the number of generations recorded
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Get the best fitness across all generations
    pub fn best_fitness(&self) -> Option<f64> {
        self.generations
            .iter()
            .map(|g| g.best_fitness)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Get the final generation's best fitness
    pub fn final_best_fitness(&self) -> Option<f64> {
        self.generations.last().map(|g| g.best_fitness)
    }

    /// Get the history of best fitness values
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.best_fitness).collect()
    }

    /// Get the history of mean fitness values
    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.mean_fitness).collect()
    }

    /// Set the termination reason
    pub fn set_termination_reason(&mut self, reason: &str) {
        self.termination_reason = Some(reason.to_string());
    }

    /// Set the total runtime
    pub fn set_runtime(&mut self, duration: Duration) {
        self.total_runtime_ms = duration.as_secs_f64() * 1000.0;
    }

    /// Get a summary of the evolution run
    pub fn summary(&self) -> String {
        let best = self.best_fitness().unwrap_or(f64::INFINITY);
        let final_best = self.final_best_fitness().unwrap_or(f64::INFINITY);
        let generations = self.num_generations();
        let runtime = self.total_runtime_ms;

        format!(
            "Evolution Summary:\n\
             - Generations: {}\n\
             - Best fitness: {:.6}\n\
             - Final best: {:.6}\n\
             - Runtime: {:.2}ms\n\
             - Termination: {}",
            generations,
            best,
            final_best,
            runtime,
            self.termination_reason.as_deref().unwrap_or("unknown")
        )
    }
}

/// Result of an evolution run
#[derive(Clone, Debug)]
pub struct EvolutionResult<G>
where
    G: EvolutionaryGenome,
{
    /// The best genome found
    pub best_genome: G,
    /// The best fitness value
    pub best_fitness: f64,
    /// Number of generations completed
    pub generations: usize,
    /// Total fitness evaluations
    pub evaluations: usize,
    /// Statistics for the run
    pub stats: EvolutionStats,
}

impl<G> EvolutionResult<G>
where
    G: EvolutionaryGenome,
{
    /// Create a new evolution result
    pub fn new(best_genome: G, best_fitness: f64, generations: usize, evaluations: usize) -> Self {
        Self {
            best_genome,
            best_fitness,
            generations,
            evaluations,
            stats: EvolutionStats::new(),
        }
    }

    /// Add statistics to the result
    pub fn with_stats(mut self, stats: EvolutionStats) -> Self {
        self.stats = stats;
        self
    }
}

pub mod prelude {
    pub use super::{EvolutionResult, EvolutionStats, GenerationStats, TimingStats};
}
