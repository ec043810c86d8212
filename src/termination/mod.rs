//! Termination criteria
//!
//! This module provides the stock termination criteria for the
//! generational driver. Fitness minimizes throughout, so targets are
//! reached from above.

use crate::genome::traits::EvolutionaryGenome;
use crate::population::population::Population;

/// Evolution state for termination checking
#[derive(Clone, Debug)]
pub struct EvolutionState<'a, G>
where
    G: EvolutionaryGenome,
{
    /// Current generation number
    pub generation: usize,
    /// Total fitness evaluations so far
    pub evaluations: usize,
    /// Best fitness found so far
    pub best_fitness: f64,
    /// Reference to the current population
    pub population: &'a Population<G>,
    /// Best fitness found per generation, oldest first
    pub fitness_history: &'a [f64],
}

/// Termination criterion trait
pub trait TerminationCriterion<G: EvolutionaryGenome>: Send + Sync {
    /// Check if evolution should terminate
    fn should_terminate(&self, state: &EvolutionState<G>) -> bool;

    /// Get a description of why termination occurred
    fn reason(&self) -> &'static str;
}

/// Terminate after a maximum number of generations
#[derive(Clone, Debug)]
pub struct MaxGenerations(pub usize);

impl MaxGenerations {
    /// Create a new max generations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl<G: EvolutionaryGenome> TerminationCriterion<G> for MaxGenerations {
    fn should_terminate(&self, state: &EvolutionState<G>) -> bool {
        state.generation >= self.0
    }

    fn reason(&self) -> &'static str {
        "Maximum generations reached"
    }
}

/// Terminate after a maximum number of fitness evaluations
#[derive(Clone, Debug)]
pub struct MaxEvaluations(pub usize);

impl MaxEvaluations {
    /// Create a new max evaluations criterion
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl<G: EvolutionaryGenome> TerminationCriterion<G> for MaxEvaluations {
    fn should_terminate(&self, state: &EvolutionState<G>) -> bool {
        state.evaluations >= self.0
    }

    fn reason(&self) -> &'static str {
        "Maximum evaluations reached"
    }
}

/// Terminate when fitness improvement stagnates
#[derive(Clone, Debug)]
pub struct FitnessStagnation {
    /// Number of generations to look back
    pub window: usize,
    /// Minimum improvement threshold
    pub epsilon: f64,
}

impl FitnessStagnation {
    /// Create a new fitness stagnation criterion
    pub fn new(window: usize, epsilon: f64) -> Self {
        Self { window, epsilon }
    }
}

impl<G: EvolutionaryGenome> TerminationCriterion<G> for FitnessStagnation {
    fn should_terminate(&self, state: &EvolutionState<G>) -> bool {
        if state.fitness_history.len() < self.window {
            return false;
        }

        let start_idx = state.fitness_history.len() - self.window;
        let window = &state.fitness_history[start_idx..];

        if window.is_empty() {
            return false;
        }

        let first = window[0];
        let last = window[window.len() - 1];
        let improvement = (last - first).abs();

        improvement < self.epsilon
    }

    fn reason(&self) -> &'static str {
        "Fitness stagnation detected"
    }
}

/// Terminate when the best fitness drops to the target
#[derive(Clone, Debug)]
pub struct TargetFitness {
    /// Target fitness value
    pub target: f64,
    /// Tolerance for reaching target
    pub tolerance: f64,
}

impl TargetFitness {
    /// Create a new target fitness criterion
    pub fn new(target: f64) -> Self {
        Self {
            target,
            tolerance: 0.0,
        }
    }

    /// Create with a tolerance
    pub fn with_tolerance(target: f64, tolerance: f64) -> Self {
        Self { target, tolerance }
    }
}

impl<G: EvolutionaryGenome> TerminationCriterion<G> for TargetFitness {
    fn should_terminate(&self, state: &EvolutionState<G>) -> bool {
        state.best_fitness <= self.target + self.tolerance
    }

    fn reason(&self) -> &'static str {
        "Target fitness reached"
    }
}

/// Combine criteria with OR logic (any one triggers termination)
pub struct AnyOf<G: EvolutionaryGenome> {
    criteria: Vec<Box<dyn TerminationCriterion<G>>>,
}

impl<G: EvolutionaryGenome> AnyOf<G> {
    /// Create a new AnyOf combinator
    pub fn new(criteria: Vec<Box<dyn TerminationCriterion<G>>>) -> Self {
        Self { criteria }
    }
}

impl<G: EvolutionaryGenome> TerminationCriterion<G> for AnyOf<G> {
    fn should_terminate(&self, state: &EvolutionState<G>) -> bool {
        self.criteria.iter().any(|c| c.should_terminate(state))
    }

    fn reason(&self) -> &'static str {
        "One of multiple criteria met"
    }
}

/// Combine criteria with AND logic (all must trigger for termination)
pub struct AllOf<G: EvolutionaryGenome> {
    criteria: Vec<Box<dyn TerminationCriterion<G>>>,
}

impl<G: EvolutionaryGenome> AllOf<G> {
    /// Create a new AllOf combinator
    pub fn new(criteria: Vec<Box<dyn TerminationCriterion<G>>>) -> Self {
        Self { criteria }
    }
}

impl<G: EvolutionaryGenome> TerminationCriterion<G> for AllOf<G> {
    fn should_terminate(&self, state: &EvolutionState<G>) -> bool {
        !self.criteria.is_empty() && self.criteria.iter().all(|c| c.should_terminate(state))
    }

    fn reason(&self) -> &'static str {
        "All criteria met"
    }
}

pub mod prelude {
    pub use super::{
        AllOf, AnyOf, EvolutionState, FitnessStagnation, MaxEvaluations, MaxGenerations,
        TargetFitness, TerminationCriterion,
    };
}
